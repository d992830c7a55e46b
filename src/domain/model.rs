use crate::utils::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LodgingType {
    Bungalow,
    Flat,
    Hotel,
    House,
    Palace,
}

impl LodgingType {
    pub const ALL: [LodgingType; 5] = [
        LodgingType::Bungalow,
        LodgingType::Flat,
        LodgingType::Hotel,
        LodgingType::House,
        LodgingType::Palace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LodgingType::Bungalow => "bungalow",
            LodgingType::Flat => "flat",
            LodgingType::Hotel => "hotel",
            LodgingType::House => "house",
            LodgingType::Palace => "palace",
        }
    }
}

impl fmt::Display for LodgingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LodgingType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        LodgingType::ALL
            .into_iter()
            .find(|lodging| lodging.as_str() == s)
            .ok_or_else(|| FormError::UnknownLodgingType {
                value: s.to_string(),
            })
    }
}

/// Value of the `#room_number` select. `Hundred` is the "not for guests" option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomCount {
    One,
    Two,
    Three,
    Hundred,
}

impl RoomCount {
    pub const ALL: [RoomCount; 4] = [
        RoomCount::One,
        RoomCount::Two,
        RoomCount::Three,
        RoomCount::Hundred,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCount::One => "1",
            RoomCount::Two => "2",
            RoomCount::Three => "3",
            RoomCount::Hundred => "100",
        }
    }
}

impl fmt::Display for RoomCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomCount {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        RoomCount::ALL
            .into_iter()
            .find(|rooms| rooms.as_str() == s)
            .ok_or_else(|| FormError::UnknownRoomCount {
                value: s.to_string(),
            })
    }
}

/// One `#capacity` option. Zero means "not for guests".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guests(pub u8);

impl fmt::Display for Guests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Guests {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<u8>()
            .map(Guests)
            .map_err(|_| FormError::InvalidConfigValueError {
                field: "capacity".to_string(),
                value: s.to_string(),
                reason: "Guest count must be a small integer".to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionState {
    pub selected: bool,
    pub disabled: bool,
    pub hidden: bool,
}

/// Bounds of the price slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl PriceRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100_000.0,
            step: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_address(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Success,
    Error,
}

/// Fields that can carry an inline validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

/// Raw field values read from the form at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub title: String,
    pub address: String,
    pub lodging_type: LodgingType,
    pub price: String,
    pub room_number: RoomCount,
    pub capacity: Option<Guests>,
    pub time_in: String,
    pub time_out: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Form data handed to the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPayload {
    pub title: String,
    pub address: String,
    #[serde(rename = "type")]
    pub lodging_type: LodgingType,
    pub price: String,
    pub rooms: String,
    pub capacity: String,
    pub timein: String,
    pub timeout: String,
    pub description: String,
    pub features: Vec<String>,
}

impl From<&FormSnapshot> for FormPayload {
    fn from(snapshot: &FormSnapshot) -> Self {
        Self {
            title: snapshot.title.clone(),
            address: snapshot.address.clone(),
            lodging_type: snapshot.lodging_type,
            price: snapshot.price.clone(),
            rooms: snapshot.room_number.to_string(),
            capacity: snapshot
                .capacity
                .map(|guests| guests.to_string())
                .unwrap_or_default(),
            timein: snapshot.time_in.clone(),
            timeout: snapshot.time_out.clone(),
            description: snapshot.description.clone(),
            features: snapshot.features.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubmitMethod {
    Post,
    Put,
}

impl SubmitMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitMethod::Post => "POST",
            SubmitMethod::Put => "PUT",
        }
    }
}

impl FromStr for SubmitMethod {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "POST" => Ok(SubmitMethod::Post),
            "PUT" => Ok(SubmitMethod::Put),
            _ => Err(FormError::InvalidConfigValueError {
                field: "transport.method".to_string(),
                value: s.to_string(),
                reason: "Allowed values: POST, PUT".to_string(),
            }),
        }
    }
}
