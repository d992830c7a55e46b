use crate::domain::model::{Field, FieldError, FormSnapshot, LodgingType, PriceRange, ValidationReport};
use crate::domain::rules::{min_price_for, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH};

pub const TITLE_LENGTH_MESSAGE: &str = "от 30 до 100 символов";

/// Title length in characters, counted on the raw value (no trimming).
pub fn validate_title(text: &str) -> bool {
    let length = text.chars().count();
    (TITLE_MIN_LENGTH..=TITLE_MAX_LENGTH).contains(&length)
}

pub fn validate_price(price: f64, lodging: LodgingType) -> bool {
    price >= f64::from(min_price_for(lodging))
}

pub fn price_error_message(lodging: LodgingType) -> String {
    format!(
        "минимальная цена для данного типа жилья {} рублей",
        min_price_for(lodging)
    )
}

pub fn validate_price_ceiling(price: f64, range: &PriceRange) -> bool {
    price <= range.max
}

pub fn price_ceiling_message(range: &PriceRange) -> String {
    format!("максимальная цена {} рублей", range.max)
}

/// Reads `#price` the way the page compares it: surrounding whitespace is
/// ignored and an empty field counts as zero.
pub fn coerce_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// First failing price rule for the raw field value, if any.
pub fn check_price(raw: &str, lodging: LodgingType, range: &PriceRange) -> Option<String> {
    match coerce_price(raw) {
        Some(price) if !validate_price(price, lodging) => Some(price_error_message(lodging)),
        Some(price) if !validate_price_ceiling(price, range) => Some(price_ceiling_message(range)),
        Some(_) => None,
        None => Some(price_error_message(lodging)),
    }
}

pub fn check_title(text: &str) -> Option<String> {
    if validate_title(text) {
        None
    } else {
        Some(TITLE_LENGTH_MESSAGE.to_string())
    }
}

pub fn validate_snapshot(snapshot: &FormSnapshot, range: &PriceRange) -> ValidationReport {
    let mut errors = Vec::new();

    if let Some(message) = check_title(&snapshot.title) {
        errors.push(FieldError {
            field: Field::Title,
            message,
        });
    }

    if let Some(message) = check_price(&snapshot.price, snapshot.lodging_type, range) {
        errors.push(FieldError {
            field: Field::Price,
            message,
        });
    }

    ValidationReport { errors }
}
