use crate::adapters::headless::{HeadlessForm, HeadlessPage};
use crate::core::controller::{FormController, FormEvent};
use crate::domain::model::{Coordinates, Guests};
use crate::utils::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a user would type into the ad form, replayed as UI events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub lodging_type: Option<String>,
    pub rooms: Option<String>,
    pub capacity: Option<String>,
    pub price: Option<String>,
    /// Slider position, applied after `price`.
    pub slider: Option<f64>,
    pub timein: Option<String>,
    pub timeout: Option<String>,
    pub description: String,
    pub features: Vec<String>,
    pub location: Option<Coordinates>,
    pub images: Vec<String>,
}

impl ListingDraft {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Fills the form field by field, dispatching the event each edit fires.
    pub fn replay(
        &self,
        controller: &mut FormController<HeadlessForm>,
        page: &HeadlessPage,
    ) -> Result<()> {
        controller.view_mut().type_title(&self.title);
        controller.handle(FormEvent::TitleInput)?;

        if let Some(lodging) = &self.lodging_type {
            controller.view_mut().select_lodging_type(lodging);
            controller.handle(FormEvent::LodgingTypeChanged)?;
        }

        if let Some(rooms) = &self.rooms {
            controller.view_mut().select_room_number(rooms);
            controller.handle(FormEvent::RoomNumberChanged)?;
        }

        if let Some(capacity) = &self.capacity {
            let guests: Guests = capacity.parse()?;
            if !controller.view_mut().select_guests(guests) {
                tracing::warn!("Capacity {} is not available for this room count", guests);
            }
        }

        if let Some(price) = &self.price {
            controller.view_mut().type_price(price);
            controller.handle(FormEvent::PriceChanged)?;
        }

        if let Some(position) = self.slider {
            controller.handle(FormEvent::SliderMoved(position))?;
        }

        if let Some(timein) = &self.timein {
            controller.view_mut().select_time_in(timein);
            controller.handle(FormEvent::TimeInChanged)?;
        }

        if let Some(timeout) = &self.timeout {
            controller.view_mut().select_time_out(timeout);
            controller.handle(FormEvent::TimeOutChanged)?;
        }

        controller.view_mut().type_description(&self.description);
        for feature in &self.features {
            controller.view_mut().check_feature(feature);
        }

        let location = self.location.unwrap_or_else(|| page.map().marker());
        page.map().move_marker(location);
        controller.handle(FormEvent::AddressPicked(location))?;

        for image in &self.images {
            page.images().stage(image);
        }

        tracing::debug!("Draft replayed: {:?}", self);
        Ok(())
    }
}
