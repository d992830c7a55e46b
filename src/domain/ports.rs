use crate::domain::model::{
    Coordinates, Field, FormPayload, Guests, OptionState, OverlayKind, SubmitMethod,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Typed access to the ad form's fields. Values are the raw strings the
/// markup holds; parsing happens in the controller.
pub trait FormView {
    fn title(&self) -> String;
    fn address(&self) -> String;
    fn set_address(&mut self, value: &str);
    fn lodging_type(&self) -> String;
    fn price(&self) -> String;
    fn set_price(&mut self, value: &str);
    fn price_placeholder(&self) -> String;
    fn set_price_placeholder(&mut self, value: &str);
    fn room_number(&self) -> String;
    fn guest_options(&self) -> Vec<Guests>;
    fn guest_option_state(&self, guests: Guests) -> Option<OptionState>;
    fn set_guest_option(&mut self, guests: Guests, state: OptionState);
    fn time_in(&self) -> String;
    fn set_time_in(&mut self, value: &str);
    fn time_out(&self) -> String;
    fn set_time_out(&mut self, value: &str);
    fn description(&self) -> String;
    fn features(&self) -> Vec<String>;
    /// `None` clears the inline message.
    fn show_field_error(&mut self, field: Field, message: Option<&str>);
    /// Restores every field to its markup default.
    fn reset(&mut self);

    fn selected_guests(&self) -> Option<Guests> {
        self.guest_options().into_iter().find(|guests| {
            self.guest_option_state(*guests)
                .map(|state| state.selected)
                .unwrap_or(false)
        })
    }
}

pub trait OverlayHost {
    fn show(&mut self, kind: OverlayKind);
    fn remove(&mut self, kind: OverlayKind);
    fn is_visible(&self, kind: OverlayKind) -> bool;
}

pub trait MapView {
    /// Re-centres the map and returns where the main marker ends up.
    fn reset(&mut self) -> Coordinates;
}

pub trait FilterForm {
    fn reset(&mut self);
}

pub trait ImagePreviews {
    fn reset(&mut self);
}

/// Sends one submission. Exactly one outcome per call: `Ok` or `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: SubmitMethod, payload: &FormPayload) -> Result<()>;
}
