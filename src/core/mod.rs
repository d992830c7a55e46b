pub mod controller;
pub mod overlay;
pub mod session;
pub mod slider;
pub mod sync;
pub mod validators;

pub use crate::domain::model::{FormPayload, FormSnapshot, ValidationReport};
pub use crate::domain::ports::{FilterForm, FormView, ImagePreviews, MapView, OverlayHost, Transport};
pub use crate::utils::error::Result;
