pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::headless::{HeadlessForm, HeadlessPage};
pub use crate::adapters::http::HttpTransport;
pub use crate::app::draft::ListingDraft;
pub use crate::config::toml_config::FormConfig;
pub use crate::core::controller::{Dispatch, FormContext, FormController, FormEvent, FormSettings, Phase};
pub use crate::core::session::{FormSession, SubmitResult};
pub use crate::utils::error::{FormError, Result};
