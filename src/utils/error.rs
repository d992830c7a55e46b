use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Transport request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Transport rejected submission with status {status}")]
    TransportStatusError { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown lodging type: {value}")]
    UnknownLodgingType { value: String },

    #[error("Unknown room count: {value}")]
    UnknownRoomCount { value: String },
}

impl FormError {
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FormError::TransportError(_) | FormError::TransportStatusError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::TransportError(_) | FormError::TransportStatusError { .. } => {
                "Не удалось отправить объявление".to_string()
            }
            FormError::IoError(e) => format!("Could not read file: {}", e),
            FormError::TomlError(_) | FormError::SerializationError(_) => {
                "Input file is not valid".to_string()
            }
            FormError::UnknownLodgingType { value } => {
                format!("'{}' is not a supported lodging type", value)
            }
            FormError::UnknownRoomCount { value } => {
                format!("'{}' is not a supported room count", value)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FormError::TransportError(_) => "Check the endpoint address and network, then retry",
            FormError::TransportStatusError { .. } => "The server refused the data, retry later",
            FormError::IoError(_) => "Make sure the file exists and is readable",
            FormError::TomlError(_) | FormError::SerializationError(_) => {
                "Fix the syntax of the input file"
            }
            FormError::UnknownLodgingType { .. } => {
                "Use one of: bungalow, flat, hotel, house, palace"
            }
            FormError::UnknownRoomCount { .. } => "Use one of: 1, 2, 3, 100",
            FormError::MissingConfigError { .. } => "Add the missing field to the configuration file",
            FormError::InvalidConfigValueError { .. } => "Review the configuration file",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
