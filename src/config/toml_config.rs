use crate::core::controller::FormSettings;
use crate::domain::model::{Coordinates, PriceRange, SubmitMethod};
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub transport: TransportConfig,
    pub price: PriceConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub endpoint: String,
    pub method: String,
    pub timeout_seconds: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://28.javascript.pages.academy/keksobooking".to_string(),
            method: "POST".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub baseline: u32,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100_000,
            step: 100,
            baseline: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_lat: f64,
    pub default_lng: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_lat: 35.6895,
            default_lng: 139.69171,
        }
    }
}

impl FormConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${LISTING_ENDPOINT})
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn method(&self) -> Result<SubmitMethod> {
        self.transport.method.parse()
    }

    pub fn price_range(&self) -> PriceRange {
        PriceRange {
            min: f64::from(self.price.min),
            max: f64::from(self.price.max),
            step: f64::from(self.price.step),
        }
    }

    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(self.map.default_lat, self.map.default_lng)
    }

    pub fn form_settings(&self) -> Result<FormSettings> {
        Ok(FormSettings {
            price_range: self.price_range(),
            baseline_price: self.price.baseline,
            method: self.method()?,
        })
    }
}

impl Validate for FormConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_required("transport.endpoint", &self.transport.endpoint)?;
        validation::validate_url("transport.endpoint", &self.transport.endpoint)?;
        validation::validate_required("transport.method", &self.transport.method)?;
        validation::validate_one_of("transport.method", &self.transport.method, &["POST", "PUT"])?;
        validation::validate_positive_number(
            "transport.timeout_seconds",
            u32::try_from(self.transport.timeout_seconds).unwrap_or(u32::MAX),
            1,
        )?;
        validation::validate_positive_number("price.step", self.price.step, 1)?;
        validation::validate_range("price.min", self.price.min, 0, self.price.max)?;
        validation::validate_range("price.baseline", self.price.baseline, self.price.min, self.price.max)?;
        validation::validate_range("map.default_lat", self.map.default_lat, -90.0, 90.0)?;
        validation::validate_range("map.default_lng", self.map.default_lng, -180.0, 180.0)?;
        Ok(())
    }
}
