use crate::domain::model::PriceRange;
use crate::utils::error::{FormError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Price range slider bound to `#price`.
///
/// Mirrors the widget's own behaviour: positions are clamped into the range
/// and snapped to the step, displayed values are rounded to whole numbers and
/// text is read back with a leading-number parse.
#[derive(Debug, Clone)]
pub struct RangeSlider {
    range: PriceRange,
    start: f64,
    value: f64,
}

impl RangeSlider {
    pub fn new(range: PriceRange, start: f64) -> Result<Self> {
        if !(range.step > 0.0) {
            return Err(FormError::InvalidConfigValueError {
                field: "price.step".to_string(),
                value: range.step.to_string(),
                reason: "Step must be greater than zero".to_string(),
            });
        }
        if range.min > range.max {
            return Err(FormError::InvalidConfigValueError {
                field: "price.min".to_string(),
                value: range.min.to_string(),
                reason: format!("Minimum must not exceed maximum {}", range.max),
            });
        }
        if !range.contains(start) {
            return Err(FormError::InvalidConfigValueError {
                field: "price.baseline".to_string(),
                value: start.to_string(),
                reason: format!("Start must be between {} and {}", range.min, range.max),
            });
        }

        Ok(Self {
            range,
            start,
            value: start,
        })
    }

    pub fn range(&self) -> &PriceRange {
        &self.range
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        if !value.is_finite() {
            tracing::debug!("Slider ignored non-finite value");
            return;
        }
        let clamped = value.clamp(self.range.min, self.range.max);
        let steps = ((clamped - self.range.min) / self.range.step).round();
        self.value = (self.range.min + steps * self.range.step).min(self.range.max);
    }

    /// Sets the position from field text. Text without a leading number is ignored.
    pub fn set_from_text(&mut self, text: &str) {
        match parse_leading_float(text) {
            Some(value) => self.set(value),
            None => tracing::debug!("Slider ignored unparsable value {:?}", text),
        }
    }

    /// Current position as shown to the user.
    pub fn get(&self) -> String {
        format_price(self.value)
    }

    pub fn reset(&mut self) {
        self.value = self.start;
    }
}

pub fn format_price(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Longest numeric prefix after leading whitespace, e.g. `"1500abc"` → 1500.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    static NUMBER_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex")
    });

    re.find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
