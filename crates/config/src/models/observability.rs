use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};

pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const VALID_LOG_FORMATS: [&str; 3] = ["pretty", "text", "json"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ConfigValidator for ObservabilityConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_not_empty(&self.log_level, "observability.log_level")?;
        ValidationUtils::validate_one_of(
            &self.log_level,
            "observability.log_level",
            &VALID_LOG_LEVELS,
        )?;
        ValidationUtils::validate_one_of(
            &self.log_format,
            "observability.log_format",
            &VALID_LOG_FORMATS,
        )?;
        Ok(())
    }
}
