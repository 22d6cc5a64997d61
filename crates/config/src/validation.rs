use crate::ConfigResult;

/// Trait for configuration validation
pub trait ConfigValidator {
    fn validate(&self) -> ConfigResult<()>;
}

/// General validation utilities
pub struct ValidationUtils;

impl ValidationUtils {
    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field_name: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} cannot be empty"
            )));
        }
        Ok(())
    }

    /// Validate that a duration in milliseconds is reasonable
    pub fn validate_duration_ms(duration_ms: u64, field_name: &str) -> ConfigResult<()> {
        if duration_ms == 0 {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} must be greater than 0"
            )));
        }
        if duration_ms > 3_600_000 {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} must be less than or equal to 3600000"
            )));
        }
        Ok(())
    }

    /// Validate that a count is within `1..=max`
    pub fn validate_count(count: usize, field_name: &str, max: usize) -> ConfigResult<()> {
        if count == 0 {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} must be greater than 0"
            )));
        }
        if count > max {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} must be less than or equal to {max}"
            )));
        }
        Ok(())
    }

    pub fn validate_floor_range(min_floor: i32, max_floor: i32) -> ConfigResult<()> {
        if min_floor > max_floor {
            return Err(crate::ConfigError::Validation(format!(
                "building.min_floor ({min_floor}) must not exceed building.max_floor ({max_floor})"
            )));
        }
        Ok(())
    }

    /// Validate that a value is one of the allowed options
    pub fn validate_one_of(value: &str, field_name: &str, allowed: &[&str]) -> ConfigResult<()> {
        if !allowed.contains(&value) {
            return Err(crate::ConfigError::Validation(format!(
                "Invalid {field_name}: {value}. Valid options: {allowed:?}"
            )));
        }
        Ok(())
    }
}
