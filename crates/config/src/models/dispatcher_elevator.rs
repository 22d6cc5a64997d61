use std::time::Duration;

use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatcherConfig {
    pub pool_size: usize,
    pub queue_capacity: usize,
    pub shutdown_grace_period_ms: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            pool_size: 4,
            queue_capacity: 64,
            shutdown_grace_period_ms: 3000,
        }
    }
}

impl DispatcherConfig {
    pub fn shutdown_grace_period(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_period_ms)
    }
}

impl ConfigValidator for DispatcherConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_count(self.pool_size, "dispatcher.pool_size", 256)?;
        ValidationUtils::validate_count(self.queue_capacity, "dispatcher.queue_capacity", 10000)?;
        ValidationUtils::validate_duration_ms(
            self.shutdown_grace_period_ms,
            "dispatcher.shutdown_grace_period_ms",
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElevatorConfig {
    pub count: usize,
    pub travel_delay_ms: u64,
    pub stop_grace_period_ms: u64,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            count: 4,
            travel_delay_ms: 1000,
            stop_grace_period_ms: 3000,
        }
    }
}

impl ElevatorConfig {
    pub fn travel_delay(&self) -> Duration {
        Duration::from_millis(self.travel_delay_ms)
    }

    pub fn stop_grace_period(&self) -> Duration {
        Duration::from_millis(self.stop_grace_period_ms)
    }
}

impl ConfigValidator for ElevatorConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_count(self.count, "elevator.count", 1000)?;
        ValidationUtils::validate_duration_ms(self.travel_delay_ms, "elevator.travel_delay_ms")?;
        ValidationUtils::validate_duration_ms(
            self.stop_grace_period_ms,
            "elevator.stop_grace_period_ms",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_config_validation() {
        let config = DispatcherConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shutdown_grace_period(), Duration::from_secs(3));

        // Test invalid pool_size
        let mut invalid_config = config.clone();
        invalid_config.pool_size = 0;
        assert!(invalid_config.validate().is_err());

        // Test invalid queue_capacity
        let mut invalid_config = config.clone();
        invalid_config.queue_capacity = 0;
        assert!(invalid_config.validate().is_err());

        // Test invalid grace period
        let mut invalid_config = config.clone();
        invalid_config.shutdown_grace_period_ms = 0;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_elevator_config_validation() {
        let config = ElevatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.travel_delay(), Duration::from_secs(1));
        assert_eq!(config.stop_grace_period(), Duration::from_secs(3));

        let mut invalid_config = config.clone();
        invalid_config.count = 0;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = config.clone();
        invalid_config.travel_delay_ms = 0;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_dispatcher_config_serialization() {
        let config = DispatcherConfig::default();

        let serialized = serde_json::to_string(&config).expect("Failed to serialize");
        let deserialized: DispatcherConfig =
            serde_json::from_str(&serialized).expect("Failed to deserialize");

        assert_eq!(config, deserialized);
    }
}
