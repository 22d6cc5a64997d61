use std::time::Duration;

use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};

/// 模拟运行参数：请求数量、等待时长与随机种子
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub request_count: usize,
    pub settle_time_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            request_count: 8,
            settle_time_ms: 5000,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_time_ms)
    }
}

impl ConfigValidator for SimulationConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_count(self.request_count, "simulation.request_count", 100_000)?;
        ValidationUtils::validate_duration_ms(self.settle_time_ms, "simulation.settle_time_ms")?;
        Ok(())
    }
}
