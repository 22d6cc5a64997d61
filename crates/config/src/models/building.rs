use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};

/// 默认的安全楼层（需要门禁卡才能到达）
pub const DEFAULT_SECURE_FLOORS: [i32; 4] = [9, 10, 11, 12];

/// 楼宇配置：楼层范围与安全楼层集合，启动后只读
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingConfig {
    pub min_floor: i32,
    pub max_floor: i32,
    pub secure_floors: Vec<i32>,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            min_floor: 1,
            max_floor: 12,
            secure_floors: DEFAULT_SECURE_FLOORS.to_vec(),
        }
    }
}

impl BuildingConfig {
    pub fn contains(&self, floor: i32) -> bool {
        (self.min_floor..=self.max_floor).contains(&floor)
    }

    pub fn floor_count(&self) -> usize {
        self.max_floor.abs_diff(self.min_floor) as usize + 1
    }
}

impl ConfigValidator for BuildingConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_floor_range(self.min_floor, self.max_floor)?;

        for floor in &self.secure_floors {
            if !self.contains(*floor) {
                return Err(crate::ConfigError::Validation(format!(
                    "building.secure_floors contains floor {} outside {}..={}",
                    floor, self.min_floor, self.max_floor
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_config_default() {
        let config = BuildingConfig::default();
        assert_eq!(config.min_floor, 1);
        assert_eq!(config.max_floor, 12);
        assert_eq!(config.secure_floors, vec![9, 10, 11, 12]);
        assert_eq!(config.floor_count(), 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_floor_count_extreme_range() {
        let config = BuildingConfig {
            min_floor: i32::MIN,
            max_floor: i32::MAX,
            secure_floors: vec![],
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.floor_count(), u32::MAX as usize + 1);

        let basement = BuildingConfig {
            min_floor: -3,
            max_floor: 2,
            secure_floors: vec![-3],
        };
        assert_eq!(basement.floor_count(), 6);
    }

    #[test]
    fn test_building_config_contains() {
        let config = BuildingConfig::default();
        assert!(config.contains(1));
        assert!(config.contains(12));
        assert!(!config.contains(0));
        assert!(!config.contains(13));
    }

    #[test]
    fn test_building_config_validation() {
        // 楼层范围颠倒
        let mut invalid_config = BuildingConfig::default();
        invalid_config.min_floor = 20;
        assert!(invalid_config.validate().is_err());

        // 安全楼层超出楼宇范围
        let mut invalid_config = BuildingConfig::default();
        invalid_config.secure_floors.push(40);
        assert!(invalid_config.validate().is_err());

        // 没有安全楼层也是合法的
        let mut config = BuildingConfig::default();
        config.secure_floors.clear();
        assert!(config.validate().is_ok());
    }
}
