use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    building::BuildingConfig,
    dispatcher_elevator::{DispatcherConfig, ElevatorConfig},
    observability::ObservabilityConfig,
    simulation::SimulationConfig,
};
use crate::validation::ConfigValidator;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub building: BuildingConfig,
    #[serde(default)]
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 加载配置：默认值 -> 配置文件 -> `ELEVATOR_` 环境变量
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let defaults =
            ConfigBuilder::try_from(&AppConfig::default()).context("构建默认配置失败")?;
        let mut builder = ConfigBuilder::builder().add_source(defaults);

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = ["config/elevator.toml", "elevator.toml"];

            if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ELEVATOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("building.secure_floors"),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }
}

impl ConfigValidator for AppConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        self.building.validate()?;
        self.elevator.validate()?;
        self.dispatcher.validate()?;
        self.simulation.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}
