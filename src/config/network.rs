//! 网络规模配置

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// 网络规模：竞争站点数量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// 站点数（N）
    pub stations: usize,
}

impl NetworkConfig {
    /// 校验网络不变量：N ≥ 1。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stations < 1 {
            return Err(ConfigError::Stations(self.stations));
        }
        Ok(())
    }
}
