//! 场景配置
//!
//! 将帧结构、BEB 与网络规模组合为一次求解/仿真的完整输入。

use serde::{Deserialize, Serialize};

use super::{BebConfig, ConfigError, FrameConfig, NetworkConfig};

/// 一次求解或仿真运行的完整参数三元组。
///
/// 外部加载器负责其自身的模式校验；核心只在此重新校验 §3 不变量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub frame: FrameConfig,
    pub beb: BebConfig,
    pub net: NetworkConfig,
}

impl Scenario {
    /// 校验全部配置不变量，任一失败即拒绝整个场景。
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.frame.validate()?;
        self.beb.validate()?;
        self.net.validate()?;
        Ok(())
    }
}
