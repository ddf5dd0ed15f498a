//! 二进制指数退避（BEB）配置
//!
//! 最小竞争窗口、窗口增长上限与丢弃上限。增长倍率固定为 2。

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// 竞争窗口增长倍率（固定）。
pub const WINDOW_GROWTH: u64 = 2;

/// BEB 参数。
///
/// 每次失败后窗口翻倍，最多增长 `growth_cap` 次（窗口上限
/// W·2^r）；总重试次数超过 `drop_cap` 后丢弃分组。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BebConfig {
    /// 最小竞争窗口（W）
    pub min_window: u64,
    /// 窗口增长上限（r）
    pub growth_cap: u32,
    /// 丢弃上限（R）：重试超过该值即丢弃
    pub drop_cap: u32,
}

impl BebConfig {
    /// 校验 BEB 不变量：W ≥ 1，r ≤ R。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_window < 1 {
            return Err(ConfigError::MinWindow(self.min_window));
        }
        if self.growth_cap > self.drop_cap {
            return Err(ConfigError::GrowthExceedsDrop {
                growth_cap: self.growth_cap,
                drop_cap: self.drop_cap,
            });
        }
        Ok(())
    }

    /// 第 j 阶段的竞争窗口：min(W·2^j, W·2^r)。
    pub fn stage_window(&self, stage: u32) -> u64 {
        let capped = stage.min(self.growth_cap);
        self.min_window
            .saturating_mul(WINDOW_GROWTH.saturating_pow(capped))
    }

    /// 窗口上限 W·2^r。
    pub fn max_window(&self) -> u64 {
        self.stage_window(self.growth_cap)
    }
}
