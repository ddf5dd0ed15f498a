//! 配置错误类型
//!
//! 所有错误都在求解或仿真状态构建之前触发，不存在部分状态。

use thiserror::Error;

use crate::sim::SimTime;

/// 无效配置：每个变体对应一条被违反的不变量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("request slot count must be >= 1, got {0}")]
    RequestSlots(usize),
    #[error("data slot count must be >= 1, got {0}")]
    DataSlots(usize),
    #[error("downlink slot count must be >= 1, got {0}")]
    DownlinkSlots(usize),
    #[error("minislot duration must be > 0, got {0:?}")]
    Minislot(SimTime),
    #[error("frame duration must be > 0, got {0:?}")]
    FrameTime(SimTime),
    #[error("request phase {request_phase:?} must fit inside frame {frame_time:?}")]
    RequestPhaseTooLong {
        request_phase: SimTime,
        frame_time: SimTime,
    },
    #[error("minimum contention window must be >= 1, got {0}")]
    MinWindow(u64),
    #[error("window growth cap {growth_cap} must not exceed drop cap {drop_cap}")]
    GrowthExceedsDrop { growth_cap: u32, drop_cap: u32 },
    #[error("station count must be >= 1, got {0}")]
    Stations(usize),
}
