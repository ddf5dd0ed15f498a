//! 仿真时间类型
//!
//! 定义时隙/帧时长及其单位转换。帧内延迟以帧为单位计量，
//! 乘以帧时长即可换算为墙上时间。

use serde::{Deserialize, Serialize};

/// 仿真时长（纳秒）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub fn from_nanos(ns: u64) -> SimTime {
        SimTime(ns)
    }
    pub fn from_micros(us: u64) -> SimTime {
        SimTime(us.saturating_mul(1_000))
    }
    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms.saturating_mul(1_000_000))
    }
    pub fn from_secs(s: u64) -> SimTime {
        SimTime(s.saturating_mul(1_000_000_000))
    }
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1e9
    }
}
