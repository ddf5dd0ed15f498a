//! 帧结构配置
//!
//! 定义一帧内的时隙数量与时长：请求微时隙、全双工数据时隙、下行时隙。

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::sim::SimTime;

/// 帧结构：时隙数量与时长。
///
/// 一帧按顺序包含四个阶段：请求（`request_slots` 个微时隙）、
/// 全双工数据（`data_slots` 个单元）、控制/信息、下行
/// （`downlink_slots` 个时隙）。`minislot` 是请求微时隙的量化时长，
/// 必须显式给出，不做推断；`frame_time` 是整帧时长。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// 请求微时隙数（m）
    pub request_slots: usize,
    /// 全双工数据时隙单元数（d）
    pub data_slots: usize,
    /// 下行时隙数（b）
    pub downlink_slots: usize,
    /// 请求微时隙时长（t）
    pub minislot: SimTime,
    /// 整帧时长（T）
    pub frame_time: SimTime,
}

impl FrameConfig {
    /// 校验帧结构不变量：m,d,b ≥ 1，t,T > 0，且 m·t 不超过 T。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_slots < 1 {
            return Err(ConfigError::RequestSlots(self.request_slots));
        }
        if self.data_slots < 1 {
            return Err(ConfigError::DataSlots(self.data_slots));
        }
        if self.downlink_slots < 1 {
            return Err(ConfigError::DownlinkSlots(self.downlink_slots));
        }
        if self.minislot <= SimTime::ZERO {
            return Err(ConfigError::Minislot(self.minislot));
        }
        if self.frame_time <= SimTime::ZERO {
            return Err(ConfigError::FrameTime(self.frame_time));
        }
        let request_phase = self.minislot.0.saturating_mul(self.request_slots as u64);
        if request_phase >= self.frame_time.0 {
            return Err(ConfigError::RequestPhaseTooLong {
                request_phase: SimTime(request_phase),
                frame_time: self.frame_time,
            });
        }
        Ok(())
    }

    /// 请求阶段占整帧的比例（m·t / T）。
    pub fn request_phase_frac(&self) -> f64 {
        self.minislot.0.saturating_mul(self.request_slots as u64) as f64 / self.frame_time.0 as f64
    }

    /// 单个数据/下行时隙单元占整帧的比例。
    ///
    /// 控制阶段按零时长计，剩余帧时长在 d + b 个单元间均分。
    pub fn unit_frac(&self) -> f64 {
        let rest = 1.0 - self.request_phase_frac();
        rest / (self.data_slots + self.downlink_slots) as f64
    }
}
