//! 指标聚合器
//!
//! 接收逐帧计数与定稿样本，产出 §6 交换形状的快照。

use tracing::trace;

use super::online::OnlineMoments;
use super::sample::{PacketSample, SampleOutcome};
use super::snapshot::MetricsSnapshot;

/// 单帧请求阶段的裁决计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTally {
    /// 本帧请求尝试总数
    pub attempts: u64,
    /// 碰撞的尝试数
    pub collided: u64,
    /// 无竞争的成功请求数（含未拿到数据时隙者）
    pub uncontested: u64,
    /// 成功请求中未获数据时隙单元的数量
    pub no_slot: u64,
}

/// 运行期指标聚合器。
///
/// 所有计数在线累加，不保留原始样本。
#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    pub attempts: u64,
    pub collided: u64,
    pub uncontested: u64,
    pub no_slot: u64,
    pub delivered: u64,
    pub dropped: u64,
    pub frames_run: u64,
    delay: OnlineMoments,
}

impl MetricsAggregator {
    /// 累加一帧的裁决计数。
    pub fn on_frame(&mut self, tally: FrameTally) {
        self.attempts += tally.attempts;
        self.collided += tally.collided;
        self.uncontested += tally.uncontested;
        self.no_slot += tally.no_slot;
        self.frames_run += 1;
    }

    /// 接收一个定稿样本；交付样本进入延迟矩估计。
    pub fn record(&mut self, sample: PacketSample) {
        trace!(?sample, "记录定稿样本");
        match sample.outcome {
            SampleOutcome::Delivered => {
                self.delivered += 1;
                self.delay.push(sample.delay_frames() as f64);
            }
            SampleOutcome::Dropped => {
                self.dropped += 1;
            }
        }
    }

    /// 定稿分组总数。
    pub fn finalized(&self) -> u64 {
        self.delivered + self.dropped
    }

    pub fn delay_moments(&self) -> &OnlineMoments {
        &self.delay
    }

    /// 归并为交换形状的快照。空计数一律得 0，不产生 NaN。
    pub fn snapshot(&self) -> MetricsSnapshot {
        let ratio = |num: u64, den: u64| if den == 0 { 0.0 } else { num as f64 / den as f64 };
        MetricsSnapshot {
            p: ratio(self.collided + self.no_slot, self.attempts),
            p_c: ratio(self.collided, self.attempts),
            p_d: ratio(self.no_slot, self.uncontested),
            mean_delay: self.delay.mean(),
            var_delay: self.delay.variance(),
            drop_rate: ratio(self.dropped, self.finalized()),
            frames_run: self.frames_run,
        }
    }
}
