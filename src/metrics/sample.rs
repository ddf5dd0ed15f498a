//! 分组样本
//!
//! 在首次请求尝试时创建，在交付或丢弃时定稿，随后交给聚合器。

/// 分组的最终去向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    Delivered,
    Dropped,
}

/// 单个分组的生命周期样本。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketSample {
    /// 入队帧号
    pub enqueue_frame: u64,
    /// 定稿（交付或丢弃）帧号
    pub dequeue_frame: u64,
    pub outcome: SampleOutcome,
}

impl PacketSample {
    /// 端到端延迟（帧数）。
    pub fn delay_frames(&self) -> u64 {
        self.dequeue_frame.saturating_sub(self.enqueue_frame)
    }
}
