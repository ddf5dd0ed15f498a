//! 指标统计模块
//!
//! 消费引擎产生的分组样本与逐帧计数，在线归并为与解析结果
//! 可比的摘要统计。

// 子模块声明
mod aggregator;
mod online;
mod sample;
mod snapshot;

// 重新导出公共接口
pub use aggregator::{FrameTally, MetricsAggregator};
pub use online::OnlineMoments;
pub use sample::{PacketSample, SampleOutcome};
pub use snapshot::MetricsSnapshot;
