//! 指标快照
//!
//! 对外报告/导出协作方消费的交换形状。

use serde::{Deserialize, Serialize};

/// 一次仿真运行的摘要统计。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// 总失败概率（碰撞或无数据时隙）
    pub p: f64,
    /// 请求碰撞概率
    pub p_c: f64,
    /// 数据时隙短缺概率
    pub p_d: f64,
    /// 已交付分组的平均延迟（帧）
    pub mean_delay: f64,
    /// 已交付分组的延迟方差（帧²）
    pub var_delay: f64,
    /// 丢弃率（丢弃 ÷ 定稿分组数）
    pub drop_rate: f64,
    /// 实际运行帧数
    pub frames_run: u64,
}
