//! 延迟分析模块
//!
//! 由求解结果闭式计算端到端延迟的均值与方差。

// 子模块声明
mod moments;

// 重新导出公共接口
pub use moments::{DelayMoments, delay_moments, delay_moments_grid, drop_probability};
