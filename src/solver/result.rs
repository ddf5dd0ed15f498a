//! 求解结果
//!
//! 每个（帧结构, BEB, 网络）三元组产出一个不可变结果值。
//! 未收敛不是错误：`converged` 标志留给调用方裁断。

use serde::{Deserialize, Serialize};

/// 不动点求解的稳态输出。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// 每帧尝试概率 τ
    pub tau: f64,
    /// 请求碰撞概率
    pub p_c: f64,
    /// 数据时隙短缺概率
    pub p_d: f64,
    /// 总失败概率 p = 1-(1-p_c)(1-p_d)
    pub p: f64,
    /// 是否在容差内收敛
    pub converged: bool,
    /// 实际迭代次数
    pub iterations: u32,
}
