//! 不动点求解模块
//!
//! 以反复代入（必要时二分回退）求解稳态尝试概率与失败概率。

// 子模块声明
mod fixed_point;
mod result;

// 重新导出公共接口
pub use fixed_point::{SolverOptions, solve};
pub use result::SolverResult;
