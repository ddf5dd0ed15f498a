//! 标识符类型
//!
//! 定义站点的唯一标识符。

/// 站点标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);
