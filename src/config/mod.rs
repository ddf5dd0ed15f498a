//! 参数模型模块
//!
//! 定义帧结构、二进制指数退避（BEB）与网络规模的不可变配置，
//! 以及配置校验的错误类型。

// 子模块声明
mod beb;
mod error;
mod frame;
mod network;
mod scenario;

// 重新导出公共接口
pub use beb::{BebConfig, WINDOW_GROWTH};
pub use error::ConfigError;
pub use frame::FrameConfig;
pub use network::NetworkConfig;
pub use scenario::Scenario;
