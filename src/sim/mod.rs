//! 仿真核心模块
//!
//! 此模块包含帧步离散事件引擎的核心组件：站点状态机、帧协调
//! 器、引擎与仿真时间。

// 子模块声明
mod coordinator;
mod engine;
mod id;
mod station;
mod time;

// 重新导出公共接口
pub use coordinator::{AllocationPolicy, CoordinatorState, parse_policy};
pub use engine::{Engine, EngineOpts};
pub use id::StationId;
pub use station::{Effect, FrameEvent, RequestOutcome, StationPhase, StationState, step};
pub use time::SimTime;
