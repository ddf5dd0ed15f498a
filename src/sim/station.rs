//! 站点状态机
//!
//! 显式标签变体状态集，由纯转移函数映射（状态, 帧事件）到
//! （新状态, 副作用）。随机抽取由引擎在副作用应用阶段完成，
//! 转移本身可穷举测试。

use crate::config::{BebConfig, WINDOW_GROWTH};

use super::id::StationId;

/// 站点所处阶段。
///
/// 退避计数随 `Backoff` 变体携带；计数归零后经 `Idle` 在下一帧
/// 发起请求。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationPhase {
    /// 有待发分组且计数器已归零，下一帧开始即请求
    Idle,
    /// 退避等待中（计数 > 0）
    Backoff { counter: u64 },
    /// 本帧已在某个请求微时隙发出请求
    Requesting,
    /// 请求无竞争且获得数据时隙单元
    Granted { unit: usize },
    /// 请求微时隙被 ≥2 个站点选中
    Collided,
    /// 请求无竞争但数据时隙耗尽
    NoSlot,
}

/// 帧内依次投喂给状态机的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// 帧开始：计数器递减或发起请求
    FrameStart,
    /// 协调器对本帧请求的裁决
    Outcome(RequestOutcome),
    /// 帧结束：定稿交付/丢弃并开启下一周期
    FrameEnd,
}

/// 协调器裁决。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Granted { unit: usize },
    Collided,
    NoSlot,
}

/// 转移产生的副作用，由引擎执行。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// 在 [0, m) 内均匀抽取请求微时隙
    PickMinislot,
    /// 交付样本，随后按 `window` 抽取新分组的退避计数
    Deliver,
    /// 丢弃样本，随后按 `window` 抽取新分组的退避计数
    Drop,
    /// 退避重试：按（已翻倍的）`window` 抽取退避计数
    Retry,
}

/// 站点状态。饱和假设下始终有待发分组。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationState {
    pub id: StationId,
    pub phase: StationPhase,
    /// 当前竞争窗口
    pub window: u64,
    /// 当前分组的重试计数
    pub retry: u32,
    /// 当前分组的入队帧号
    pub enqueue_frame: u64,
}

impl StationState {
    /// 新建站点；初始退避计数由引擎抽取后写入。
    pub fn new(id: StationId, beb: &BebConfig) -> Self {
        Self {
            id,
            phase: StationPhase::Idle,
            window: beb.min_window,
            retry: 0,
            enqueue_frame: 0,
        }
    }
}

/// 纯转移函数。
///
/// 对引擎不会产生的（状态, 事件）组合恒等返回，保持全函数性。
pub fn step(st: &StationState, ev: FrameEvent, beb: &BebConfig) -> (StationState, Effect) {
    let mut next = *st;
    match (st.phase, ev) {
        (StationPhase::Idle, FrameEvent::FrameStart) => {
            next.phase = StationPhase::Requesting;
            (next, Effect::PickMinislot)
        }
        (StationPhase::Backoff { counter }, FrameEvent::FrameStart) => {
            next.phase = if counter <= 1 {
                StationPhase::Idle
            } else {
                StationPhase::Backoff {
                    counter: counter - 1,
                }
            };
            (next, Effect::None)
        }
        (StationPhase::Requesting, FrameEvent::Outcome(outcome)) => {
            next.phase = match outcome {
                RequestOutcome::Granted { unit } => StationPhase::Granted { unit },
                RequestOutcome::Collided => StationPhase::Collided,
                RequestOutcome::NoSlot => StationPhase::NoSlot,
            };
            (next, Effect::None)
        }
        (StationPhase::Granted { .. }, FrameEvent::FrameEnd) => {
            reset_cycle(&mut next, beb);
            (next, Effect::Deliver)
        }
        (StationPhase::Collided, FrameEvent::FrameEnd)
        | (StationPhase::NoSlot, FrameEvent::FrameEnd) => {
            if st.retry + 1 > beb.drop_cap {
                reset_cycle(&mut next, beb);
                (next, Effect::Drop)
            } else {
                next.retry = st.retry + 1;
                next.window = st
                    .window
                    .saturating_mul(WINDOW_GROWTH)
                    .min(beb.max_window());
                next.phase = StationPhase::Idle;
                (next, Effect::Retry)
            }
        }
        _ => (next, Effect::None),
    }
}

/// 开启新分组周期：窗口与重试归位，阶段待引擎抽取后定。
fn reset_cycle(st: &mut StationState, beb: &BebConfig) {
    st.window = beb.min_window;
    st.retry = 0;
    st.phase = StationPhase::Idle;
}
