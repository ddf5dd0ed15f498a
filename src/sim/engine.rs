//! 离散事件引擎
//!
//! 以固定帧步推进时间：每帧依次经历请求、全双工数据、控制、
//! 下行四个阶段。单线程协同调度，一个全局帧时钟同步驱动全部
//! 站点与协调器转移；站点只观察裁决后的结果，帧内互不可见。
//! 每次构建都是独立运行，没有引擎级全局状态。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::{ConfigError, Scenario};
use crate::metrics::{FrameTally, MetricsAggregator, MetricsSnapshot, PacketSample, SampleOutcome};

use super::coordinator::{AllocationPolicy, CoordinatorState};
use super::id::StationId;
use super::station::{self, Effect, FrameEvent, StationPhase, StationState};

/// 引擎运行选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOpts {
    /// 随机源种子；相同（配置, 种子）必须复现相同事件序列
    pub seed: u64,
    /// 运行帧数
    pub frames: u64,
    pub policy: AllocationPolicy,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            seed: 0,
            frames: 10_000,
            policy: AllocationPolicy::ArrivalOrder,
        }
    }
}

/// 帧步仿真引擎。
///
/// 每次调用 `step` 恰好推进一帧；帧边界之间取消运行得到的
/// 聚合器对已完成帧始终有效。
pub struct Engine {
    scenario: Scenario,
    policy: AllocationPolicy,
    rng: StdRng,
    stations: Vec<StationState>,
    agg: MetricsAggregator,
    frame: u64,
    /// 已开启的分组周期总数（含在途）
    packets_started: u64,
}

impl Engine {
    /// 校验配置并构建全新引擎状态。
    pub fn new(scenario: &Scenario, opts: &EngineOpts) -> Result<Engine, ConfigError> {
        scenario.validate()?;
        let mut rng = StdRng::seed_from_u64(opts.seed);
        let beb = scenario.beb;
        let mut stations = Vec::with_capacity(scenario.net.stations);
        for i in 0..scenario.net.stations {
            let mut st = StationState::new(StationId(i), &beb);
            let counter = rng.gen_range(0..st.window);
            if counter > 0 {
                st.phase = StationPhase::Backoff { counter };
            }
            stations.push(st);
        }
        let packets_started = stations.len() as u64;
        Ok(Engine {
            scenario: *scenario,
            policy: opts.policy,
            rng,
            stations,
            agg: MetricsAggregator::default(),
            frame: 0,
            packets_started,
        })
    }

    /// 当前帧号。
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn metrics(&self) -> &MetricsAggregator {
        &self.agg
    }

    /// 已开启的分组周期总数。
    pub fn packets_started(&self) -> u64 {
        self.packets_started
    }

    /// 推进一帧：请求登记 → 协调器裁决 → 结果应用。
    pub fn step(&mut self) {
        let beb = self.scenario.beb;
        let request_slots = self.scenario.frame.request_slots;
        let mut coord =
            CoordinatorState::new(request_slots, self.scenario.frame.data_slots);

        // 请求阶段：计数器归零的站点各自均匀抽取一个微时隙。
        for st in &mut self.stations {
            let (next, effect) = station::step(st, FrameEvent::FrameStart, &beb);
            *st = next;
            if let Effect::PickMinislot = effect {
                let slot = self.rng.gen_range(0..request_slots);
                trace!(id = ?st.id, slot, "站点发起请求");
                coord.register(slot, st.id);
            }
        }

        let attempts = coord.attempts() as u64;
        let outcomes = coord.resolve(self.policy, &mut self.rng);

        let mut tally = FrameTally {
            attempts,
            ..FrameTally::default()
        };

        // 数据/下行阶段的可观测后果：逐站点应用裁决并定稿样本。
        for (id, outcome) in outcomes {
            match outcome {
                station::RequestOutcome::Collided => tally.collided += 1,
                station::RequestOutcome::Granted { .. } => tally.uncontested += 1,
                station::RequestOutcome::NoSlot => {
                    tally.uncontested += 1;
                    tally.no_slot += 1;
                }
            }

            let st = &mut self.stations[id.0];
            let (marked, _) = station::step(st, FrameEvent::Outcome(outcome), &beb);
            *st = marked;
            let (next, effect) = station::step(st, FrameEvent::FrameEnd, &beb);
            *st = next;

            match effect {
                Effect::Deliver => {
                    let sample = PacketSample {
                        enqueue_frame: st.enqueue_frame,
                        dequeue_frame: self.frame,
                        outcome: SampleOutcome::Delivered,
                    };
                    debug!(id = ?st.id, delay = sample.delay_frames(), "📦 分组交付");
                    self.agg.record(sample);
                    self.begin_cycle(id.0);
                }
                Effect::Drop => {
                    let sample = PacketSample {
                        enqueue_frame: st.enqueue_frame,
                        dequeue_frame: self.frame,
                        outcome: SampleOutcome::Dropped,
                    };
                    debug!(id = ?st.id, "🗑️ 重试耗尽，分组丢弃");
                    self.agg.record(sample);
                    self.begin_cycle(id.0);
                }
                Effect::Retry => {
                    let st = &mut self.stations[id.0];
                    let counter = self.rng.gen_range(0..st.window);
                    if counter > 0 {
                        st.phase = StationPhase::Backoff { counter };
                    }
                    trace!(id = ?st.id, retry = st.retry, window = st.window, counter, "退避重试");
                }
                Effect::None | Effect::PickMinislot => {}
            }
        }

        self.agg.on_frame(tally);
        self.frame += 1;
    }

    /// 饱和假设：定稿后立即开启新分组周期并抽取阶段 0 退避。
    fn begin_cycle(&mut self, idx: usize) {
        let st = &mut self.stations[idx];
        st.enqueue_frame = self.frame + 1;
        let counter = self.rng.gen_range(0..st.window);
        if counter > 0 {
            st.phase = StationPhase::Backoff { counter };
        }
        self.packets_started += 1;
    }

    /// 连续推进若干帧。
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self, frames: u64) {
        info!(frames, stations = self.stations.len(), "▶️  开始仿真运行");
        for _ in 0..frames {
            self.step();
        }
        info!(
            frames_run = self.agg.frames_run,
            delivered = self.agg.delivered,
            dropped = self.agg.dropped,
            "✅ 仿真运行完成"
        );
    }

    /// 当前聚合结果的快照。
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.agg.snapshot()
    }
}
