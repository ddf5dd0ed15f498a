//! 帧协调器
//!
//! 每帧新建一个协调器状态值，收集请求阶段的微时隙选择并做
//! 碰撞裁决与数据时隙分配；帧结束即丢弃，绝不跨帧保留。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::id::StationId;
use super::station::RequestOutcome;

/// 稀缺数据时隙在同帧无竞争成功者间的分配顺序。
///
/// 显式配置项，不做隐藏常量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// 按到达顺序（微时隙序号升序）分配
    ArrivalOrder,
    /// 在引擎随机源下随机洗牌后分配
    Randomized,
}

/// 单帧协调器簿记。
#[derive(Debug)]
pub struct CoordinatorState {
    /// 各请求微时隙收到的站点选择
    request_bitmap: Vec<Vec<StationId>>,
    /// 数据时隙单元 → 获配站点
    pub data_slot_map: Vec<Option<StationId>>,
    /// 下行阶段依次通告的获配站点
    pub downlink_schedule: Vec<StationId>,
}

impl CoordinatorState {
    /// 为新的一帧构建空簿记。
    pub fn new(request_slots: usize, data_slots: usize) -> Self {
        Self {
            request_bitmap: vec![Vec::new(); request_slots],
            data_slot_map: vec![None; data_slots],
            downlink_schedule: Vec::new(),
        }
    }

    /// 登记一个站点对请求微时隙的选择。
    pub fn register(&mut self, slot: usize, id: StationId) {
        self.request_bitmap[slot].push(id);
    }

    /// 本帧请求尝试总数。
    pub fn attempts(&self) -> usize {
        self.request_bitmap.iter().map(Vec::len).sum()
    }

    /// 裁决本帧：同一微时隙被 ≥2 站点选中则全部判碰撞；无竞争
    /// 成功者按分配策略排序后依次获配数据时隙单元，超出部分判
    /// 无时隙。返回按站点的裁决列表。
    pub fn resolve(
        &mut self,
        policy: AllocationPolicy,
        rng: &mut StdRng,
    ) -> Vec<(StationId, RequestOutcome)> {
        let mut outcomes = Vec::new();
        let mut winners = Vec::new();
        for (slot, picks) in self.request_bitmap.iter().enumerate() {
            match picks.as_slice() {
                [] => {}
                [only] => winners.push((slot, *only)),
                contenders => {
                    for id in contenders {
                        outcomes.push((*id, RequestOutcome::Collided));
                    }
                }
            }
        }

        if let AllocationPolicy::Randomized = policy {
            winners.shuffle(rng);
        }

        let data_slots = self.data_slot_map.len();
        for (rank, (slot, id)) in winners.into_iter().enumerate() {
            if rank < data_slots {
                self.data_slot_map[rank] = Some(id);
                self.downlink_schedule.push(id);
                trace!(?id, slot, unit = rank, "获配数据时隙单元");
                outcomes.push((id, RequestOutcome::Granted { unit: rank }));
            } else {
                trace!(?id, slot, "数据时隙耗尽");
                outcomes.push((id, RequestOutcome::NoSlot));
            }
        }
        outcomes
    }
}

/// 从命令行风格的字符串解析分配策略。
pub fn parse_policy(raw: Option<&str>) -> AllocationPolicy {
    match raw {
        Some("randomized") => AllocationPolicy::Randomized,
        _ => AllocationPolicy::ArrivalOrder,
    }
}
