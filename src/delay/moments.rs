//! 延迟矩计算
//!
//! 端到端延迟由三个构造上独立的分量组成：成功请求前的退避帧
//! 延迟、帧内到所获数据时隙的延迟、以 R 为界的重试修正。丢弃
//! 分组不计入延迟矩，单独以丢弃概率报告。

use serde::{Deserialize, Serialize};

use crate::config::Scenario;
use crate::solver::SolverResult;

/// 端到端分组延迟的均值与方差（帧单位）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayMoments {
    pub mean: f64,
    pub var: f64,
}

/// 由求解结果计算延迟矩。
///
/// 纯函数：只读取输入，可在参数网格上任意并行映射。
pub fn delay_moments(scenario: &Scenario, result: &SolverResult) -> DelayMoments {
    let (backoff_mean, backoff_var) = backoff_component(scenario, result.p);
    let (within_mean, within_var) = within_frame_component(scenario, result);
    DelayMoments {
        mean: backoff_mean + within_mean,
        var: backoff_var + within_var,
    }
}

/// 网格映射辅助：逐点调用 `delay_moments`。
pub fn delay_moments_grid(points: &[(Scenario, SolverResult)]) -> Vec<DelayMoments> {
    points
        .iter()
        .map(|(sc, res)| delay_moments(sc, res))
        .collect()
}

/// 丢弃概率 p^(R+1)：R+1 次尝试全部失败。
pub fn drop_probability(scenario: &Scenario, result: &SolverResult) -> f64 {
    result.p.powi(scenario.beb.drop_cap as i32 + 1)
}

/// 退避/重试分量。
///
/// 尝试 j（1..R+1）恰好成功的权重 w_j = p^(j-1)(1-p)，在存活
/// （未丢弃）尝试上重归一：耗尽 R 次重试的站点丢弃分组而非
/// 无限等待。第 j 次尝试前累计延迟为各阶段退避抽取加上失败
/// 请求帧本身；交付发生在请求帧内，故末帧不计。
fn backoff_component(scenario: &Scenario, p: f64) -> (f64, f64) {
    let beb = &scenario.beb;
    let attempts = beb.drop_cap + 1;
    let survive = 1.0 - p.powi(attempts as i32);
    if survive <= 0.0 {
        // p = 1：没有分组存活，延迟矩无贡献。
        return (0.0, 0.0);
    }

    let mut weight = (1.0 - p) / survive;
    let mut cum_mean = 0.0_f64;
    let mut cum_var = 0.0_f64;
    let mut mean = 0.0_f64;
    let mut second = 0.0_f64;
    for j in 0..attempts {
        let window = beb.stage_window(j) as f64;
        cum_mean += (window - 1.0) / 2.0 + 1.0;
        cum_var += (window * window - 1.0) / 12.0;
        let e_j = cum_mean - 1.0;
        mean += weight * e_j;
        second += weight * (cum_var + e_j * e_j);
        weight *= p;
    }
    (mean, (second - mean * mean).max(0.0))
}

/// 帧内分量：请求阶段结束后到所获数据时隙单元的偏移（帧比例）。
///
/// 名次在 S+1 个无竞争成功者中均匀分布，获时隙条件下名次截断
/// 于 d−1；按获时隙概率 min(1, d/(s+1)) 加权。
fn within_frame_component(scenario: &Scenario, result: &SolverResult) -> (f64, f64) {
    let d = scenario.frame.data_slots;
    let n = scenario.net.stations;
    let request_frac = scenario.frame.request_phase_frac();
    let unit_frac = scenario.frame.unit_frac();

    let p_s = peer_success_probability(scenario, result);
    let (rank_mean, rank_second) = granted_rank_moments(n - 1, p_s, d);

    // x = a + b·(rank+1)
    let a = request_frac;
    let b = unit_frac;
    let mean = a + b * (rank_mean + 1.0);
    let second = a * a
        + 2.0 * a * b * (rank_mean + 1.0)
        + b * b * (rank_second + 2.0 * rank_mean + 1.0);
    (mean, (second - mean * mean).max(0.0))
}

fn peer_success_probability(scenario: &Scenario, result: &SolverResult) -> f64 {
    let n = scenario.net.stations;
    if n < 2 {
        return 0.0;
    }
    let per_slot = result.tau / scenario.frame.request_slots as f64;
    result.tau * (1.0 - per_slot).powi(n as i32 - 2)
}

/// 获时隙条件下名次的一、二阶矩。
fn granted_rank_moments(peers: usize, p_s: f64, data_slots: usize) -> (f64, f64) {
    if peers == 0 || p_s <= 0.0 {
        return (0.0, 0.0);
    }
    if p_s >= 1.0 {
        // 全部对端必然成功：S = peers。
        let u = peers.min(data_slots - 1) as f64;
        let rank_mean = u / 2.0;
        return (rank_mean, u * (u + 2.0) / 12.0 + rank_mean * rank_mean);
    }

    let mut pmf = (1.0 - p_s).powi(peers as i32);
    let mut grant = 0.0_f64;
    let mut mean = 0.0_f64;
    let mut second = 0.0_f64;
    for s in 0..=peers {
        let winners = (s + 1) as f64;
        let granted = (data_slots as f64 / winners).min(1.0);
        // 名次均匀分布于 {0..u}，u = min(s, d−1)。
        let u = s.min(data_slots - 1) as f64;
        let rank_mean = u / 2.0;
        let rank_second = u * (u + 2.0) / 12.0 + rank_mean * rank_mean;
        grant += pmf * granted;
        mean += pmf * granted * rank_mean;
        second += pmf * granted * rank_second;
        if s < peers {
            pmf *= (peers - s) as f64 / (s + 1) as f64 * p_s / (1.0 - p_s);
        }
    }
    if grant <= 0.0 {
        return (0.0, 0.0);
    }
    (mean / grant, second / grant)
}
