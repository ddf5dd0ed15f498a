//! 不动点迭代
//!
//! τ 与平均退避时长相互依赖：p 越大，窗口经翻倍而增长，τ 随之
//! 下降。以 p 为迭代变量做反复代入；检测到不收缩时回退为对
//! h(p) = F(p) − p 在 [0,1] 上的二分（h 严格递减，根唯一）。

use tracing::{debug, info, trace};

use super::result::SolverResult;
use crate::config::{ConfigError, Scenario};

/// 求解器数值选项。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// 收敛容差（|Δp| 判据）
    pub tolerance: f64,
    /// 总迭代上限（代入与二分合计）
    pub max_iterations: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 200,
        }
    }
}

// 反复代入每 CONTRACTION_WINDOW 次检查一次 |Δp| 是否至少减半，
// 否则判定振荡/发散并切换到二分。
const CONTRACTION_WINDOW: u32 = 16;

/// 一步代入映射 F(p) 的完整输出。
#[derive(Debug, Clone, Copy)]
struct Response {
    tau: f64,
    p_c: f64,
    p_d: f64,
    p_next: f64,
}

/// 求解稳态不动点。
///
/// 仅在配置无效时失败；达到迭代上限未收敛则返回
/// `converged = false` 的最优估计。
#[tracing::instrument(skip(scenario, opts), fields(stations = scenario.net.stations))]
pub fn solve(scenario: &Scenario, opts: &SolverOptions) -> Result<SolverResult, ConfigError> {
    scenario.validate()?;
    info!("▶️  开始不动点求解");

    let mut p = 0.0_f64;
    let mut best = respond(scenario, p);
    let mut iterations = 0_u32;
    let mut window_delta = f64::INFINITY;

    while iterations < opts.max_iterations {
        let resp = respond(scenario, p);
        iterations += 1;
        let delta = (resp.p_next - p).abs();
        trace!(iteration = iterations, p, p_next = resp.p_next, delta, "代入迭代");
        best = resp;
        if delta < opts.tolerance {
            info!(iterations, p = resp.p_next, "✅ 反复代入收敛");
            return Ok(finish(resp, true, iterations));
        }
        p = resp.p_next;

        if iterations % CONTRACTION_WINDOW == 0 {
            if delta > window_delta * 0.5 {
                debug!(iterations, delta, window_delta, "⚠️ 代入不收缩，切换二分");
                return Ok(bisect(scenario, opts, iterations));
            }
            window_delta = delta;
        }
    }

    debug!(iterations, "达到迭代上限，返回最优估计");
    Ok(finish(best, false, iterations))
}

/// 二分求 h(p) = F(p) − p 的唯一根。
fn bisect(scenario: &Scenario, opts: &SolverOptions, used: u32) -> SolverResult {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    let mut iterations = used;
    let mut resp = respond(scenario, 0.5 * (lo + hi));

    while iterations < opts.max_iterations {
        let mid = 0.5 * (lo + hi);
        resp = respond(scenario, mid);
        iterations += 1;
        let h = resp.p_next - mid;
        trace!(iteration = iterations, lo, hi, mid, h, "二分迭代");
        if h > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < opts.tolerance {
            info!(iterations, p = resp.p_next, "✅ 二分收敛");
            return finish(resp, true, iterations);
        }
    }

    finish(resp, false, iterations)
}

fn finish(resp: Response, converged: bool, iterations: u32) -> SolverResult {
    SolverResult {
        tau: resp.tau,
        p_c: resp.p_c,
        p_d: resp.p_d,
        p: resp.p_next,
        converged,
        iterations,
    }
}

/// 给定 p 计算 τ、p_c、p_d 与下一个 p。
fn respond(scenario: &Scenario, p: f64) -> Response {
    let beb = &scenario.beb;
    let n = scenario.net.stations;
    let m = scenario.frame.request_slots as f64;
    let d = scenario.frame.data_slots;

    // 阶段访问频率 ν_j ∝ p^j（j = 0..R，截断归一）。
    let stages = beb.drop_cap + 1;
    let mut weight = 1.0_f64;
    let mut norm = 0.0_f64;
    let mut b_avg = 0.0_f64;
    for j in 0..stages {
        let mean = (beb.stage_window(j) - 1) as f64 / 2.0;
        b_avg += weight * mean;
        norm += weight;
        weight *= p;
    }
    b_avg /= norm;

    let tau = 1.0 / (b_avg + 1.0);
    let per_slot = tau / m;
    let p_c = 1.0 - (1.0 - per_slot).powi(n as i32 - 1);

    // 其余站点逐个的本帧成功概率；成功数 S ~ Binomial(N-1, p_s)。
    let p_s = if n >= 2 {
        tau * (1.0 - per_slot).powi(n as i32 - 2)
    } else {
        0.0
    };
    let p_d = shortage_probability(n - 1, p_s, d);

    let p_next = 1.0 - (1.0 - p_c) * (1.0 - p_d);
    Response {
        tau,
        p_c,
        p_d,
        p_next,
    }
}

/// p_d = E[max(0, S+1−d) / (S+1)]：在 S+1 个无竞争成功者中名次
/// 均匀分布，排到 d 之外即短缺。
fn shortage_probability(peers: usize, p_s: f64, data_slots: usize) -> f64 {
    if peers < data_slots {
        // 成功者总数至多 peers+1 ≤ d，不可能短缺。
        return 0.0;
    }
    if p_s <= 0.0 {
        return 0.0;
    }
    if p_s >= 1.0 {
        let s = peers as f64;
        return (s + 1.0 - data_slots as f64).max(0.0) / (s + 1.0);
    }

    // 二项分布 pmf 递推，避免大 N 下组合数溢出。
    let mut pmf = (1.0 - p_s).powi(peers as i32);
    let mut acc = 0.0_f64;
    for k in 0..=peers {
        let winners = (k + 1) as f64;
        let beyond = (winners - data_slots as f64).max(0.0);
        acc += pmf * beyond / winners;
        if k < peers {
            pmf *= (peers - k) as f64 / (k + 1) as f64 * p_s / (1.0 - p_s);
        }
    }
    acc.clamp(0.0, 1.0)
}
