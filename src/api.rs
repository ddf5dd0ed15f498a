//! 核心操作面
//!
//! 对外协作方（配置加载、报告导出）只消费这里的四个操作；
//! 文件格式与命令行解析都在 `src/bin` 协作方中，不属于核心。

use crate::config::{ConfigError, Scenario};
use crate::delay::{self, DelayMoments};
use crate::metrics::MetricsSnapshot;
use crate::sim::{Engine, EngineOpts};
use crate::solver::{self, SolverOptions, SolverResult};

/// 求解稳态不动点；仅在配置无效时失败。
pub fn solve(scenario: &Scenario, opts: &SolverOptions) -> Result<SolverResult, ConfigError> {
    solver::solve(scenario, opts)
}

/// 由求解结果闭式计算延迟矩。
pub fn delay_moments(scenario: &Scenario, result: &SolverResult) -> DelayMoments {
    delay::delay_moments(scenario, result)
}

/// 运行一次独立仿真并返回摘要快照。
pub fn simulate(scenario: &Scenario, opts: &EngineOpts) -> Result<MetricsSnapshot, ConfigError> {
    let mut engine = Engine::new(scenario, opts)?;
    engine.run(opts.frames);
    Ok(engine.snapshot())
}

/// 参数网格批量求解。各点零共享状态，并行化由调用方决定。
pub fn solve_grid(
    scenarios: &[Scenario],
    opts: &SolverOptions,
) -> Vec<Result<SolverResult, ConfigError>> {
    scenarios.iter().map(|sc| solve(sc, opts)).collect()
}
