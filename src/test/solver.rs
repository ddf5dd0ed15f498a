use crate::config::{BebConfig, ConfigError, FrameConfig, NetworkConfig, Scenario};
use crate::sim::SimTime;
use crate::solver::{SolverOptions, solve};

fn scenario(m: usize, d: usize, n: usize, w: u64, r: u32, cap: u32) -> Scenario {
    Scenario {
        frame: FrameConfig {
            request_slots: m,
            data_slots: d,
            downlink_slots: 12,
            minislot: SimTime::from_micros(10),
            frame_time: SimTime::from_millis(2),
        },
        beb: BebConfig {
            min_window: w,
            growth_cap: r,
            drop_cap: cap,
        },
        net: NetworkConfig { stations: n },
    }
}

#[test]
fn zero_station_count_is_rejected() {
    let sc = scenario(12, 12, 0, 8, 4, 7);
    assert_eq!(
        solve(&sc, &SolverOptions::default()),
        Err(ConfigError::Stations(0))
    );
}

#[test]
fn growth_cap_above_drop_cap_is_rejected() {
    let sc = scenario(12, 12, 20, 8, 5, 3);
    assert_eq!(
        solve(&sc, &SolverOptions::default()),
        Err(ConfigError::GrowthExceedsDrop {
            growth_cap: 5,
            drop_cap: 3,
        })
    );
}

#[test]
fn zero_minislot_is_rejected() {
    let mut sc = scenario(12, 12, 20, 8, 4, 7);
    sc.frame.minislot = SimTime::ZERO;
    assert_eq!(
        solve(&sc, &SolverOptions::default()),
        Err(ConfigError::Minislot(SimTime::ZERO))
    );
}

#[test]
fn request_phase_must_fit_inside_frame() {
    let mut sc = scenario(12, 12, 20, 8, 4, 7);
    sc.frame.frame_time = SimTime::from_micros(100);
    assert!(matches!(
        solve(&sc, &SolverOptions::default()),
        Err(ConfigError::RequestPhaseTooLong { .. })
    ));
}

#[test]
fn reference_scenario_converges() {
    let sc = scenario(12, 12, 20, 8, 4, 7);
    let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
    assert!(res.converged);
    assert!(res.iterations < SolverOptions::default().max_iterations);
    assert!(res.p > 0.0 && res.p < 1.0);
    assert!(res.tau > 0.0 && res.tau < 1.0);
    assert!(res.p_c > 0.0 && res.p_c < 1.0);
    assert!(res.p_d >= 0.0 && res.p_d < 1.0);
}

#[test]
fn single_station_never_collides() {
    let sc = scenario(12, 12, 1, 8, 4, 7);
    let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
    assert_eq!(res.p_c, 0.0);
    assert_eq!(res.p_d, 0.0);
    assert_eq!(res.p, 0.0);
    assert!(res.converged);
}

#[test]
fn collision_probability_monotone_in_station_count() {
    let mut prev = 0.0;
    for n in [2, 5, 10, 20, 40] {
        let sc = scenario(12, 12, n, 8, 4, 7);
        let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
        assert!(
            res.p_c >= prev,
            "p_c must not decrease with N: N={n} gave {} after {prev}",
            res.p_c
        );
        prev = res.p_c;
    }
}

#[test]
fn low_load_failure_probabilities_vanish() {
    let sc = scenario(48, 48, 2, 16, 4, 7);
    let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
    assert!(res.p_c < 0.01);
    assert_eq!(res.p_d, 0.0);
    assert!(res.p < 0.01);
}

#[test]
fn slot_shortage_regime_reports_pressure() {
    let sc = scenario(12, 2, 20, 8, 4, 7);
    let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
    assert!(res.p_d > 0.1);
    assert!(res.p > res.p_c);
}

#[test]
fn cap_without_convergence_is_not_an_error() {
    let sc = scenario(12, 12, 20, 8, 4, 7);
    let opts = SolverOptions {
        tolerance: 0.0,
        max_iterations: 50,
    };
    let res = solve(&sc, &opts).expect("valid scenario");
    assert!(!res.converged);
    assert_eq!(res.iterations, 50);
    assert!(res.p >= 0.0 && res.p <= 1.0);
}

#[test]
fn grid_solve_matches_pointwise_solve() {
    let scenarios: Vec<_> = [2, 10, 40].iter().map(|&n| scenario(12, 4, n, 8, 4, 7)).collect();
    let opts = SolverOptions::default();
    let grid = crate::api::solve_grid(&scenarios, &opts);
    assert_eq!(grid.len(), scenarios.len());
    for (sc, res) in scenarios.iter().zip(&grid) {
        assert_eq!(*res, solve(sc, &opts));
    }
}

#[test]
fn probabilities_stay_in_unit_interval_across_grid() {
    for n in [1, 3, 10, 30] {
        for d in [1, 4, 12] {
            for w in [1, 8, 64] {
                let sc = scenario(12, d, n, w, 4, 7);
                let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
                for x in [res.tau, res.p_c, res.p_d, res.p] {
                    assert!((0.0..=1.0).contains(&x), "out of range: {x}");
                    assert!(x.is_finite());
                }
            }
        }
    }
}
