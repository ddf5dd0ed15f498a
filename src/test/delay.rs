use crate::config::{BebConfig, FrameConfig, NetworkConfig, Scenario};
use crate::delay::{delay_moments, delay_moments_grid, drop_probability};
use crate::sim::SimTime;
use crate::solver::{SolverOptions, SolverResult, solve};

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
fn moments_are_nonnegative_across_grid() {
    for n in [1, 2, 10, 30] {
        for d in [1, 4, 12] {
            for w in [1, 8, 64] {
                let sc = scenario(12, d, n, w, 4, 7);
                let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
                let dm = delay_moments(&sc, &res);
                assert!(dm.mean >= 0.0 && dm.mean.is_finite(), "mean {:?}", dm);
                assert!(dm.var >= 0.0 && dm.var.is_finite(), "var {:?}", dm);
            }
        }
    }
}

#[test]
fn uncontended_station_delay_is_backoff_only() {
    // N=1、R=0：恰好一次尝试，退避均值 (W-1)/2，帧内偏移可由
    // 帧结构直接算出。
    let sc = scenario(12, 12, 1, 8, 0, 0);
    let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
    assert_eq!(res.p, 0.0);
    let dm = delay_moments(&sc, &res);

    let within = sc.frame.request_phase_frac() + sc.frame.unit_frac();
    assert!((dm.mean - (3.5 + within)).abs() < 1e-12);
    assert!((dm.var - 63.0 / 12.0).abs() < 1e-9);
}

#[test]
fn single_attempt_drop_probability_equals_failure_probability() {
    let sc = scenario(4, 2, 30, 8, 0, 0);
    let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
    assert!(res.p > 0.5);
    assert_eq!(drop_probability(&sc, &res), res.p);
}

#[test]
fn drop_probability_shrinks_with_retry_budget() {
    let res = SolverResult {
        tau: 0.2,
        p_c: 0.5,
        p_d: 0.0,
        p: 0.5,
        converged: true,
        iterations: 1,
    };
    let mut prev = 1.0;
    for cap in [0, 1, 3, 7] {
        let sc = scenario(12, 12, 20, 8, 0, cap);
        let dp = drop_probability(&sc, &res);
        assert!(dp < prev, "drop probability must shrink: cap={cap} gave {dp}");
        prev = dp;
    }
}

#[test]
fn grid_helper_matches_pointwise_calls() {
    let points: Vec<_> = [2usize, 10, 30]
        .iter()
        .map(|&n| {
            let sc = scenario(12, 4, n, 8, 4, 7);
            let res = solve(&sc, &SolverOptions::default()).expect("valid scenario");
            (sc, res)
        })
        .collect();
    let grid = delay_moments_grid(&points);
    assert_eq!(grid.len(), points.len());
    for ((sc, res), dm) in points.iter().zip(&grid) {
        assert_eq!(*dm, delay_moments(sc, res));
    }
}

#[test]
fn heavier_contention_increases_mean_delay() {
    let light = scenario(12, 12, 4, 8, 4, 7);
    let heavy = scenario(12, 12, 32, 8, 4, 7);
    let opts = SolverOptions::default();
    let light_dm = delay_moments(&light, &solve(&light, &opts).expect("valid"));
    let heavy_dm = delay_moments(&heavy, &solve(&heavy, &opts).expect("valid"));
    assert!(heavy_dm.mean > light_dm.mean);
}
