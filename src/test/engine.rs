use crate::config::{BebConfig, ConfigError, FrameConfig, NetworkConfig, Scenario};
use crate::sim::{AllocationPolicy, Engine, EngineOpts, SimTime};

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

fn opts(seed: u64, frames: u64) -> EngineOpts {
    EngineOpts {
        seed,
        frames,
        policy: AllocationPolicy::ArrivalOrder,
    }
}

#[test]
fn invalid_scenario_is_rejected_before_any_state() {
    let sc = scenario(12, 12, 0, 8, 4, 7);
    assert!(matches!(
        Engine::new(&sc, &opts(1, 10)),
        Err(ConfigError::Stations(0))
    ));
}

#[test]
fn identical_seed_reproduces_identical_snapshot() {
    let sc = scenario(12, 12, 20, 8, 4, 7);
    let mut a = Engine::new(&sc, &opts(42, 0)).expect("valid scenario");
    let mut b = Engine::new(&sc, &opts(42, 0)).expect("valid scenario");
    a.run(2000);
    b.run(2000);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn different_seed_changes_the_sample_path() {
    let sc = scenario(12, 12, 20, 8, 4, 7);
    let mut a = Engine::new(&sc, &opts(42, 0)).expect("valid scenario");
    let mut b = Engine::new(&sc, &opts(43, 0)).expect("valid scenario");
    a.run(2000);
    b.run(2000);
    let (sa, sb) = (a.snapshot(), b.snapshot());
    assert!(
        sa.mean_delay != sb.mean_delay || sa.var_delay != sb.var_delay,
        "independent seeds should not share a sample path"
    );
}

#[test]
fn stepwise_run_equals_one_shot_run() {
    let sc = scenario(12, 4, 20, 8, 4, 7);
    let mut split = Engine::new(&sc, &opts(9, 0)).expect("valid scenario");
    split.run(120);
    let partial = split.snapshot();
    assert_eq!(partial.frames_run, 120);
    split.run(80);

    let mut whole = Engine::new(&sc, &opts(9, 0)).expect("valid scenario");
    whole.run(200);

    assert_eq!(split.snapshot(), whole.snapshot());
    assert_eq!(split.frame(), 200);
}

#[test]
fn delivered_plus_dropped_plus_inflight_is_conserved() {
    let sc = scenario(12, 2, 20, 8, 4, 3);
    let mut engine = Engine::new(&sc, &opts(5, 0)).expect("valid scenario");
    engine.run(3000);
    let m = engine.metrics();
    assert!(m.delivered > 0);
    assert!(m.dropped > 0);
    assert_eq!(
        engine.packets_started(),
        m.finalized() + sc.net.stations as u64,
        "one packet in flight per station under saturation"
    );
}

#[test]
fn single_station_never_collides_nor_drops() {
    let sc = scenario(12, 12, 1, 8, 4, 7);
    let mut engine = Engine::new(&sc, &opts(11, 0)).expect("valid scenario");
    engine.run(1000);
    let snap = engine.snapshot();
    assert_eq!(snap.p_c, 0.0);
    assert_eq!(snap.p_d, 0.0);
    assert_eq!(snap.p, 0.0);
    assert_eq!(snap.drop_rate, 0.0);
    assert!(engine.metrics().delivered > 0);
}

#[test]
fn zero_drop_cap_makes_drop_rate_the_single_attempt_failure_rate() {
    // R=0：每个分组恰好一次尝试，丢弃率与逐次失败率是同一比值。
    let sc = scenario(4, 2, 30, 8, 0, 0);
    let mut engine = Engine::new(&sc, &opts(21, 0)).expect("valid scenario");
    engine.run(2000);
    let m = engine.metrics();
    let snap = engine.snapshot();
    assert_eq!(m.attempts, m.finalized());
    assert_eq!(m.dropped, m.collided + m.no_slot);
    assert!((snap.drop_rate - snap.p).abs() < 1e-12);
}

#[test]
fn saturated_stations_attempt_under_both_policies() {
    let sc = scenario(12, 2, 20, 8, 4, 7);
    for policy in [AllocationPolicy::ArrivalOrder, AllocationPolicy::Randomized] {
        let mut engine = Engine::new(
            &sc,
            &EngineOpts {
                seed: 3,
                frames: 0,
                policy,
            },
        )
        .expect("valid scenario");
        engine.run(500);
        let m = engine.metrics();
        assert!(m.attempts > 0);
        assert!(m.no_slot > 0, "d=2 must leave some winners without units");
        assert_eq!(m.frames_run, 500);
    }
}
