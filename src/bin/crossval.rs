use clap::Parser;
use serde::Serialize;
use tdmasim_rs::api;
use tdmasim_rs::config::{BebConfig, FrameConfig, NetworkConfig, Scenario};
use tdmasim_rs::delay::{DelayMoments, drop_probability};
use tdmasim_rs::metrics::MetricsSnapshot;
use tdmasim_rs::sim::{EngineOpts, SimTime, parse_policy};
use tdmasim_rs::solver::{SolverOptions, SolverResult};

#[derive(Debug, Parser)]
#[command(
    name = "crossval",
    about = "Cross-validate the analytical fixed point against one simulation run"
)]
struct Args {
    /// Request mini-slots per frame (m)
    #[arg(long, default_value_t = 12)]
    request_slots: usize,

    /// Full-duplex data slot units per frame (d)
    #[arg(long, default_value_t = 12)]
    data_slots: usize,

    /// Downlink slots per frame (b)
    #[arg(long, default_value_t = 12)]
    downlink_slots: usize,

    /// Request mini-slot duration in microseconds (t)
    #[arg(long, default_value_t = 10)]
    minislot_us: u64,

    /// Frame duration in microseconds (T)
    #[arg(long, default_value_t = 2000)]
    frame_us: u64,

    /// Contending stations (N)
    #[arg(long, default_value_t = 20)]
    stations: usize,

    /// Minimum contention window (W)
    #[arg(long, default_value_t = 8)]
    min_window: u64,

    /// Window growth cap (r)
    #[arg(long, default_value_t = 4)]
    growth_cap: u32,

    /// Retry drop cap (R)
    #[arg(long, default_value_t = 7)]
    drop_cap: u32,

    /// Random source seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Frames to simulate
    #[arg(long, default_value_t = 5000)]
    frames: u64,

    /// Data slot allocation order: arrival_order or randomized
    #[arg(long)]
    policy: Option<String>,

    /// Relative tolerance on p for the verdict
    #[arg(long, default_value_t = 0.05)]
    rel_tolerance: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    scenario: Scenario,
    analytic: SolverResult,
    delay: DelayMoments,
    drop_probability: f64,
    empirical: MetricsSnapshot,
    rel_err_p: f64,
    rel_err_p_c: f64,
    within_tolerance: bool,
}

fn rel_err(empirical: f64, analytic: f64) -> f64 {
    if analytic == 0.0 {
        empirical.abs()
    } else {
        (empirical - analytic).abs() / analytic
    }
}

fn scenario_from(args: &Args) -> Scenario {
    Scenario {
        frame: FrameConfig {
            request_slots: args.request_slots,
            data_slots: args.data_slots,
            downlink_slots: args.downlink_slots,
            minislot: SimTime::from_micros(args.minislot_us),
            frame_time: SimTime::from_micros(args.frame_us),
        },
        beb: BebConfig {
            min_window: args.min_window,
            growth_cap: args.growth_cap,
            drop_cap: args.drop_cap,
        },
        net: NetworkConfig {
            stations: args.stations,
        },
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let scenario = scenario_from(&args);

    let analytic = match api::solve(&scenario, &SolverOptions::default()) {
        Ok(res) => res,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };
    let snapshot = api::simulate(
        &scenario,
        &EngineOpts {
            seed: args.seed,
            frames: args.frames,
            policy: parse_policy(args.policy.as_deref()),
        },
    )
    .expect("scenario already validated by solve");

    let rel_err_p = rel_err(snapshot.p, analytic.p);
    let report = Report {
        scenario,
        analytic,
        delay: api::delay_moments(&scenario, &analytic),
        drop_probability: drop_probability(&scenario, &analytic),
        empirical: snapshot,
        rel_err_p,
        rel_err_p_c: rel_err(snapshot.p_c, analytic.p_c),
        within_tolerance: rel_err_p <= args.rel_tolerance,
    };

    let json = serde_json::to_string_pretty(&report).expect("serialize report");
    println!("{json}");

    if !report.within_tolerance {
        std::process::exit(1);
    }
}
