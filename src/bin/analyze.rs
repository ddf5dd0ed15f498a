use clap::Parser;
use serde::Serialize;
use tdmasim_rs::api;
use tdmasim_rs::config::{BebConfig, FrameConfig, NetworkConfig, Scenario};
use tdmasim_rs::delay::{DelayMoments, drop_probability};
use tdmasim_rs::sim::SimTime;
use tdmasim_rs::solver::{SolverOptions, SolverResult};

#[derive(Debug, Parser)]
#[command(
    name = "analyze",
    about = "Solve the steady-state fixed point and delay moments for one scenario"
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

    /// Fixed-point convergence tolerance
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,

    /// Fixed-point iteration cap
    #[arg(long, default_value_t = 200)]
    max_iterations: u32,
}

#[derive(Debug, Serialize)]
struct Report {
    scenario: Scenario,
    solver: SolverResult,
    delay: DelayMoments,
    drop_probability: f64,
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
    let opts = SolverOptions {
        tolerance: args.tolerance,
        max_iterations: args.max_iterations,
    };

    let solver = match api::solve(&scenario, &opts) {
        Ok(res) => res,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };
    if !solver.converged {
        eprintln!(
            "warning: fixed point did not converge within {} iterations",
            solver.iterations
        );
    }

    let report = Report {
        scenario,
        solver,
        delay: api::delay_moments(&scenario, &solver),
        drop_probability: drop_probability(&scenario, &solver),
    };
    let json = serde_json::to_string_pretty(&report).expect("serialize report");
    println!("{json}");
}
