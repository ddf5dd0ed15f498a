use serde_json::Value;
use std::process::Command;

fn run_analyze(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_analyze"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run analyze binary")
}

#[test]
fn analyze_reports_a_converged_solution() {
    let output = run_analyze(&[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be a JSON report");
    let solver = &report["solver"];
    assert_eq!(solver["converged"], true);
    let p = solver["p"].as_f64().expect("p");
    assert!((0.0..=1.0).contains(&p));
    assert!(report["delay"]["mean"].as_f64().expect("mean") >= 0.0);
    assert!(report["delay"]["var"].as_f64().expect("var") >= 0.0);
    assert!(report["drop_probability"].as_f64().expect("drop") >= 0.0);
}

#[test]
fn analyze_rejects_growth_cap_above_drop_cap() {
    let output = run_analyze(&["--growth-cap", "5", "--drop-cap", "3"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "stderr: {stderr}");
}

#[test]
fn crossval_reference_scenario_is_within_tolerance() {
    let output = Command::new(env!("CARGO_BIN_EXE_crossval"))
        .args(["--frames", "5000", "--seed", "42", "--rel-tolerance", "0.08"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("run crossval binary");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be a JSON report");
    assert_eq!(report["within_tolerance"], true);
    assert!(report["rel_err_p"].as_f64().expect("rel_err_p") < 0.08);
}
