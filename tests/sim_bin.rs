use std::process::{Command, Output};

fn run_bin(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run ir-battleship binary")
}

#[test]
fn sim_binary_smoke() {
    let output = run_bin(&["sim", "--seed", "1"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["winner"].is_string());
    assert_eq!(v["stalled"], false);
    assert_eq!(v["seed"], 1);
}

#[test]
fn sim_rejects_loss_out_of_range() {
    let output = run_bin(&["sim", "--seed", "1", "--loss", "1.5"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn play_rejects_unusable_speed() {
    for speed in ["0", "-2", "1e12", "1e-300"] {
        let output = run_bin(&["play", "--seed", "1", "--speed", speed]);
        assert!(!output.status.success(), "--speed {} was accepted", speed);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("panicked"), "--speed {} panicked: {}", speed, stderr);
    }
}
