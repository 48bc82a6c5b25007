use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata")
        .join(name)
}

fn dartboard() -> Command {
    let mut cmd = Command::cargo_bin("dartboard").expect("binary");
    cmd.args(["--log-level", "off"]);
    cmd
}

#[test]
fn score_prints_classification_json() {
    let out = dartboard()
        .args([
            "score",
            "--center",
            "320,240",
            "--radius",
            "200",
            "--point",
            "320,40",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(json["score"]["ring"], "out_of_bounds");
    assert_eq!(json["score"]["value"], 0);
}

#[test]
fn zones_lists_six_radii() {
    dartboard()
        .args(["zones", "--radius", "440", "--nearest-pixel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"double_outer\": 332.0"))
        .stdout(predicate::str::contains("\"bull\": 12.0"));
}

#[test]
fn zones_rejects_non_positive_radius() {
    dartboard()
        .args(["zones", "--radius", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("radius"));
}

#[test]
fn replay_writes_report_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("report.json");
    dartboard()
        .arg("replay")
        .arg(testdata("session_basic.json"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("report")).expect("json");
    assert_eq!(report["final_total"], 50);
    assert_eq!(report["finished"], true);
    assert_eq!(report["throws"].as_array().map(Vec::len), Some(8));
}

#[test]
fn replay_reports_engine_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = dir.path().join("bad.json");
    std::fs::write(
        &script,
        r#"{"steps": [{"type": "calibrate", "center": [0, 0], "radius": -5}]}"#,
    )
    .expect("write");
    dartboard()
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn malformed_pair_is_a_usage_error() {
    dartboard()
        .args(["score", "--center", "320", "--radius", "200", "--point", "1,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected `x,y`"));
}
