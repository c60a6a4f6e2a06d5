// Dweve LatReport - RTAI latency test reports
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! End-to-end tests of the latreport binary

use assert_cmd::Command;
use latreport_test::fixtures::builders::TranscriptBuilder;
use latreport_test::{file_name, fixtures};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn latreport_cmd() -> Command {
    Command::cargo_bin("latreport").expect("Failed to find latreport binary")
}

/// A directory with a metadata-only run (001) and a full run (002).
fn create_runs() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = dir.path().join(file_name("rt1", 1, &["cpu0"], "idle", "good"));
    let second = dir
        .path()
        .join(file_name("rt1", 2, &["isolcpus", "cpu1", "performance"], "cpu", "bad"));
    fs::write(&first, fixtures::metadata_only()).expect("Failed to write transcript");
    fs::write(&second, fixtures::full_run()).expect("Failed to write transcript");
    fs::write(dir.path().join("README"), "not a transcript").expect("Failed to write file");
    (dir, first, second)
}

#[test]
fn test_report_directory() {
    let (dir, _, _) = create_runs();
    latreport_cmd()
        .arg("report")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("kern latency"))
        .stdout(predicate::str::contains("user switches"))
        .stdout(predicate::str::contains("cpu1"))
        .stdout(predicate::str::contains("isolcpus"));
}

#[test]
fn test_report_csv_layout() {
    let (dir, _, _) = create_runs();
    let output = latreport_cmd()
        .args(["report", "-f", "csv"])
        .arg(dir.path())
        .output()
        .expect("Failed to run latreport");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    // three header levels, a unit row, two runs
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("data,"));
    assert!(lines[2].starts_with("num,kernel parameter,load,"));
    assert!(lines[4].starts_with("001,,idle,good,cpu0,-,no,"));
    assert!(lines[5].starts_with("002,isolcpus,cpu,bad,cpu1,-,yes,"));

    let fields = lines[0].split(',').count();
    assert!(lines.iter().all(|l| l.split(',').count() == fields));
}

#[test]
fn test_report_sort_and_hide() {
    let (_dir, first, second) = create_runs();
    let output = latreport_cmd()
        .args(["report", "-f", "csv", "-u", "none", "-s", "!data>num"])
        .args(["--hide", "kern preempt", "--hide", "data>kernel parameter"])
        .arg(&first)
        .arg(&second)
        .output()
        .expect("Failed to run latreport");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[3].starts_with("002,cpu,bad,"));
    assert!(lines[4].starts_with("001,idle,good,"));
    assert!(!stdout.contains("kern preempt"));
    assert!(!stdout.contains("kernel parameter"));
}

#[test]
fn test_report_hide_empty_and_missing() {
    let (_dir, first, _) = create_runs();
    latreport_cmd()
        .args(["report", "-f", "csv", "-m", "n/a", "--hide-empty"])
        .arg(&first)
        .assert()
        .success()
        .stdout(predicate::str::contains("temp"))
        .stdout(predicate::str::contains("isol").not())
        .stdout(predicate::str::contains("n/a").not());
}

#[test]
fn test_report_markdown_with_numbers() {
    let (dir, _, _) = create_runs();
    latreport_cmd()
        .args(["report", "-f", "md", "-n", "alpha", "-u", "header"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("A |"))
        .stdout(predicate::str::contains("temp/C"))
        .stdout(predicate::str::contains("|:"));
}

#[test]
fn test_report_output_file() {
    let (dir, _, _) = create_runs();
    let out = dir.path().join("report.html");
    latreport_cmd()
        .args(["report", "-f", "html", "-o"])
        .arg(&out)
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("<table"));
    assert!(html.contains("kern latency"));
}

#[test]
fn test_report_missing_file() {
    let dir = tempdir().unwrap();
    latreport_cmd()
        .arg("report")
        .arg(dir.path().join("latencies-none"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_report_empty_directory() {
    let dir = tempdir().unwrap();
    latreport_cmd()
        .arg("report")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No latency transcripts found"));
}

#[test]
fn test_report_unknown_format() {
    let (dir, _, _) = create_runs();
    latreport_cmd()
        .args(["report", "-f", "xml"])
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn test_inspect_json() {
    let (_dir, _, second) = create_runs();
    let output = latreport_cmd()
        .arg("inspect")
        .arg(&second)
        .output()
        .expect("Failed to run latreport");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["measurements"]["kern/latency/latencies"].is_array());
    assert_eq!(json["environment"]["cpu_id"], "1");
    assert_eq!(json["environment"]["isolated_cpus"], 1);
}

#[test]
fn test_inspect_pretty() {
    let (_dir, first, _) = create_runs();
    latreport_cmd()
        .args(["inspect", "--pretty"])
        .arg(&first)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"environment\""));
}

#[test]
fn test_report_survives_over_long_line() {
    let (dir, _, _) = create_runs();
    let third = dir.path().join(file_name("rt1", 3, &["cpu1"], "cpu", "good"));
    let noise = format!("# {}\n", "x".repeat(1024 * 1024 + 8));
    fs::write(&third, noise + &fixtures::full_run()).expect("Failed to write transcript");

    let output = latreport_cmd()
        .args(["report", "-f", "csv"])
        .arg(dir.path())
        .output()
        .expect("Failed to run latreport");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("over-long"));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[6].starts_with("003,,cpu,good,cpu1,"));
    // the skipped line does not cost the run its statistics
    let second: Vec<&str> = lines[5].split(',').collect();
    let third: Vec<&str> = lines[6].split(',').collect();
    assert_eq!(second[7..], third[7..]);
}

#[test]
fn test_inspect_uses_cpu_from_file_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(file_name("rt1", 4, &["cpu1"], "idle", "good"));
    let text = TranscriptBuilder::new()
        .topology(0, 2400, 10)
        .topology(1, 3000, 50)
        .build();
    fs::write(&path, text).unwrap();

    let output = latreport_cmd()
        .arg("inspect")
        .arg(&path)
        .output()
        .expect("Failed to run latreport");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["environment"]["frequency"], 3.0);
    assert_eq!(json["environment"]["poll"], 50.0);
}
