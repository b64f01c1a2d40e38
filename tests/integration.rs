use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn netviz(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_netviz"))
        .args(args)
        .output()
        .expect("Failed to execute netviz")
}

fn run_triangle(extra: &[&str]) -> Value {
    let edges = fixture("triangle.csv");
    let partition = fixture("triangle.part");
    let mut args = vec![
        "--edges",
        edges.to_str().unwrap(),
        "--partition",
        partition.to_str().unwrap(),
        "--frames",
        "3",
    ];
    args.extend_from_slice(extra);

    let output = netviz(&args);
    assert!(
        output.status.success(),
        "netviz exited with error: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not a JSON snapshot")
}

#[test]
fn lays_out_edge_list_graph() {
    let snapshot = run_triangle(&["--seed", "1"]);

    assert_eq!(snapshot["format_version"], "1.0");
    assert_eq!(snapshot["n_vtx"], 3);
    assert_eq!(snapshot["n_edges"], 6);
    assert_eq!(snapshot["n_hierarchy"], 2);
    assert_eq!(snapshot["hierarchy_level"], 1);
    assert_eq!(snapshot["communities"], serde_json::json!([0, 1, 1]));
    assert_eq!(snapshot["lines"], serde_json::json!([[0, 1], [0, 2], [1, 2]]));
    assert_eq!(snapshot["sizes"], serde_json::json!([0.5, 0.5, 0.5]));

    let positions = snapshot["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 3);
    assert!(
        positions
            .iter()
            .flat_map(|p| p.as_array().unwrap())
            .all(|c| c.as_f64().unwrap().is_finite())
    );
}

#[test]
fn same_seed_gives_same_layout() {
    let a = run_triangle(&["--seed", "42"]);
    let b = run_triangle(&["--seed", "42"]);

    assert_eq!(a["positions"], b["positions"]);
}

#[test]
fn level_option_is_clamped() {
    let low = run_triangle(&["--seed", "1", "--level", "0"]);
    assert_eq!(low["hierarchy_level"], 0);
    assert_eq!(low["communities"], serde_json::json!([0, 0, 1]));

    let high = run_triangle(&["--seed", "1", "--level", "9"]);
    assert_eq!(high["hierarchy_level"], 1);
}

#[test]
fn adjacency_encoding_matches_edge_list() {
    let output = netviz(&[
        "--edges",
        fixture("triangle.graph").to_str().unwrap(),
        "--partition",
        fixture("triangle.part").to_str().unwrap(),
        "--format",
        "adjacency",
        "--frames",
        "3",
        "--seed",
        "5",
    ]);
    assert!(output.status.success());

    let from_adjacency: Value = serde_json::from_slice(&output.stdout).unwrap();
    let from_edge_list = run_triangle(&["--seed", "5"]);
    assert_eq!(from_adjacency, from_edge_list);
}

#[test]
fn config_file_changes_layout() {
    let config = fixture("layout.yaml");

    let configured = run_triangle(&["--seed", "9", "--config", config.to_str().unwrap()]);
    let defaults = run_triangle(&["--seed", "9"]);

    assert_ne!(configured["positions"], defaults["positions"]);
    assert_eq!(configured["lines"], defaults["lines"]);
}

#[test]
fn invalid_format_is_rejected() {
    let output = netviz(&[
        "--edges",
        fixture("triangle.csv").to_str().unwrap(),
        "--partition",
        fixture("triangle.part").to_str().unwrap(),
        "--format",
        "adjacency",
    ]);

    assert!(!output.status.success());
}

#[test]
fn missing_graph_file_fails() {
    let output = netviz(&[
        "--edges",
        "nonexistent.csv",
        "--partition",
        fixture("triangle.part").to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nonexistent.csv"), "stderr: {stderr}");
}

#[test]
fn ragged_partition_fails() {
    let output = netviz(&[
        "--edges",
        fixture("triangle.csv").to_str().unwrap(),
        "--partition",
        fixture("ragged.part").to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("partition columns"), "stderr: {stderr}");
}

#[test]
fn output_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("layout.json");

    let output = netviz(&[
        "--edges",
        fixture("triangle.csv").to_str().unwrap(),
        "--partition",
        fixture("triangle.part").to_str().unwrap(),
        "--frames",
        "1",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let snapshot: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(snapshot["n_vtx"], 3);
}
