use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "gamestore-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_gamestore-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    for key in ["session", "cart", "checkout", "orders", "admin"] {
        assert!(content.contains(key), "{key} not listed");
    }
}

#[test]
fn cli_contract_run_writes_a_json_report() {
    let exe = env!("CARGO_BIN_EXE_gamestore-tester");
    let output_path = temp_path("json");
    let output = Command::new(exe)
        .args(["--mode", "contract", "--scenarios", "cart,checkout", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "cli failed: {stdout}");
    assert!(stdout.contains("Game Store Contract Tester"));
    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let names: Vec<&str> = report
        .as_array()
        .expect("array report")
        .iter()
        .filter_map(|r| r["scenario_name"].as_str())
        .collect();
    assert_eq!(names, vec!["cart", "checkout"]);
    assert!(report.as_array().unwrap().iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_unknown_scenario_exits_with_failure() {
    let exe = env!("CARGO_BIN_EXE_gamestore-tester");
    let output_path = temp_path("unknown");
    let output = Command::new(exe)
        .args(["--scenarios", "teleport", "--report", "markdown", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown scenario"));
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("### ❌ teleport"));
}
