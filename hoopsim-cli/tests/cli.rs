use std::path::PathBuf;
use std::process::Command;

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "hoopsim-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn roster_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/players.json")
}

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hoopsim-cli"));
    command.arg("--roster").arg(roster_path());
    command
}

#[test]
fn cli_list_players_writes_output() {
    let output_path = temp_path("list");
    let status = cli()
        .args(["--list-players", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available players"));
    assert!(content.contains("Nikola Jokic"));
}

#[test]
fn cli_json_report_is_reproducible() {
    let run = |label: &str| {
        let output_path = temp_path(label);
        let status = cli()
            .args([
                "--player1",
                "1",
                "--player2",
                "2",
                "--seeds",
                "7,8",
                "--iterations",
                "2",
                "--report",
                "json",
                "--output",
            ])
            .arg(&output_path)
            .status()
            .expect("run cli");
        assert!(status.success());
        std::fs::read_to_string(output_path).expect("read output")
    };

    let first = run("json-a");
    let second = run("json-b");
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).expect("valid json");
    let seeds: Vec<u64> = value["matches"]
        .as_array()
        .expect("matches array")
        .iter()
        .filter_map(|m| m["seed"].as_u64())
        .collect();
    assert_eq!(seeds, vec![7, 8, 8, 9]);
    assert_eq!(value["aggregate"]["matchups"], 4);
    assert_eq!(value["config"]["target_score"], 11);
}

#[test]
fn cli_applies_rule_flags() {
    let output_path = temp_path("rules");
    let status = cli()
        .args([
            "--player1",
            "3",
            "--player2",
            "4",
            "--target",
            "21",
            "--win-by",
            "2",
            "--make-it-take-it",
            "--streetball",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_path).expect("read output"))
            .expect("valid json");
    assert_eq!(value["config"]["target_score"], 21);
    assert_eq!(value["config"]["win_by"], 2);
    assert_eq!(value["config"]["possession_rule"], "make_it_take_it");
    assert_eq!(value["config"]["scoring"], "streetball");
}

#[test]
fn cli_csv_report_has_one_row_per_seed() {
    let output_path = temp_path("csv");
    let status = cli()
        .args([
            "--player1", "5", "--player2", "6", "--seeds", "1..5", "--report", "csv", "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn cli_template_commentary_in_markdown() {
    let output_path = temp_path("markdown");
    let status = cli()
        .args([
            "--player1",
            "1",
            "--player2",
            "5",
            "--commentary",
            "template",
            "--report",
            "markdown",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("## Commentary"));
    assert!(content.contains(" wins "));
}

#[test]
fn cli_invalid_target_reports_unavailable() {
    let output = cli()
        .args(["--player1", "1", "--player2", "2", "--target", "0"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation unavailable for this input"));
    assert!(!stderr.contains("target_score"));
}

#[test]
fn cli_unknown_player_reports_unavailable() {
    let output = cli()
        .args(["--player1", "1", "--player2", "404"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation unavailable for this input"));
}

#[test]
fn cli_requires_both_players() {
    let output = cli().args(["--player1", "1"]).output().expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--player2"));
}
