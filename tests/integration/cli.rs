//! Runs the built binary to check how output streams are split.

use std::process::Command;

fn run_with_json_logs() -> std::process::Output {
    let config = std::env::temp_dir().join(format!("qrisc_cli_{}.toml", uuid::Uuid::new_v4()));
    Command::new(env!("CARGO_BIN_EXE_qrisc"))
        .args(["--iterations", "1", "--seed", "5", "--no-delay", "--config"])
        .arg(&config)
        .env("QRISC_LOG_JSON", "1")
        .env("RUST_LOG", "qrisc=info")
        .output()
        .expect("failed to run qrisc binary")
}

#[test]
fn test_json_logs_go_to_stderr() {
    let out = run_with_json_logs();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(stdout.contains("📈 MINING SESSION SUMMARY"));
    assert!(
        !stdout.lines().any(|l| l.trim_start().starts_with('{')),
        "JSON log line leaked into stdout"
    );
    assert!(stderr.lines().any(|l| l.starts_with('{') && l.contains("\"level\"")));
}
