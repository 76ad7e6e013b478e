use assert_cmd::Command;
use predicates::prelude::*;

fn nullalarm() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("nullalarm").expect("nullalarm binary");
    cmd.env_remove("NULLALARM_SEED")
        .env_remove("NULLALARM_SPEED")
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_crate_version() {
    nullalarm()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn trace_text_starts_with_exception_header() {
    nullalarm()
        .args(["trace", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "java.lang.NullPointerException\n    at com.example.",
        ))
        .stdout(predicate::str::contains("Possible Cause: "));
}

#[test]
fn trace_is_reproducible_with_seed() {
    let run = || {
        nullalarm()
            .args(["trace", "--seed", "1234", "--count", "4"])
            .output()
            .expect("run nullalarm")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn trace_seed_can_come_from_env() {
    let by_flag = nullalarm()
        .args(["trace", "--seed", "77"])
        .output()
        .unwrap()
        .stdout;
    let by_env = nullalarm()
        .env("NULLALARM_SEED", "77")
        .arg("trace")
        .output()
        .unwrap()
        .stdout;
    assert_eq!(by_flag, by_env);
}

#[test]
fn trace_json_is_an_array_of_reports() {
    let out = nullalarm()
        .args(["trace", "--seed", "9", "--count", "3", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    let reports = value.as_array().expect("array");
    assert_eq!(reports.len(), 3);
    for r in reports {
        let lines = r["lines"].as_array().unwrap();
        assert_eq!(lines[0], "java.lang.NullPointerException");
        assert!((5..=13).contains(&lines.len()));
        assert_eq!(r["kinds"].as_array().unwrap().len(), lines.len());
        assert!(!r["cause"].as_str().unwrap().is_empty());
    }
}

#[test]
fn instant_run_completes_without_color() {
    let dir = tempfile::tempdir().unwrap();
    nullalarm()
        .current_dir(dir.path())
        .args([
            "run",
            "--instant",
            "--no-audio",
            "--no-color",
            "--seed",
            "5",
            "--countdown",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CRITICAL SYSTEM ERROR"))
        .stdout(predicate::str::contains("Stack Trace:"))
        .stdout(predicate::str::contains("PROCESS TERMINATED"))
        .stdout(predicate::str::contains(
            "NullPointerException demonstration completed.",
        ))
        .stdout(predicate::str::contains("\u{1b}[38;5;").not());
}

#[test]
fn bare_invocation_runs_animation() {
    let dir = tempfile::tempdir().unwrap();
    nullalarm()
        .current_dir(dir.path())
        .args(["--instant", "--no-color", "--countdown", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AUDIO: No audio file found."));
}

#[test]
fn non_positive_speed_is_a_config_error() {
    nullalarm()
        .args(["run", "--speed", "0", "--no-audio"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--speed must be a number of at least"));
}

#[test]
fn vanishing_speed_is_a_config_error_not_a_panic() {
    for speed in ["1e-300", "0.001"] {
        nullalarm()
            .args(["run", "--speed", speed, "--no-audio"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config error:"))
            .stderr(predicate::str::contains("panicked").not());
    }
}

#[test]
fn flags_before_run_subcommand_are_rejected() {
    nullalarm()
        .args(["--seed", "7", "--instant", "run"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn any_non_empty_no_color_disables_color() {
    let dir = tempfile::tempdir().unwrap();
    for value in ["1", "0", "false"] {
        nullalarm()
            .current_dir(dir.path())
            .env("NO_COLOR", value)
            .args(["run", "--instant", "--no-audio", "--countdown", "0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\u{1b}[38;5;").not());
    }
}
