mod common;
use common::{TestFixture, json_lines};

use predicates::prelude::*;

#[test]
fn test_human_refresh_reports_progress_and_outputs() {
    let fixture = TestFixture::new();
    let output = fixture
        .command()
        .arg("refresh")
        .arg("--state")
        .arg(TestFixture::fixture("basic.json"))
        .output()
        .expect("Failed to run refresh");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {}", stdout);

    assert!(stdout.contains("aws_instance.web: Refreshing state... [id=i-0abc123]"));
    assert!(stdout.contains("module.net.aws_subnet.private[1]: Refreshing state... [id=subnet-2]"));
    assert!(stdout.contains("data.aws_ami.ubuntu: Reading..."));
    assert!(stdout.contains("data.aws_ami.ubuntu: Read complete after 0s [id=ami-42]"));

    let outputs = stdout.split("\nOutputs:\n\n").nth(1).expect("outputs section");
    assert!(outputs.contains("db_password = <sensitive>"));
    assert!(outputs.contains("public_ip = \"203.0.113.10\""));
    assert!(outputs.contains("subnet_ids = [\n  \"subnet-1\",\n  \"subnet-2\",\n]"));
    assert!(!stdout.contains("hunter2"));
}

#[test]
fn test_json_refresh_streams_records() {
    let fixture = TestFixture::new();
    let output = fixture
        .command()
        .arg("refresh")
        .arg("--json")
        .arg("--state")
        .arg(TestFixture::fixture("basic.json"))
        .output()
        .expect("Failed to run refresh");

    assert!(output.status.success());
    let records = json_lines(&output.stdout);

    let count = |ty: &str| records.iter().filter(|r| r["type"] == ty).count();
    assert_eq!(count("refresh_start"), 3);
    assert_eq!(count("refresh_complete"), 3);
    assert_eq!(count("apply_start"), 1, "data sources are read");
    assert_eq!(count("apply_complete"), 1);

    let last = records.last().unwrap();
    assert_eq!(last["type"], "outputs");
    assert_eq!(last["@module"], "tfview.ui");
    assert_eq!(last["outputs"]["db_password"]["sensitive"], true);
    assert!(last["outputs"]["db_password"].get("value").is_none());
    assert_eq!(last["outputs"]["public_ip"]["value"], "203.0.113.10");

    for record in &records {
        assert!(record["@timestamp"].is_string());
        assert!(record["@level"].is_string());
    }
}

#[test]
fn test_missing_state_prints_help_prompt() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .arg("refresh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: No state file specified"))
        .stderr(predicate::str::contains("tfview refresh --help"));
}

#[test]
fn test_missing_state_in_json_mode_has_no_help_prompt() {
    let fixture = TestFixture::new();
    let output = fixture
        .command()
        .arg("refresh")
        .arg("--json")
        .output()
        .expect("Failed to run refresh");

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("--help"));

    let records = json_lines(&output.stdout);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["type"], "diagnostic");
    assert_eq!(records[0]["diagnostic"]["summary"], "No state file specified");
}

#[test]
fn test_resource_error_fails_without_outputs() {
    let fixture = TestFixture::new();
    let output = fixture
        .command()
        .arg("refresh")
        .arg("--state")
        .arg(TestFixture::fixture("errored.json"))
        .output()
        .expect("Failed to run refresh");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Error refreshing aws_s3_bucket.logs"));
    assert!(stderr.contains("with aws_s3_bucket.logs,"));
    assert!(stderr.contains("AccessDenied"));
    assert!(!stdout.contains("Outputs:"));
}

#[test]
fn test_resource_error_in_json_mode() {
    let fixture = TestFixture::new();
    let output = fixture
        .command()
        .args(["refresh", "--json", "--state"])
        .arg(TestFixture::fixture("errored.json"))
        .output()
        .expect("Failed to run refresh");

    assert!(!output.status.success());
    let records = json_lines(&output.stdout);
    assert!(records.iter().any(|r| r["type"] == "refresh_errored"));
    assert!(records.iter().all(|r| r["type"] != "outputs"));

    let diag = records.iter().find(|r| r["type"] == "diagnostic").unwrap();
    assert_eq!(diag["@level"], "error");
    assert_eq!(diag["diagnostic"]["address"], "aws_s3_bucket.logs");
}

#[test]
fn test_target_limits_refreshed_resources() {
    let fixture = TestFixture::new();
    let output = fixture
        .command()
        .args(["refresh", "--target", "module.net.aws_subnet.private", "--state"])
        .arg(TestFixture::fixture("basic.json"))
        .output()
        .expect("Failed to run refresh");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("module.net.aws_subnet.private[0]: Refreshing state..."));
    assert!(stdout.contains("module.net.aws_subnet.private[1]: Refreshing state..."));
    assert!(!stdout.contains("aws_instance.web"));
    assert!(!stdout.contains("data.aws_ami.ubuntu"));
}

#[test]
fn test_invalid_target_is_argument_error() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .args(["refresh", "--target", "module.net"])
        .arg("--state")
        .arg(TestFixture::fixture("basic.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid target address"))
        .stderr(predicate::str::contains("tfview refresh --help"));
}

#[test]
fn test_automation_uses_short_help_prompt() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .env("TF_IN_AUTOMATION", "1")
        .arg("refresh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("For usage, run: tfview refresh --help"))
        .stderr(predicate::str::contains("For more help").not());
}

#[test]
fn test_raw_view_is_configuration_error() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .args(["refresh", "--view", "raw"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Configuration error: the refresh command does not support the raw view",
        ));
}

#[test]
fn test_unknown_output_fails_json_encoding() {
    let fixture = TestFixture::new();
    let output = fixture
        .command()
        .args(["refresh", "--json", "--state"])
        .arg(TestFixture::fixture("unknown_output.json"))
        .output()
        .expect("Failed to run refresh");

    let records = json_lines(&output.stdout);
    assert_eq!(records[0]["type"], "diagnostic");
    assert_eq!(records[0]["@level"], "warn");
    assert_eq!(records[1]["type"], "diagnostic");
    assert_eq!(records[1]["diagnostic"]["summary"], "Error serializing output \"arn\"");
    assert!(records.iter().all(|r| r["type"] != "outputs"));
}

#[test]
fn test_unknown_output_renders_placeholder_for_humans() {
    let fixture = TestFixture::new();
    fixture
        .command()
        .args(["refresh", "--state"])
        .arg(TestFixture::fixture("unknown_output.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: Deprecated attribute"))
        .stdout(predicate::str::contains("arn = (known after apply)"));
}

#[test]
fn test_invalid_snapshot_is_reported() {
    let fixture = TestFixture::new();
    let path = fixture.write_snapshot("broken.json", "{not json").unwrap();
    fixture
        .command()
        .args(["refresh", "--state"])
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid state snapshot"));
}

#[test]
fn test_config_parallelism_zero_is_rejected() {
    let fixture = TestFixture::new();
    fixture.write_config("[refresh]\nparallelism = 0\n").unwrap();
    fixture
        .command()
        .args(["refresh", "--state"])
        .arg(TestFixture::fixture("basic.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid parallelism"));
}

#[test]
fn test_flag_parallelism_overrides_config() {
    let fixture = TestFixture::new();
    fixture.write_config("[refresh]\nparallelism = 0\n").unwrap();
    fixture
        .command()
        .args(["refresh", "--parallelism", "1", "--state"])
        .arg(TestFixture::fixture("basic.json"))
        .assert()
        .success();
}
