use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_help_lists_options() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--listen-addr"))
        .stdout(predicate::str::contains("--base-rate"))
        .stdout(predicate::str::contains("--notification-workers"));

    Ok(())
}

#[test]
fn test_cli_rejects_malformed_rate() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.args(["--base-rate", "sixteen"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--base-rate"));

    Ok(())
}
