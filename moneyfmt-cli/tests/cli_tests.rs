//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn moneyfmt() -> Command {
    let mut cmd = Command::cargo_bin("moneyfmt").unwrap();
    cmd.arg("--no-init-file");
    cmd
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("moneyfmt").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Format numbers as localized monetary strings"))
        .stdout(predicate::str::contains("--digits"))
        .stdout(predicate::str::contains("--rounding"));
}

#[test]
fn test_format_arguments() {
    moneyfmt()
        .args(["0", "1234.5", "1000000", "-42.1", "999.99"])
        .assert()
        .success()
        .stdout("0,00\n1.234,50\n1.000.000,00\n-42,10\n999,99\n");
}

#[test]
fn test_format_stdin() {
    moneyfmt()
        .write_stdin("1234.5\n\n-0.125\n")
        .assert()
        .success()
        .stdout("1.234,50\n-0,13\n");
}

#[test]
fn test_dash_reads_stdin() {
    moneyfmt().arg("-").write_stdin("7\n").assert().success().stdout("7,00\n");
}

#[test]
fn test_dash_splices_stdin() {
    moneyfmt()
        .args(["1", "-", "2"])
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout("1,00\n7,00\n2,00\n");
}

#[test]
fn test_invalid_utf8_stdin_line() {
    moneyfmt()
        .write_stdin(&b"12\n\xff\xfe\n3\n"[..])
        .assert()
        .failure()
        .code(1)
        .stdout("12,00\n3,00\n")
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_width_above_limit_rejected() {
    moneyfmt()
        .args(["-w", "18446744073709551615", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn test_invalid_value_exit_code() {
    moneyfmt()
        .args(["12", "NaN", "abc", "3"])
        .assert()
        .failure()
        .code(1)
        .stdout("12,00\n3,00\n")
        .stderr(predicate::str::contains("Invalid argument").count(2));
}

#[test]
fn test_rounding_and_digits() {
    moneyfmt()
        .args(["--rounding", "half-even", "0.125"])
        .assert()
        .success()
        .stdout("0,12\n");

    moneyfmt().args(["-d", "0", "1234.5"]).assert().success().stdout("1.235\n");
}

#[test]
fn test_width_right_justified() {
    moneyfmt()
        .args(["-w", "10", "--right", "1234.5", "-1"])
        .assert()
        .success()
        .stdout("  1.234,50\n     -1,00\n");
}

#[test]
fn test_init_file() {
    let temp_dir = TempDir::new().unwrap();
    let init_path = temp_dir.path().join("moneyfmtrc");
    fs::write(&init_path, "# settings\n--digits 3\n--grouping-separator ' \n").unwrap();

    Command::cargo_bin("moneyfmt")
        .unwrap()
        .args(["--init-file", init_path.to_str().unwrap(), "1234567.5"])
        .assert()
        .success()
        .stdout("1'234'567,500\n");
}

#[test]
fn test_bad_separators() {
    moneyfmt()
        .args(["--decimal-separator", ".", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid separator configuration"));
}
