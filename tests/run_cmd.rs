use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write as _;
use std::time::Duration;

fn cargo_bin() -> Command {
    Command::cargo_bin("bft").unwrap()
}

#[test]
fn echoes_byte_from_stdin() {
    // ",." reads one byte and writes it back.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg(",.")
        .write_stdin("Z")
        .assert()
        .success()
        .stdout(&b"Z\n"[..]);
}

#[test]
fn eof_on_stdin_reads_as_zero() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg(",.,.,.")
        .write_stdin("A")
        .assert()
        .success()
        .stdout(&b"A\x00\x00\n"[..]);
}

#[test]
fn pointer_lands_on_untouched_cell() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg(">><.")
        .assert()
        .success()
        .stdout(&b"\x00\n"[..]);
}

#[test]
fn countdown_loop_writes_raw_bytes() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg("+++++[.-]")
        .assert()
        .success()
        .stdout(&b"\x05\x04\x03\x02\x01\n"[..]);
}

#[test]
fn positional_code_parts_are_concatenated() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg("++")
        .arg("+.")
        .assert()
        .success()
        .stdout(&b"\x03\n"[..]);
}

#[test]
fn runs_code_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "++ increment twice, then print").unwrap();
    writeln!(file, ".").unwrap();

    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(&b"\x02\n"[..]);
}

#[test]
fn file_and_positional_code_conflict() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg("--file")
        .arg("/nonexistent.bf")
        .arg("+++")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot use positional code"));
}

#[test]
fn missing_file_reports_read_failure() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .arg("--file")
        .arg("/nonexistent.bf")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}

#[test]
fn no_arguments_prints_usage() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("run")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}
