use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    Command::cargo_bin("bft").unwrap()
}

#[test]
fn repl_empty_stdin_exits_cleanly() {
    // With piped (non-TTY) stdin there is no prompt and no banner.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("repl")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn repl_executes_submission_then_exits_on_eof() {
    // 65 '+' then '.' prints 'A'; the REPL adds a newline after the run.
    let program = format!("{}.", "+".repeat(65));

    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env("BFT_REPL_ONCE", "1")
        .arg("repl")
        .write_stdin(program)
        .assert()
        .success()
        .stdout(predicate::str::contains("A\n"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn repl_reports_parse_error_and_continues_to_eof() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env("BFT_REPL_ONCE", "1")
        .arg("repl")
        .write_stdin("]")
        .assert()
        .success()
        .stderr(predicate::str::contains("unmatched ']'"))
        .stdout(predicate::str::contains("\n"));
}

#[test]
fn repl_ignores_comment_only_submission() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("repl")
        .write_stdin("nothing to run here\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn repl_state_does_not_persist_across_runs() {
    // Each execution starts from a fresh tape, so the same program gives the
    // same output in two separate sessions.
    let program = format!("{}.", "+".repeat(65));

    for _ in 0..2 {
        cargo_bin()
            .timeout(Duration::from_secs(2))
            .env("BFT_REPL_ONCE", "1")
            .arg("repl")
            .write_stdin(program.clone())
            .assert()
            .success()
            .stdout(predicate::str::contains("A\n"));
    }
}
