//! End-to-end checks of the compiled binary's argument handling and exit
//! statuses.

use std::{process, str};

/// Above the Linux pid_max ceiling (2^22), so never a live process
const UNUSED_PID: &str = "4194321";

fn run(args: &[&str]) -> process::Output {
    process::Command::new(env!("CARGO_BIN_EXE_process_sampler"))
        .args(args)
        .env_remove("PROCESS_SAMPLER_LOG")
        .output()
        .expect("binary should start")
}

fn stdout(output: &process::Output) -> String {
    str::from_utf8(&output.stdout)
        .expect("invalid UTF-8 in output")
        .replace('\r', "")
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    for args in [&[][..], &["1234", "1"][..], &["1234", "1", "3", "extra"][..]] {
        let output = run(args);
        assert!(output.status.success(), "{:?}: {}", args, output.status);
        assert!(
            stdout(&output).starts_with("Usage: "),
            "{:?}: {}",
            args,
            stdout(&output)
        );
    }
}

#[test]
fn test_non_integer_interval_is_fatal() {
    let output = run(&["1234", "x", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Monitoring completed"));
}

#[test]
fn test_zero_interval_is_fatal() {
    let output = run(&["1234", "0", "3"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_pid_is_fatal() {
    let output = run(&[UNUSED_PID, "1", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_largest_duration_exits_cleanly() {
    // Parses fine and fails on resolution; must not abort with a panic
    let output = run(&[UNUSED_PID, "1", "9223372036854775807"]);
    assert_eq!(output.status.code(), Some(1));
}
