#![cfg(unix)]

use std::process::{Command, Output};

fn plzrun(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plzrun"))
        .args(args)
        .env("SHELL", "/bin/sh")
        .env_remove("PLZRUN_LOG")
        .output()
        .expect("failed to run plzrun binary")
}

#[test]
fn no_command_prints_usage_and_succeeds() {
    let out = plzrun(&[]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage"), "stdout was: {stdout}");
    assert!(stdout.contains("--retries"));

    let out = plzrun(&["-r", "3", "-e"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn help_and_version_exit_zero() {
    let out = plzrun(&["--help"]);
    assert_eq!(out.status.code(), Some(0));

    let out = plzrun(&["-v"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn malformed_flag_value_is_a_configuration_error() {
    let out = plzrun(&["-r", "lots", "true"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!String::from_utf8_lossy(&out.stderr).contains("Run 1/"));
}

#[test]
fn retry_limit_end_to_end() {
    let out = plzrun(&["-r", "2", "-s", "0", "exit", "1"]);
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Run 1/3 using /bin/sh: exit 1"), "stderr was: {stderr}");
    assert!(stderr.contains("Run 3/3"));
    assert!(!stderr.contains("Run 4/3"));
    assert!(stderr.contains("Retry limit hit"));
}

#[test]
fn success_exits_zero() {
    let out = plzrun(&["-r", "0", "true"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Exited with success"));
}

#[test]
fn child_output_goes_to_inherited_stdout() {
    let out = plzrun(&["-r", "0", "echo", "hello-from-child"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("hello-from-child"));
}

#[test]
fn unbounded_banner_uses_infinity() {
    let out = plzrun(&["true"]);
    assert!(String::from_utf8_lossy(&out.stderr).contains("Run 1/∞"));
}

#[test]
fn unspawnable_shell_uses_dedicated_exit_code() {
    let out = Command::new(env!("CARGO_BIN_EXE_plzrun"))
        .args(["-r", "5", "true"])
        .env("SHELL", "/definitely/not/a/shell")
        .output()
        .expect("failed to run plzrun binary");

    assert_eq!(
        out.status.code(),
        Some(plzrun::errors::SPAWN_FAILURE_EXIT_CODE)
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("Run ").count(), 1, "stderr was: {stderr}");
}

#[test]
fn clear_mode_writes_screen_reset_to_stdout() {
    let out = plzrun(&["-c", "-r", "0", "true"]);
    assert!(String::from_utf8_lossy(&out.stdout).contains("\x1b[H\x1b[2J"));
}
