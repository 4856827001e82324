#![cfg(unix)]

use plzrun::config::{RetryBudget, ShellSpec, SupervisorConfig};
use plzrun::errors::PlzrunError;
use plzrun::exec::{CommandSpec, ShellSpawner, Spawner};
use plzrun::supervisor::{InterruptListener, Outcome, Supervisor};
use plzrun_test_utils::{RecordingReporter, init_tracing, with_timeout};
use tempfile::TempDir;

fn sh() -> ShellSpec {
    ShellSpec::from_env_value(Some("/bin/sh".to_string()))
}

fn spec(command: &str) -> CommandSpec {
    CommandSpec {
        shell: sh(),
        command: command.to_string(),
    }
}

#[tokio::test]
async fn reports_plain_exit_codes() {
    init_tracing();
    let mut spawner = ShellSpawner::new();

    let ok = with_timeout(spawner.spawn_and_wait(&spec("true"))).await.unwrap();
    assert!(ok.is_success());

    let failed = with_timeout(spawner.spawn_and_wait(&spec("exit 3"))).await.unwrap();
    assert_eq!(failed.exit_code, 3);
    assert_eq!(failed.signal, None);
}

#[tokio::test]
async fn shell_syntax_is_interpreted() {
    let mut spawner = ShellSpawner::new();
    let term = with_timeout(spawner.spawn_and_wait(&spec("echo a b | grep -q b && exit 5")))
        .await
        .unwrap();
    assert_eq!(term.exit_code, 5);
}

#[tokio::test]
async fn signal_deaths_are_mapped() {
    let mut spawner = ShellSpawner::new();

    let term = with_timeout(spawner.spawn_and_wait(&spec("kill -TERM $$")))
        .await
        .unwrap();
    assert_eq!(term.signal, Some(libc::SIGTERM));
    assert_eq!(term.exit_code, 128 + libc::SIGTERM);

    let int = with_timeout(spawner.spawn_and_wait(&spec("kill -INT $$")))
        .await
        .unwrap();
    assert!(int.is_interrupt());
    assert_eq!(int.exit_code, 130);
}

#[tokio::test]
async fn missing_shell_is_a_spawn_error() {
    let mut spawner = ShellSpawner::new();
    let bad = CommandSpec {
        shell: ShellSpec::from_env_value(Some("/definitely/not/a/shell".to_string())),
        command: "true".to_string(),
    };

    let err = spawner.spawn_and_wait(&bad).await.unwrap_err();
    match err {
        PlzrunError::Spawn { shell, source } => {
            assert_eq!(shell, "/definitely/not/a/shell");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[tokio::test]
async fn command_not_found_is_a_failed_run_not_a_spawn_error() {
    let mut spawner = ShellSpawner::new();
    let term = spawner
        .spawn_and_wait(&spec("plzrun-no-such-command-xyz"))
        .await
        .unwrap();
    assert_eq!(term.exit_code, 127);
}

#[tokio::test]
async fn supervisor_retries_real_command_until_it_succeeds() {
    let dir = TempDir::new().unwrap();
    let counter = dir.path().join("attempts");

    // Appends a line per attempt and succeeds on the third.
    let command = format!(
        "echo x >> '{path}'; test $(wc -l < '{path}') -ge 3",
        path = counter.display()
    );
    let config = SupervisorConfig {
        command,
        retries: RetryBudget::Limited(5),
        base_sleep_secs: 0,
        exponential: false,
        clear: false,
        shell: sh(),
    };
    let reporter = RecordingReporter::new();

    let outcome = with_timeout(
        Supervisor::new(config, ShellSpawner::new(), reporter.clone(), InterruptListener::never())
            .run(),
    )
    .await;

    assert_eq!(outcome, Outcome::Succeeded);
    assert_eq!(reporter.runs(), 3);
    let lines = std::fs::read_to_string(&counter).unwrap();
    assert_eq!(lines.lines().count(), 3);
}

#[tokio::test]
async fn supervisor_gives_up_with_child_exit_code() {
    let config = SupervisorConfig {
        command: "exit 1".to_string(),
        retries: RetryBudget::Limited(2),
        base_sleep_secs: 0,
        exponential: false,
        clear: false,
        shell: sh(),
    };
    let reporter = RecordingReporter::new();

    let outcome = with_timeout(
        Supervisor::new(config, ShellSpawner::new(), reporter.clone(), InterruptListener::never())
            .run(),
    )
    .await;

    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(reporter.runs(), 3);
}

#[tokio::test]
async fn child_killed_by_sigint_stops_the_loop() {
    let config = SupervisorConfig {
        command: "kill -INT $$".to_string(),
        retries: RetryBudget::Unbounded,
        base_sleep_secs: 0,
        exponential: false,
        clear: false,
        shell: sh(),
    };
    let reporter = RecordingReporter::new();

    let outcome = with_timeout(
        Supervisor::new(config, ShellSpawner::new(), reporter.clone(), InterruptListener::never())
            .run(),
    )
    .await;

    assert_eq!(outcome, Outcome::Interrupted { exit_code: 130 });
    assert_eq!(reporter.runs(), 1);
}
