use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run_interactive(dir: &Path, extra_args: &[&str], input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_duke");

    let mut child = Command::new(exe)
        .args(extra_args)
        .env("DUKE_STORE_PATH", dir.join("duke.txt"))
        .env("DUKE_CONFIG_PATH", dir.join("config.json"))
        .env_remove("DUKE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        // The session may exit before reading everything (e.g. on a fatal error).
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin.write_all(input.as_bytes()).ok();
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

#[test]
fn interactive_session_runs_until_bye() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_interactive(
        dir.path(),
        &[],
        "todo read book\nevent party /at 31-12-2023 2200\ndone 2\nlist\nbye\ntodo never\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hello! I'm Duke"));
    assert!(stdout.contains(
        "Here are the tasks in your list:\n\
         1.[T][ ] read book\n\
         2.[E][X] party (at: 31-12-2023 2200)"
    ));
    assert!(stdout.contains("Bye. Hope to see you again soon!"));
    assert!(!stdout.contains("never"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("duke.txt")).unwrap(),
        "T|0|read book\nE|1|party|31-12-2023 2200"
    );
}

#[test]
fn interactive_errors_do_not_end_session() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_interactive(dir.path(), &[], "done abc\nblah\ntodo still here\nbye\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_an_integer - Please choose an integer value!"));
    assert!(stderr.contains("ERROR: unknown_command"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[T][ ] still here"));
}

#[test]
fn interactive_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_interactive(dir.path(), &[], "help\n?\nbye\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("deadline <description> /by <time>").count(), 2);
}

#[test]
fn interactive_end_of_input_stops_cleanly() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_interactive(dir.path(), &[], "todo no bye\n");

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("duke.txt")).unwrap(),
        "T|0|no bye"
    );
}

#[test]
fn corrupt_records_are_skipped_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("duke.txt"),
        "T|0|keep\nQ|0|garbage\nD|0|bad time|someday\n",
    )
    .unwrap();

    let output = run_interactive(dir.path(), &[], "list\nbye\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("WARNING: corrupt_record").count(), 2);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1.[T][ ] keep"));
    assert!(!stdout.contains("2."));
}

#[test]
fn aliases_from_overrides_and_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "aliases": { "ls": "list" } }"#,
    )
    .unwrap();

    let output = run_interactive(
        dir.path(),
        &["--config-override", "alias.rm=delete"],
        "todo one\ntodo two\nrm 1\nls\nbye\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Here are the tasks in your list:\n1.[T][ ] two"));
}

#[test]
fn invalid_config_override_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_interactive(dir.path(), &["--config-override", "theme=noir"], "bye\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: config_error - unknown config field 'theme'"));
}

#[test]
fn help_cannot_be_taken_by_an_alias() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_interactive(
        dir.path(),
        &["--config-override", "alias.help=list"],
        "help\nbye\n",
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING: config_error - alias 'help' is reserved"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("deadline <description> /by <time>"));
    assert!(!stdout.contains("alias help"));
}
