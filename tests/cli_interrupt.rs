//! Integration tests for leaving the menu from the terminal (Ctrl+C, Ctrl-D).

#![cfg(unix)]

use std::io::Read;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const PROMPT: &str = "Please Enter an Option: ";

fn spawn_menu() -> Child {
    Command::new(env!("CARGO_BIN_EXE_treemenu"))
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/menus/main.json"))
        .env_remove("TREEMENU_ERROR_MESSAGE")
        .env_remove("TREEMENU_LOG_FILE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start treemenu")
}

/// Blocks until the first prompt has been printed (or panics after a few seconds).
///
/// Stdout keeps being drained afterwards so the child never writes into a closed pipe.
fn wait_for_prompt(mut stdout: ChildStdout) {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut seen = Vec::new();
        let mut chunk = [0u8; 256];
        let mut prompted = false;
        while let Ok(n) = stdout.read(&mut chunk) {
            if n == 0 {
                break;
            }
            if !prompted {
                seen.extend_from_slice(&chunk[..n]);
                if String::from_utf8_lossy(&seen).contains(PROMPT) {
                    prompted = true;
                    let _ = tx.send(());
                }
            }
        }
    });
    rx.recv_timeout(Duration::from_secs(5))
        .expect("menu never printed its prompt");
}

fn wait_for_exit(child: &mut Child, timeout: Duration) -> Option<std::process::ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(50));
    }
    None
}

#[test]
fn sigint_while_waiting_for_input_exits() {
    let mut child = spawn_menu();
    // Keep stdin open so the menu is blocked reading a selection
    let _stdin = child.stdin.take().unwrap();
    wait_for_prompt(child.stdout.take().unwrap());

    let killed = Command::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()
        .expect("Failed to run kill");
    assert!(killed.success());

    match wait_for_exit(&mut child, Duration::from_secs(5)) {
        Some(status) => assert!(status.success(), "exited with {:?}", status),
        None => {
            let _ = child.kill();
            panic!("treemenu still running 5s after SIGINT");
        },
    }
}

#[test]
fn closed_stdin_exits_cleanly() {
    let mut child = spawn_menu();
    wait_for_prompt(child.stdout.take().unwrap());
    drop(child.stdin.take());

    match wait_for_exit(&mut child, Duration::from_secs(5)) {
        Some(status) => assert!(status.success(), "exited with {:?}", status),
        None => {
            let _ = child.kill();
            panic!("treemenu still running 5s after stdin closed");
        },
    }
}
