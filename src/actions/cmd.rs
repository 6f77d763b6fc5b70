// src/actions/cmd.rs

use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::errors::WatchError;
use crate::watch::state::ChangeEvent;

const TEAL: &str = "\x1b[1;96m";
const RESET: &str = "\x1b[0m";

/// Placeholder replaced with the changed path in command templates.
pub const PATH_PLACEHOLDER: &str = "{0}";

/// Substitute the path placeholder and run the result through the platform
/// shell, blocking until it exits.
pub fn run(template: &str, event: &ChangeEvent) -> Result<(), WatchError> {
    let command = render(template, event);
    announce(&command);

    let output = shell(&command)
        .output()
        .map_err(|source| WatchError::Spawn {
            command: command.clone(),
            source,
        })?;

    forward_output(&command, &output);
    exit_result(command, &output)
}

/// Async twin of [`run`]; awaits the child instead of blocking on it.
pub async fn run_async(template: &str, event: &ChangeEvent) -> Result<(), WatchError> {
    let command = render(template, event);
    announce(&command);

    let output = tokio::process::Command::from(shell(&command))
        .output()
        .await
        .map_err(|source| WatchError::Spawn {
            command: command.clone(),
            source,
        })?;

    forward_output(&command, &output);
    exit_result(command, &output)
}

fn render(template: &str, event: &ChangeEvent) -> String {
    template.replace(PATH_PLACEHOLDER, &event.path.display().to_string())
}

fn announce(command: &str) {
    println!("{TEAL}[cmd]{RESET} {command}");
}

/// Build a shell command appropriate for the platform.
fn shell(command: &str) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd
}

/// Echo the child's captured output so command actions stay observably
/// consistent with notify output.
fn forward_output(command: &str, output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
        print!("{stdout}");
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        eprint!("{stderr}");
    }
    debug!(
        command = %command,
        exit_code = output.status.code().unwrap_or(-1),
        "command finished"
    );
}

fn exit_result(command: String, output: &Output) -> Result<(), WatchError> {
    if output.status.success() {
        Ok(())
    } else {
        Err(WatchError::CommandStatus {
            command,
            code: output.status.code().unwrap_or(-1),
        })
    }
}
