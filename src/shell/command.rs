//! Process execution with an optional wall-clock timeout.

use crate::error::{Result, RunthisError};
use std::collections::HashMap;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a running child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed for exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Create a result for a command killed after `limit`.
    pub fn timeout(limit: Duration, duration: Duration) -> Self {
        Self {
            exit_code: None,
            stdout: String::new(),
            stderr: format!("timed out after {}s", limit.as_secs()),
            duration,
            success: false,
            timed_out: true,
        }
    }

    /// Stdout followed by stderr, the way a terminal would have shown them.
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        out.push_str(&self.stderr);
        out
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Kill the child after this long (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Execute `program` with `args`, capturing stdout and stderr.
///
/// Only a failure to spawn or wait is an error; a non-zero exit or a
/// timeout is reported through the returned [`CommandResult`].
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = display_command(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    tracing::debug!("Spawning: {}", command_line);

    let mut child = cmd.spawn().map_err(|_| RunthisError::CommandFailed {
        command: command_line.clone(),
        code: None,
    })?;

    // Pipes are drained on helper threads so a chatty child cannot fill
    // the pipe buffer and block while we poll.
    let stdout_handle = child.stdout.take().map(drain);
    let stderr_handle = child.stderr.take().map(drain);

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(_) => {
                return Err(RunthisError::CommandFailed {
                    command: command_line,
                    code: None,
                })
            }
        }

        if let Some(limit) = options.timeout {
            if start.elapsed() >= limit {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!("Killed after {:?}: {}", limit, command_line);
                // Grandchildren may still hold the pipes open, so the
                // reader threads are left to finish on their own.
                return Ok(CommandResult::timeout(limit, start.elapsed()));
            }
        }

        thread::sleep(POLL_INTERVAL);
    };

    let stdout = join_output(stdout_handle);
    let stderr = join_output(stderr_handle);
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_output(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}
