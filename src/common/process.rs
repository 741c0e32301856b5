//! Subprocess execution
//!
//! All captured-output invocations (toolchain queries, installs, client
//! commands) go through [`CommandRunner`] so the orchestration can be driven
//! by a scripted runner in tests.

use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{Error, Result};

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status and combined output of a finished process
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    pub fn status_string(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "no exit code (terminated by signal)".to_string(),
        }
    }

    /// Turn a non-zero exit into [`Error::CommandFailed`]
    pub fn check(self, cmd: &CommandSpec) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::command_failed(
                &cmd.to_string(),
                &self.status_string(),
                self.output.trim(),
            ))
        }
    }
}

/// Runs a command to completion and captures its output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        tracing::debug!(command = %cmd, "spawning");

        let output = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::spawn_failed(&cmd.program, &e))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: combined,
        })
    }
}
