//! Error types for the test harness
//!
//! Every failure is terminal. Library code returns these errors and only the
//! binaries turn them into a process exit status, see [`Error::exit_code`].

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Version Errors ===
    #[error("Old Go runtime version '{found}' detected, 'automated-tests' requires minimum go{required} or later")]
    RuntimeVersion { found: String, required: String },

    #[error("Unable to parse version '{0}'")]
    VersionParse(String),

    // === Environment Errors ===
    #[error("{0} not set, cannot continue please follow https://github.com/minio/mc/blob/master/INSTALLGO.md")]
    EnvNotSet(String),

    #[error("{var} not part of {path_var}, cannot continue please follow https://github.com/minio/mc/blob/master/INSTALLGO.md")]
    EnvNotInPath { var: String, path_var: String },

    #[error("'{0}' not found in PATH")]
    ToolNotFound(String),

    #[error("'{0}' not found after installation. Make sure GOPATH/bin is in your PATH")]
    NotFoundAfterInstall(String),

    // === Connectivity Errors ===
    #[error("Server at {url} is unreachable: {reason}")]
    ServerUnreachable { url: String, reason: String },

    #[error("Server replied back with {status}")]
    ServerUnhealthy { status: String },

    // === Process Errors ===
    #[error("Failed to spawn '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("'{command}' exited with {status}: {message}")]
    CommandFailed {
        command: String,
        status: String,
        message: String,
    },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure category, used to pick an exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Version,
    Environment,
    Connectivity,
    Process,
    Config,
    Io,
}

impl Error {
    /// Create a command failed error
    pub fn command_failed(command: &str, status: &str, message: &str) -> Self {
        Self::CommandFailed {
            command: command.to_string(),
            status: status.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a spawn failed error
    pub fn spawn_failed(program: &str, err: &io::Error) -> Self {
        Self::SpawnFailed {
            program: program.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RuntimeVersion { .. } | Error::VersionParse(_) => ErrorKind::Version,
            Error::EnvNotSet(_)
            | Error::EnvNotInPath { .. }
            | Error::ToolNotFound(_)
            | Error::NotFoundAfterInstall(_) => ErrorKind::Environment,
            Error::ServerUnreachable { .. } | Error::ServerUnhealthy { .. } => {
                ErrorKind::Connectivity
            }
            Error::SpawnFailed { .. } | Error::CommandFailed { .. } => ErrorKind::Process,
            Error::ConfigParse(_) | Error::FileRead { .. } => ErrorKind::Config,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }

    /// Exit status reported by the binaries for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Version => 2,
            ErrorKind::Environment => 3,
            ErrorKind::Connectivity => 4,
            ErrorKind::Process => 5,
            ErrorKind::Config | ErrorKind::Io => 1,
        }
    }
}
