//! Common utilities shared by both binaries

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod process;

pub use error::{Error, ErrorKind, Result};
pub use process::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
