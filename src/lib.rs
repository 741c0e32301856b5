//! minio-tests - integration-test harness for a MinIO server
//!
//! Installs the server and the `mc` client through the Go toolchain, launches
//! the server against a fresh directory and drives a fixed sequence of client
//! commands against it.

pub mod cli;
pub mod commands;
pub mod common;
pub mod setup;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
