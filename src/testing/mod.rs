//! Client-driven test sequence
//!
//! Every step shells out to the client with `--json` output and the run stops
//! at the first failing step.

pub mod config;
pub mod runner;

pub use config::{fixed_sequence, TestStep};
pub use runner::{run_tests, TestResult, TestSummary};
