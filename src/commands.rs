//! CLI argument definitions
//!
//! Defines the clap arguments for both binaries.

use clap::Args;
use std::path::PathBuf;

/// Arguments for `minio-tests`
#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Client alias of the server under test (e.g. `myminio`)
    pub alias: String,

    /// Local directory whose contents are copied into the test bucket
    pub corpus_dir: String,

    /// Install the client with the Go toolchain before running
    #[arg(long)]
    pub install_client: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug logging, including client output of passing steps
    #[arg(long, short)]
    pub verbose: bool,
}

/// Arguments for `run-minio`
#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    /// Directory in which the `automated-tests*` directory is created
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Do not reinstall the server; use the one on PATH
    #[arg(long)]
    pub skip_install: bool,

    /// Remove the test directory when the server stops
    #[arg(long)]
    pub cleanup: bool,

    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
