//! Server launcher
//!
//! Creates a fresh `automated-tests*` directory, installs the server and runs
//! it in anonymous mode against that directory until it exits. Ctrl-C stops
//! whichever phase is running, and the directory is finished either way.

use std::future::Future;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::process::Command;
use tracing::{info, warn};

use super::installer;
use super::registry::Tool;
use crate::common::config::Config;
use crate::common::{CommandRunner, CommandSpec, Error, Result};

/// Prefix of the per-run storage directory
pub const TEST_DIR_PREFIX: &str = "automated-tests";

/// Options for the launcher
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Directory the test directory is created in
    pub base_dir: PathBuf,
    /// Use the server binary already on PATH
    pub skip_install: bool,
    /// Remove the test directory when the server stops
    pub cleanup: bool,
}

/// The server's storage directory
///
/// Retained directories outlive the process so a failed run can be inspected.
#[derive(Debug)]
pub enum TestDir {
    Retained(PathBuf),
    Scoped(TempDir),
}

impl TestDir {
    pub fn create(base: &Path, cleanup: bool) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(TEST_DIR_PREFIX)
            .tempdir_in(base)?;

        if cleanup {
            Ok(TestDir::Scoped(dir))
        } else {
            Ok(TestDir::Retained(dir.keep()))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            TestDir::Retained(path) => path,
            TestDir::Scoped(dir) => dir.path(),
        }
    }

    /// Remove a scoped directory; retained ones are only reported
    pub fn finish(self) -> Result<()> {
        match self {
            TestDir::Retained(path) => {
                info!(path = %path.display(), "Test directory retained.");
                Ok(())
            }
            TestDir::Scoped(dir) => {
                let path = dir.path().to_path_buf();
                dir.close()?;
                info!(path = %path.display(), "Test directory removed.");
                Ok(())
            }
        }
    }
}

/// `<binary> --anonymous server <dir>`
pub fn server_command(binary: &str, dir: &Path) -> CommandSpec {
    CommandSpec::new(
        binary,
        [
            "--anonymous".to_string(),
            "server".to_string(),
            dir.display().to_string(),
        ],
    )
}

/// Run the server with inherited stdio until it exits
///
/// Dropping the future kills the server.
pub async fn run_server(cmd: &CommandSpec) -> Result<()> {
    info!(command = %cmd, "Starting server.");

    let mut child = Command::new(&cmd.program)
        .args(&cmd.args)
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::spawn_failed(&cmd.program, &e))?;

    let status = child.wait().await?;
    if !status.success() {
        return Err(Error::command_failed(
            &cmd.to_string(),
            &status.to_string(),
            "server stopped unexpectedly",
        ));
    }

    info!("Server exited.");
    Ok(())
}

/// Resolves on Ctrl-C, never if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Unable to listen for Ctrl-C.");
        std::future::pending::<()>().await;
    }
}

/// Create the test directory, install the server and run it until Ctrl-C
pub async fn launch(
    runner: &dyn CommandRunner,
    config: &Config,
    opts: &LaunchOptions,
) -> Result<()> {
    launch_until(runner, config, opts, ctrl_c()).await
}

/// Like [`launch`], stopping early when `shutdown` resolves
pub async fn launch_until(
    runner: &dyn CommandRunner,
    config: &Config,
    opts: &LaunchOptions,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let dir = TestDir::create(&opts.base_dir, opts.cleanup)?;
    info!(path = %dir.path().display(), "Created test directory.");

    let server = Tool::Server.config(&config.tools);

    let work = async {
        if !opts.skip_install {
            installer::install(runner, Tool::Server, server).await?;
        }
        run_server(&server_command(&server.binary, dir.path())).await
    };

    let result = tokio::select! {
        result = work => result,
        _ = shutdown => {
            info!("Interrupted, stopping server.");
            Ok(())
        }
    };

    keep_first_error(result, dir.finish())
}

/// The run's own error wins over a cleanup error, which is only logged then
fn keep_first_error(result: Result<()>, cleanup: Result<()>) -> Result<()> {
    match (result, cleanup) {
        (Err(e), Err(cleanup_err)) => {
            warn!(error = %cleanup_err, "Failed to remove test directory.");
            Err(e)
        }
        (result, cleanup) => result.and(cleanup),
    }
}
