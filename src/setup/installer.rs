//! Tool installation through the Go toolchain

use std::path::PathBuf;

use tracing::info;

use super::registry::Tool;
use crate::common::config::ToolConfig;
use crate::common::{CommandRunner, CommandSpec, Error, Result};

/// The Go toolchain executable
pub const GO_BINARY: &str = "go";

/// Installation status of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    /// Not found on PATH
    NotInstalled,
    /// Resolved to an executable
    Installed { path: PathBuf },
}

/// Resolve a tool's binary on PATH (or as given, when it is a path)
pub fn status(config: &ToolConfig) -> InstallStatus {
    match which::which(&config.binary) {
        Ok(path) => InstallStatus::Installed { path },
        Err(_) => InstallStatus::NotInstalled,
    }
}

/// The package-fetch command for a tool
pub fn install_command(config: &ToolConfig) -> CommandSpec {
    CommandSpec::new(GO_BINARY, ["install".to_string(), config.package.clone()])
}

/// Fetch and build a tool from source, returning the installed executable
///
/// `go install` writes into `GOPATH/bin`, so a build that succeeds can still
/// leave the binary unreachable.
pub async fn install(
    runner: &dyn CommandRunner,
    tool: Tool,
    config: &ToolConfig,
) -> Result<PathBuf> {
    info!("Installing {}.", tool);

    let cmd = install_command(config);
    runner.run(&cmd).await?.check(&cmd)?;

    match status(config) {
        InstallStatus::Installed { path } => {
            info!(path = %path.display(), "Success.");
            Ok(path)
        }
        InstallStatus::NotInstalled => Err(Error::NotFoundAfterInstall(config.binary.clone())),
    }
}
