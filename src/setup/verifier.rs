//! Environment verification
//!
//! Gates the test run. Checks run in order and the first failure stops
//! everything after it:
//! 1. Go toolchain version is at least the configured minimum
//! 2. The workspace variable is set and is part of the search path
//! 3. The server health endpoint answers 200
//!
//! Reading the toolchain version means running `go version`, so that one
//! subprocess happens before the environment check. Nothing else is spawned
//! and no request is sent until the environment passes.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::info;

use super::installer::GO_BINARY;
use super::version::{extract_go_version, normalize, Version};
use crate::common::config::{Config, RuntimeConfig};
use crate::common::{CommandRunner, CommandSpec, Error, Result};

/// The environment variables the checks read, captured once
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    /// Value of the workspace variable (`GOPATH` by default)
    pub required: Option<String>,
    /// Value of the search path variable (`PATH` by default)
    pub path: Option<String>,
}

impl EnvSnapshot {
    /// Read the configured variables from the current process
    pub fn capture(config: &RuntimeConfig) -> Self {
        let read = |name: &str| std::env::var_os(name).map(|v| v.to_string_lossy().into_owned());
        Self {
            required: read(&config.required_env),
            path: read(&config.path_env),
        }
    }
}

/// Ask the Go toolchain for its version, e.g. `go1.21.3`
pub async fn go_runtime_version(runner: &dyn CommandRunner) -> Result<String> {
    let cmd = CommandSpec::new(GO_BINARY, ["version"]);
    let output = match runner.run(&cmd).await {
        Ok(output) => output.check(&cmd)?,
        Err(Error::SpawnFailed { .. }) => return Err(Error::ToolNotFound(GO_BINARY.to_string())),
        Err(e) => return Err(e),
    };

    extract_go_version(&output.output)
        .map(str::to_string)
        .ok_or_else(|| Error::VersionParse(output.output.trim().to_string()))
}

pub async fn check_runtime_version(runner: &dyn CommandRunner, minimum: &str) -> Result<Version> {
    info!("Checking golang runtime version.");

    let found = Version::parse(&normalize(&go_runtime_version(runner).await?))?;
    let required = Version::parse(&normalize(minimum))?;

    if found.less_than(&required) {
        return Err(Error::RuntimeVersion {
            found: found.to_string(),
            required: required.to_string(),
        });
    }

    info!("Success.");
    Ok(found)
}

pub fn check_environment(env: &EnvSnapshot, config: &RuntimeConfig) -> Result<()> {
    info!("Checking golang {}.", config.required_env);

    let value = match env.required.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(Error::EnvNotSet(config.required_env.clone())),
    };

    if !env.path.as_deref().unwrap_or_default().contains(value) {
        return Err(Error::EnvNotInPath {
            var: config.required_env.clone(),
            path_var: config.path_env.clone(),
        });
    }

    info!("Success.");
    Ok(())
}

/// GET the health URL and require exactly 200 OK
pub async fn check_server_running(url: &str, timeout_secs: u64) -> Result<()> {
    info!("Checking if server is running.");

    let unreachable = |e: reqwest::Error| Error::ServerUnreachable {
        url: url.to_string(),
        reason: e.to_string(),
    };

    // The health endpoint is the local server under test
    let mut builder = reqwest::Client::builder().no_proxy();
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    let client = builder.build().map_err(unreachable)?;

    let response = client.get(url).send().await.map_err(unreachable)?;
    if response.status() != StatusCode::OK {
        return Err(Error::ServerUnhealthy {
            status: response.status().to_string(),
        });
    }

    info!("Success.");
    Ok(())
}

/// Run all checks in order
pub async fn verify_runtime(
    runner: &dyn CommandRunner,
    config: &Config,
    env: &EnvSnapshot,
) -> Result<Version> {
    let version = check_runtime_version(runner, &config.runtime.min_go_version).await?;
    check_environment(env, &config.runtime)?;
    check_server_running(&config.server.health_url, config.server.request_timeout_secs).await?;
    Ok(version)
}
