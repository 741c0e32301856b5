//! Test runner implementation
//!
//! Executes test steps one after another through the client, stopping at the
//! first step that exits non-zero.

use serde::Serialize;
use tracing::{debug, error, info};

use super::config::TestStep;
use crate::common::{CommandRunner, CommandSpec, Error, Result};

/// Output-format flag prepended to every client invocation
pub const JSON_FLAG: &str = "--json";

/// Result of a test run
#[derive(Debug)]
pub struct TestResult {
    pub name: String,
    pub steps_run: usize,
    pub steps_total: usize,
    /// The failing step's error, as returned by the client invocation
    pub error: Option<Error>,
}

/// Serializable view of a [`TestResult`]
#[derive(Debug, Clone, Serialize)]
pub struct TestSummary {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }

    pub fn summary(&self) -> TestSummary {
        TestSummary {
            name: self.name.clone(),
            passed: self.passed(),
            steps_run: self.steps_run,
            steps_total: self.steps_total,
            error: self.error.as_ref().map(ToString::to_string),
        }
    }

    /// The first failure, unchanged
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// `<client> --json <args...>`
pub fn client_command(client: &str, step: &TestStep) -> CommandSpec {
    CommandSpec::new(
        client,
        std::iter::once(JSON_FLAG.to_string()).chain(step.args.iter().cloned()),
    )
}

/// Pull the first `error.message` out of the client's JSON lines, falling
/// back to the raw output
pub fn failure_message(output: &str) -> String {
    output
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line.trim()).ok())
        .find(|v| v.get("status").and_then(|s| s.as_str()) == Some("error"))
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| output.trim().to_string())
}

/// Execute a single step
pub async fn run_step(runner: &dyn CommandRunner, client: &str, step: &TestStep) -> Result<()> {
    info!("Running test {}", step.name());

    let cmd = client_command(client, step);
    let output = runner.run(&cmd).await?;

    if !output.success {
        error!("Failed, {}.", output.output.trim_end());
        return Err(Error::command_failed(
            &cmd.to_string(),
            &output.status_string(),
            &failure_message(&output.output),
        ));
    }

    debug!(output = %output.output.trim_end(), "client output");
    info!("Success.");
    Ok(())
}

/// Run steps in order; nothing after the first failure is attempted
pub async fn run_tests(
    runner: &dyn CommandRunner,
    client: &str,
    name: &str,
    steps: &[TestStep],
) -> TestResult {
    let mut result = TestResult {
        name: name.to_string(),
        steps_run: 0,
        steps_total: steps.len(),
        error: None,
    };

    for step in steps {
        result.steps_run += 1;
        if let Err(e) = run_step(runner, client, step).await {
            result.error = Some(e);
            break;
        }
    }

    result
}
