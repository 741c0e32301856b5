//! Top-level flows for both binaries
//!
//! Library code only returns errors; [`exit_on_error`] is the single place
//! that turns one into a process exit status.

use colored::Colorize;
use tracing::error;

use crate::commands::{LaunchArgs, TestArgs};
use crate::common::config::Config;
use crate::common::{CommandRunner, Result, SystemRunner};
use crate::setup::{self, installer, EnvSnapshot, LaunchOptions, Tool};
use crate::testing::{self, TestResult};

/// Verify the environment, then run the fixed sequence against `alias`
///
/// Verification failures are returned as errors; a failing test step is
/// reported inside the returned [`TestResult`].
pub async fn run_suite(
    runner: &dyn CommandRunner,
    config: &Config,
    env: &EnvSnapshot,
    alias: &str,
    corpus_dir: &str,
    install_client: bool,
) -> Result<TestResult> {
    setup::verify_runtime(runner, config, env).await?;

    let client = Tool::Client.config(&config.tools);
    if install_client {
        installer::install(runner, Tool::Client, client).await?;
    }

    let steps = testing::fixed_sequence(alias, corpus_dir, &config.tests);
    Ok(testing::run_tests(runner, &client.binary, alias, &steps).await)
}

/// `minio-tests` entry point
pub async fn run_tests(args: TestArgs) -> Result<()> {
    let config = Config::resolve(args.config.as_deref())?;
    let env = EnvSnapshot::capture(&config.runtime);

    let result = run_suite(
        &SystemRunner,
        &config,
        &env,
        &args.alias,
        &args.corpus_dir,
        args.install_client,
    )
    .await?;

    print_report(&result, args.json)?;
    result.into_result()
}

/// `run-minio` entry point
pub async fn run_server(args: LaunchArgs) -> Result<()> {
    let config = Config::resolve(args.config.as_deref())?;
    let opts = LaunchOptions {
        base_dir: args.base_dir,
        skip_install: args.skip_install,
        cleanup: args.cleanup,
    };

    setup::launch(&SystemRunner, &config, &opts).await
}

fn print_report(result: &TestResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    } else if result.passed() {
        println!(
            "\n{} {} ({} steps)\n",
            "✓".green().bold(),
            "Tests Passed".green().bold(),
            result.steps_total
        );
    } else {
        println!(
            "\n{} {} at step {} of {}\n",
            "✗".red().bold(),
            "Tests Failed".red().bold(),
            result.steps_run,
            result.steps_total
        );
    }
    Ok(())
}

/// Log the error and exit with its category's status
pub fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
}
