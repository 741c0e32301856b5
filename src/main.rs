//! minio-tests - runs the client test sequence against a MinIO server
//!
//! Usage: `minio-tests <alias> <corpus-datadir>`

use clap::Parser;
use minio_tests::{cli, commands::TestArgs, common::logging};

#[derive(Parser)]
#[command(name = "minio-tests", about = "Automated tests for a MinIO server")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: TestArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.args.verbose);

    cli::exit_on_error(cli::run_tests(cli.args).await);
}
