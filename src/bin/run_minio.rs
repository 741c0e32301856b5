//! run-minio - installs a MinIO server and runs it against a fresh directory

use clap::Parser;
use minio_tests::{cli, commands::LaunchArgs, common::logging};

#[derive(Parser)]
#[command(name = "run-minio", about = "Install and start a MinIO server for automated tests")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: LaunchArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.args.verbose);

    cli::exit_on_error(cli::run_server(cli.args).await);
}
