use clap::Parser;
use seefood::{Cli, init_logging, run};
use std::process::ExitCode;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli).await
}
