mod argparse;
mod commands;
mod filter_args;
mod utils;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = argparse::Cli::parse();
    utils::init_logger(cli.verbose);

    commands::handle_command(cli).await
}
