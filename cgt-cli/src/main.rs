//! CGT CLI - analyze how much observed warming CO2 leaves unexplained, and how
//! groundwater levels lead temperature.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cgt-cli",
    version,
    about = "CO2 gap, groundwater lag and climate trend toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cgt_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cgt_cmd::run(cli.command).await
}
