//! bike-cli - Command line front end for the bike-share rental dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bike-cli",
    version,
    about = "Bike sharing rental analysis dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: bike_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("bike-cli starting");
    bike_cmd::run(cli.command)
}
