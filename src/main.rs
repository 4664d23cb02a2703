use anyhow::Result;
use clap::Parser;
use pv_clearsky::{cli, telemetry};

fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = cli::Cli::parse();
    cli::run(args)
}
