// src/bin/cli.rs
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::eyre;
use n8n_watch::{cli, log};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = cli::Cli::parse();
    log::init(args.verbose).map_err(|e| eyre!("logging init failed: {e}"))?;
    Ok(cli::run(args))
}
