// this_file: crates/chartdraw-cli/src/main.rs

//! chartdraw CLI - Draw demo charts through any backend

mod cli;
mod commands;
mod scenes;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Render(args) => commands::render::run(args),
    }
}
