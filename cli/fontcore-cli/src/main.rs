//! Command-line front end exercising the rendering engine end to end:
//! load a glyph, print metrics, rasterize to PGM/PNG.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Batch(args) => commands::batch::run(args),
    }
}
