mod app;
mod cli;
mod data;
mod output;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Cli::parse();
    println!("If program fails, download data from {}", cli::DATA_SOURCE);
    app::run(&args)
}
