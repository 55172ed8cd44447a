use clap::Parser;
use log::LevelFilter;

mod app;
mod cache;
mod commands;
mod content;
mod identity;
mod loader;
mod locations;
mod output;
mod quiz;
mod settings;
mod stores;
mod supabase;

use crate::commands::Cli;
use crate::settings::Settings;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    if let Err(e) = commands::run(cli, Settings::from_env()) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
