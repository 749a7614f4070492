//! GreenPoint library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Points { action } => cli::commands::points::handle(action, cfg),
        Commands::Resource { action } => cli::commands::resource::handle(action, cfg),
        Commands::Slots { .. } => cli::commands::slots::handle(&cli.command, cfg),
        Commands::Book { .. } => cli::commands::book::handle(&cli.command, cfg),
        Commands::Bookings { action } => cli::commands::bookings::handle(action, cfg),
        Commands::Map(args) => cli::commands::map::handle(args, cfg),
        Commands::Vehicle { action } => cli::commands::vehicle::handle(action, cfg),
        Commands::Promotion { action } => cli::commands::promotion::handle(action, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // test mode never reads the user's config file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
