mod cli;
mod config;
mod db;
mod models;
mod prayer_times;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Setup only touches the config file
    if let Some(Commands::Setup(args)) = &cli.command {
        return handlers::handle_setup(&mut config, args);
    }

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // WAL lets an editing shell write while the dashboard is reading
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;
    log::debug!("opened {:?}", db_path);

    match cli.command {
        Some(Commands::Times { date, json }) => {
            handlers::handle_times(&conn, &config, date.as_deref(), json)?;
        }
        Some(Commands::Adhan { prayer, time, date }) => {
            handlers::handle_adhan(&conn, &prayer, &time, date.as_deref())?;
        }
        Some(Commands::Iqama {
            prayer,
            fixed,
            offset,
            date,
        }) => {
            handlers::handle_iqama(&conn, &prayer, fixed.as_deref(), offset, date.as_deref())?;
        }
        Some(Commands::Clear { date }) => {
            handlers::handle_clear(&conn, date.as_deref())?;
        }
        Some(Commands::Jumuah { action }) => {
            handlers::handle_jumuah(&conn, &action)?;
        }
        Some(Commands::Event { action }) => {
            handlers::handle_event(&conn, &action)?;
        }
        Some(Commands::Sync { force }) => {
            handlers::handle_sync(&conn, &config, force)?;
        }
        Some(Commands::Setup(_)) => unreachable!(),

        // No subcommand → launch TUI
        None => {
            let today = chrono::Local::now().date_naive();
            handlers::auto_sync(&conn, &config, today);
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}
