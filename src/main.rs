mod cli;
mod config;
mod db;
mod error;
mod metrics;
mod models;
mod overview;
mod session;
mod tasks;
mod tracker;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::SmokingStatusRepo;
use session::Session;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }

        // Profile commands work without a session
        Some(Commands::Register { username }) => handlers::handle_register(&conn, &username)?,
        Some(Commands::Login { username }) => handlers::handle_login(&conn, &username)?,
        Some(Commands::Logout) => handlers::handle_logout(&conn)?,
        Some(Commands::Whoami) => handlers::handle_whoami(&conn, &config)?,

        // Everything else acts on the logged-in user's data
        Some(cmd) => {
            let session = Session::require(&conn)?;
            match cmd {
                Commands::Status { action } => {
                    handlers::handle_status(&conn, &session, &config, &action)?;
                }
                Commands::Plan { action } => {
                    handlers::handle_plan(&conn, &session, &action)?;
                }
                Commands::Stage { action } => {
                    handlers::handle_stage(&conn, &session, &action)?;
                }
                Commands::Record {
                    cigarettes,
                    health,
                    date,
                } => {
                    handlers::handle_record(
                        &conn,
                        &session,
                        &config,
                        cigarettes,
                        health.as_deref(),
                        date.as_deref(),
                    )?;
                }
                Commands::Progress { action } => {
                    handlers::handle_progress(&conn, &session, &config, &action)?;
                }
                Commands::Stats { week } => {
                    handlers::handle_stats(&conn, &session, &config, week)?;
                }
                Commands::Badges { all, r#type } => {
                    handlers::handle_badges(&conn, &session, all, r#type.as_deref())?;
                }
                Commands::Health => {
                    handlers::handle_health(&conn, &session)?;
                }
                Commands::Task { action } => {
                    handlers::handle_task(&conn, &session, &action)?;
                }
                Commands::Export { json } => {
                    handlers::handle_export(&conn, &session, &config, json)?;
                }
                Commands::Setup { .. }
                | Commands::Register { .. }
                | Commands::Login { .. }
                | Commands::Logout
                | Commands::Whoami => unreachable!(),
            }
        }

        // No subcommand → launch TUI
        None => {
            let session = ensure_setup(&conn, &mut config)?;
            tui::app::run(conn, config, session)?;
        }
    }

    Ok(())
}

/// Run the wizard when nobody is logged in or the user has no habit recorded yet.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<Session> {
    let ready = match Session::current(conn)? {
        Some(session) => SmokingStatusRepo::latest(conn, session.user_id)?.is_some(),
        None => false,
    };
    if !ready {
        eprintln!("No profile found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, true)?;
    }
    Session::require(conn).context("Setup was not completed")
}
