//! VentNote CLI - back up, restore and budget syncs of the notes database
//!
//! Wires the core scheduler and controllers to a folder-backed drive and a
//! file-backed session.

mod cli;
mod commands;
mod error;


use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use ventnote_core::config::BackupConfig;

use crate::cli::{AttemptsCommands, Cli, Commands};
use crate::commands::common::{load_config, PathOverrides};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "ventnote=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let overrides = PathOverrides {
        db_path: cli.db_path,
        drive_dir: cli.drive_dir,
        state_db: cli.state_db,
    };

    match cli.command {
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())
        }
        command => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            dispatch(command, &config).await
        }
    }
}

async fn dispatch(command: Commands, config: &BackupConfig) -> Result<(), CliError> {
    match command {
        Commands::Backup => commands::transfer::run_backup(config).await,
        Commands::Restore => commands::transfer::run_restore(config).await,
        Commands::AutoSync => commands::auto_sync::run_auto_sync(config).await,
        Commands::Status { json } => commands::status::run_status(config, json).await,
        Commands::Login {
            account,
            token,
            email,
        } => commands::session::run_login(config, &account, &token, email),
        Commands::Logout => commands::session::run_logout(config).await,
        Commands::Attempts {
            command: AttemptsCommands::Set { count },
        } => commands::attempts::run_set_attempts(config, count).await,
        Commands::Completions { .. } => Ok(()),
    }
}
