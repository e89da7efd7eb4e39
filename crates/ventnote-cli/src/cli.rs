use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ventnote")]
#[command(about = "Back up and restore VentNote notes on a remote drive")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Local notes database to back up or restore
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Directory acting as the remote drive
    #[arg(long, global = true, value_name = "DIR")]
    pub drive_dir: Option<PathBuf>,

    /// Database holding the sync window counters
    #[arg(long, global = true, value_name = "PATH")]
    pub state_db: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload the local database to the drive
    Backup,
    /// Replace the local database with the drive copy
    Restore,
    /// Restore from the drive if the current window still has attempts left
    AutoSync,
    /// Show the sync window and signed-in account
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a drive session for later commands
    Login {
        /// Drive account name
        #[arg(long)]
        account: String,
        /// Access token for the drive
        #[arg(long)]
        token: String,
        /// Optional email shown in status output
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Inspect or override the attempt budget
    Attempts {
        #[command(subcommand)]
        command: AttemptsCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AttemptsCommands {
    /// Overwrite the attempts left in the current window
    Set {
        /// Remaining attempts (must not be negative)
        #[arg(value_parser = parse_attempt_arg, allow_hyphen_values = true)]
        count: i32,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn parse_attempt_arg(raw: &str) -> Result<i32, String> {
    ventnote_core::config::parse_attempts(raw)
}
