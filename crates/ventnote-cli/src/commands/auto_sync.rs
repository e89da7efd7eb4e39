use ventnote_core::config::BackupConfig;
use ventnote_core::util::{format_millis, unix_millis_now};
use ventnote_core::{AutoSync, AutoSyncOutcome};

use crate::commands::common::{build_controller, open_scheduler, require_session, session_store};
use crate::error::CliError;

pub async fn run_auto_sync(config: &BackupConfig) -> Result<(), CliError> {
    let session = require_session(&session_store(config))?;
    let controller = build_controller(config, Some(&session));
    let scheduler = open_scheduler(config).await?;

    let outcome = AutoSync::new(&scheduler, &controller, config.max_sync_attempts)
        .run(&session.credential(), unix_millis_now())
        .await?;

    match outcome {
        AutoSyncOutcome::Synced { remaining } => {
            println!("Sync completed ({})", attempts_label(remaining));
            Ok(())
        }
        AutoSyncOutcome::Failed { error, remaining } => {
            eprintln!("Sync failed ({})", attempts_label(remaining));
            Err(error.into())
        }
        AutoSyncOutcome::Exhausted { window_started_at } => {
            println!(
                "No sync attempts left in the window opened at {}",
                format_millis(window_started_at)
            );
            Ok(())
        }
    }
}

pub fn attempts_label(remaining: i32) -> String {
    match remaining {
        1 => "1 attempt left in this window".to_string(),
        count => format!("{count} attempts left in this window"),
    }
}
