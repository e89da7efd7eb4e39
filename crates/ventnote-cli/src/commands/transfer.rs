use ventnote_core::config::BackupConfig;

use crate::commands::common::{build_controller, require_session, session_store};
use crate::error::CliError;

pub async fn run_backup(config: &BackupConfig) -> Result<(), CliError> {
    let session = require_session(&session_store(config))?;
    let controller = build_controller(config, Some(&session));

    controller.backup_db(&session.credential()).await?;
    println!("Backup uploaded for account '{}'", session.account.name);
    Ok(())
}

pub async fn run_restore(config: &BackupConfig) -> Result<(), CliError> {
    let session = require_session(&session_store(config))?;
    let controller = build_controller(config, Some(&session));

    controller.sync_db(&session.credential()).await?;
    println!(
        "Restored {} from account '{}'",
        config.snapshot_path().display(),
        session.account.name
    );
    Ok(())
}
