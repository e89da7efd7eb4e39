use ventnote_core::config::BackupConfig;

use crate::commands::common::open_scheduler;
use crate::error::CliError;

pub async fn run_set_attempts(config: &BackupConfig, count: i32) -> Result<(), CliError> {
    let scheduler = open_scheduler(config).await?;
    scheduler.set_max_sync_attempt(count).await?;
    println!("Remaining sync attempts set to {count}");
    Ok(())
}
