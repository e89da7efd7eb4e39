use std::env;
use std::path::{Path, PathBuf};

use ventnote_core::config::{default_config_path, BackupConfig};
use ventnote_core::db::LibSqlCounterStore;
use ventnote_core::session::{FileSession, StoredSession};
use ventnote_core::transfer::FolderDrive;
use ventnote_core::{BackupController, SyncScheduler};

use crate::error::CliError;

const SESSION_FILE_NAME: &str = "session.json";

pub type CliController = BackupController<FolderDrive, FileSession>;

/// Paths given on the command line; these win over env and file values.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub db_path: Option<PathBuf>,
    pub drive_dir: Option<PathBuf>,
    pub state_db: Option<PathBuf>,
}

pub fn load_config(
    config_path: Option<&Path>,
    overrides: &PathOverrides,
) -> Result<BackupConfig, CliError> {
    let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
    let mut config = BackupConfig::load_from_path(&path).map_err(CliError::Config)?;
    config
        .apply_env_overrides(|key| env::var(key).ok())
        .map_err(CliError::Config)?;
    apply_overrides(&mut config, overrides);
    Ok(config)
}

pub fn apply_overrides(config: &mut BackupConfig, overrides: &PathOverrides) {
    if let Some(path) = &overrides.db_path {
        config.snapshot_path = Some(path.clone());
    }
    if let Some(dir) = &overrides.drive_dir {
        config.drive_dir = Some(dir.clone());
    }
    if let Some(path) = &overrides.state_db {
        config.state_db_path = Some(path.clone());
    }
}

/// The session file sits next to the counter database.
pub fn session_path(config: &BackupConfig) -> PathBuf {
    let state_db = config.state_db_path();
    state_db
        .parent()
        .map_or_else(|| PathBuf::from(SESSION_FILE_NAME), |dir| dir.join(SESSION_FILE_NAME))
}

pub fn session_store(config: &BackupConfig) -> FileSession {
    FileSession::new(session_path(config))
}

pub fn require_session(store: &FileSession) -> Result<StoredSession, CliError> {
    store.load()?.ok_or(CliError::NotSignedIn)
}

pub async fn open_scheduler(
    config: &BackupConfig,
) -> Result<SyncScheduler<LibSqlCounterStore>, CliError> {
    let store = LibSqlCounterStore::open(config.state_db_path()).await?;
    Ok(SyncScheduler::new(store))
}

/// Controller over the folder drive, with the stored account already published.
pub fn build_controller(
    config: &BackupConfig,
    session: Option<&StoredSession>,
) -> CliController {
    let remote = FolderDrive::new(config.snapshot_path(), config.drive_dir());
    let controller = BackupController::new(remote, session_store(config));
    if let Some(session) = session {
        controller.sign_in(session.account.clone());
    }
    controller
}
