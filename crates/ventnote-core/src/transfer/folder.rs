//! Directory-backed drive used by the CLI.

use std::path::{Path, PathBuf};

use futures_util::stream::{self, StreamExt};

use super::{DriveCredential, RemoteTransfer, TransferError, TransferResult, TransferStream};

const DEFAULT_SNAPSHOT_NAME: &str = "notes.db";

/// Mirrors the local snapshot into `<drive_dir>/<account>/<snapshot name>`.
///
/// Copies go through a `.partial` sibling and a rename so a reader never sees
/// a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FolderDrive {
    snapshot_path: PathBuf,
    drive_dir: PathBuf,
}

impl FolderDrive {
    pub fn new(snapshot_path: impl Into<PathBuf>, drive_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            drive_dir: drive_dir.into(),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Location of the remote copy for `credential`'s account.
    pub fn remote_path(&self, credential: &DriveCredential) -> TransferResult<PathBuf> {
        let account = validate_account(&credential.account)?;
        let file_name = self
            .snapshot_path
            .file_name()
            .map_or_else(|| DEFAULT_SNAPSHOT_NAME.into(), ToOwned::to_owned);
        Ok(self.drive_dir.join(account).join(file_name))
    }
}

impl RemoteTransfer for FolderDrive {
    fn upload_snapshot(&self, credential: &DriveCredential) -> TransferStream {
        let source = self.snapshot_path.clone();
        let target = self.remote_path(credential);

        stream::once(async move {
            let target = target?;
            if !tokio::fs::try_exists(&source).await? {
                return Err(TransferError::Remote(format!(
                    "Failed to Upload the DB: no snapshot at {}",
                    source.display()
                )));
            }
            copy_atomically(&source, &target).await?;
            tracing::info!(target = %target.display(), "Uploaded snapshot");
            Ok(())
        })
        .boxed()
    }

    fn download_snapshot(&self, credential: &DriveCredential) -> TransferStream {
        let target = self.snapshot_path.clone();
        let source = self.remote_path(credential);
        let account = credential.account.clone();

        stream::once(async move {
            let source = source?;
            if !tokio::fs::try_exists(&source).await? {
                return Err(TransferError::Remote(format!(
                    "Failed to Sync the DB: no backup found for account '{account}'"
                )));
            }
            copy_atomically(&source, &target).await?;
            tracing::info!(source = %source.display(), "Restored snapshot");
            Ok(())
        })
        .boxed()
    }
}

async fn copy_atomically(source: &Path, target: &Path) -> TransferResult<()> {
    if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut partial_name = target
        .file_name()
        .map_or_else(|| DEFAULT_SNAPSHOT_NAME.into(), ToOwned::to_owned);
    partial_name.push(".partial");
    let partial = target.with_file_name(partial_name);

    tokio::fs::copy(source, &partial).await?;
    tokio::fs::rename(&partial, target).await?;
    Ok(())
}

fn validate_account(account: &str) -> TransferResult<&str> {
    let account = account.trim();
    if account.is_empty() {
        return Err(TransferError::InvalidCredential(
            "account must not be empty".to_string(),
        ));
    }
    if account == "." || account == ".." || account.contains(['/', '\\']) {
        return Err(TransferError::InvalidCredential(format!(
            "account '{account}' is not a valid drive folder name"
        )));
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    async fn outcome(stream: TransferStream) -> TransferResult<()> {
        let mut stream = stream;
        stream.next().await.unwrap()
    }

    #[tokio::test]
    async fn upload_then_download_restores_snapshot() {
        let tmp = tempdir().unwrap();
        let snapshot = tmp.path().join("local").join("notes.db");
        std::fs::create_dir_all(snapshot.parent().unwrap()).unwrap();
        std::fs::write(&snapshot, b"first").unwrap();

        let drive = FolderDrive::new(&snapshot, tmp.path().join("drive"));
        let credential = DriveCredential::new("personal", "token");

        outcome(drive.upload_snapshot(&credential)).await.unwrap();
        let remote = drive.remote_path(&credential).unwrap();
        assert_eq!(std::fs::read(&remote).unwrap(), b"first");

        std::fs::write(&snapshot, b"changed locally").unwrap();
        outcome(drive.download_snapshot(&credential)).await.unwrap();
        assert_eq!(std::fs::read(&snapshot).unwrap(), b"first");
    }

    #[tokio::test]
    async fn upload_without_snapshot_reports_remote_failure() {
        let tmp = tempdir().unwrap();
        let drive = FolderDrive::new(tmp.path().join("missing.db"), tmp.path().join("drive"));

        let error = outcome(drive.upload_snapshot(&DriveCredential::new("personal", "t")))
            .await
            .unwrap_err();

        assert!(error.to_string().starts_with("Failed to Upload the DB"));
    }

    #[tokio::test]
    async fn download_without_backup_reports_remote_failure() {
        let tmp = tempdir().unwrap();
        let drive = FolderDrive::new(tmp.path().join("notes.db"), tmp.path().join("drive"));

        let error = outcome(drive.download_snapshot(&DriveCredential::new("work", "t")))
            .await
            .unwrap_err();

        assert!(matches!(error, TransferError::Remote(_)));
        assert!(error.to_string().contains("'work'"));
    }

    #[test]
    fn account_names_cannot_escape_drive_dir() {
        let drive = FolderDrive::new("notes.db", "drive");
        for account in ["", "  ", "..", "a/b", "a\\b"] {
            assert!(
                drive
                    .remote_path(&DriveCredential::new(account, "t"))
                    .is_err(),
                "{account:?} should be rejected"
            );
        }
        assert_eq!(
            drive
                .remote_path(&DriveCredential::new(" personal ", "t"))
                .unwrap(),
            PathBuf::from("drive").join("personal").join("notes.db")
        );
    }

    #[tokio::test]
    async fn transfer_is_lazy_until_polled() {
        let tmp = tempdir().unwrap();
        let snapshot = tmp.path().join("notes.db");
        std::fs::write(&snapshot, b"data").unwrap();
        let drive = FolderDrive::new(&snapshot, tmp.path().join("drive"));
        let credential = DriveCredential::new("personal", "t");

        let pending = drive.upload_snapshot(&credential);
        assert!(!drive.remote_path(&credential).unwrap().exists());

        outcome(pending).await.unwrap();
        assert!(drive.remote_path(&credential).unwrap().exists());
    }
}
