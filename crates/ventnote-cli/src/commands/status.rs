use serde::Serialize;
use ventnote_core::config::BackupConfig;
use ventnote_core::scheduler::{opens_new_window, SYNC_WINDOW_MILLIS};
use ventnote_core::util::{format_millis, unix_millis_now};
use ventnote_core::SyncCounterState;

use crate::commands::common::{open_scheduler, session_store};
use crate::error::CliError;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    pub account: Option<String>,
    pub window_started_at: i64,
    pub window_started_at_iso: String,
    pub attempts_remaining: i32,
    pub max_sync_attempts: i32,
    /// True when the next sync run would start a fresh window.
    pub window_expired: bool,
}

pub fn build_status_report(
    state: &SyncCounterState,
    account: Option<String>,
    max_sync_attempts: i32,
    now: i64,
) -> StatusReport {
    StatusReport {
        account,
        window_started_at: state.last_sync_day_millis,
        window_started_at_iso: format_millis(state.last_sync_day_millis),
        attempts_remaining: state.attempt_count,
        max_sync_attempts,
        window_expired: opens_new_window(state.last_sync_day_millis, now),
    }
}

pub fn format_status_lines(report: &StatusReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Account: {}",
        report.account.as_deref().unwrap_or("(signed out)")
    )];
    if report.window_expired {
        lines.push(format!(
            "Window: expired (last opened {}), next sync grants {} attempts",
            report.window_started_at_iso, report.max_sync_attempts
        ));
    } else {
        lines.push(format!(
            "Window: opened {}, closes {}",
            report.window_started_at_iso,
            format_millis(report.window_started_at + SYNC_WINDOW_MILLIS)
        ));
        lines.push(format!("Attempts left: {}", report.attempts_remaining));
    }
    lines
}

pub async fn run_status(config: &BackupConfig, as_json: bool) -> Result<(), CliError> {
    let scheduler = open_scheduler(config).await?;
    let state = scheduler.state().await?;
    let account = session_store(config)
        .load()?
        .map(|session| session.account.name);
    let report = build_status_report(&state, account, config.max_sync_attempts, unix_millis_now());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for line in format_status_lines(&report) {
        println!("{line}");
    }
    Ok(())
}
