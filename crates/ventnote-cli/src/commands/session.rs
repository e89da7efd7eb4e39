use ventnote_core::config::BackupConfig;
use ventnote_core::session::StoredSession;
use ventnote_core::util::normalize_text_option;
use ventnote_core::SessionAccount;

use crate::commands::common::{build_controller, session_store};
use crate::error::CliError;

pub fn build_session(
    account: &str,
    token: &str,
    email: Option<String>,
) -> Result<StoredSession, CliError> {
    let name = normalize_text_option(Some(account.to_string())).ok_or(CliError::EmptyAccount)?;
    let access_token =
        normalize_text_option(Some(token.to_string())).ok_or(CliError::EmptyToken)?;
    Ok(StoredSession {
        account: SessionAccount {
            name,
            email: normalize_text_option(email),
        },
        access_token,
    })
}

pub fn run_login(
    config: &BackupConfig,
    account: &str,
    token: &str,
    email: Option<String>,
) -> Result<(), CliError> {
    let session = build_session(account, token, email)?;
    let store = session_store(config);
    store.save(&session)?;

    let email_label = session.account.email.as_deref().unwrap_or("(no email)");
    println!("Signed in as '{}' ({email_label})", session.account.name);
    Ok(())
}

pub async fn run_logout(config: &BackupConfig) -> Result<(), CliError> {
    let session = session_store(config).load()?;
    let controller = build_controller(config, session.as_ref());

    controller.logout().await?;
    match session {
        Some(session) => println!("Signed out of '{}'", session.account.name),
        None => println!("No stored session; nothing to sign out"),
    }
    Ok(())
}
