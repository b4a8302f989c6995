pub mod edit;
pub mod init;
pub mod reset;
pub mod serve;
pub mod show;
pub mod watch;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use reset::{reset, ResetArgs};
pub use serve::{serve, ServeArgs};
pub use show::{show, ShowArgs};
pub use watch::{watch, WatchArgs};

use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use folio_content::ContentSource;
use folio_workspace::{ContentSync, Credential, FileStore, Resolution};
use std::sync::Arc;

/// Build a ContentSync over the configured file store and start it
pub(crate) async fn connect(config: &Config, cwd: &str) -> Result<ContentSync> {
    let store = FileStore::new(config.get_store_dir(cwd));
    let sync = ContentSync::new(
        Arc::new(store),
        Arc::new(config.identity_provider()),
        config.local_defaults(cwd)?,
        config.sync_config(),
    );
    sync.start().await?;
    Ok(sync)
}

pub(crate) async fn sign_in(sync: &ContentSync, token: Option<String>) -> Result<()> {
    let token = token.ok_or_else(|| {
        anyhow::anyhow!("An admin token is required (pass --token or set FOLIO_TOKEN)")
    })?;
    let session = sync.sessions().sign_in(&Credential::Token(token)).await?;
    eprintln!("  {} Signed in as {}", "✓".green(), session.email.bright_white());
    Ok(())
}

/// One-line provenance summary, printed to stderr
pub(crate) fn describe(resolution: &Resolution) -> String {
    let source = match resolution.source {
        ContentSource::Cloud => "cloud".green(),
        ContentSource::Local => "local".yellow(),
    };
    match &resolution.error {
        Some(error) => format!("source: {} ({})", source, error.red()),
        None => format!("source: {}", source),
    }
}
