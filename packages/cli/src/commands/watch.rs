use super::{connect, describe};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_content::Language;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Language whose hero title is echoed on each change
    #[arg(short, long)]
    pub lang: Option<Language>,
}

pub async fn watch(args: WatchArgs, config: &Config, cwd: &str) -> Result<()> {
    let sync = connect(config, cwd).await?;
    let language = args.lang.unwrap_or(config.default_language);
    let mut rx = sync.watch();

    println!(
        "{} {} (Ctrl-C to stop)",
        "👀 Watching".bright_blue().bold(),
        sync.document().to_string().bright_white()
    );

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if let Some(resolution) = state.resolution() {
                    println!(
                        "  {} {} \"{}\"",
                        "→".cyan(),
                        describe(resolution),
                        resolution.content.get(language).hero.title
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    sync.shutdown().await;
    Ok(())
}
