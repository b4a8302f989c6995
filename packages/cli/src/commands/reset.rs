use super::{connect, sign_in};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_workspace::{AssumeYes, Confirm, ResetOutcome};
use std::io::{BufRead, Write};

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Admin token
    #[arg(long, env = "FOLIO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Asks on the terminal; anything but y/yes declines
struct Prompt;

impl Confirm for Prompt {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt.yellow());
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

pub async fn reset(args: ResetArgs, config: &Config, cwd: &str) -> Result<()> {
    let sync = connect(config, cwd).await?;
    sync.ready().await?;
    sign_in(&sync, args.token).await?;

    let outcome = if args.yes {
        sync.force_reset(&AssumeYes).await
    } else {
        sync.force_reset(&Prompt).await
    };
    sync.shutdown().await;

    match outcome? {
        ResetOutcome::Reset => println!(
            "{} {} reset to default content",
            "✅".green(),
            sync.document().to_string().bright_white()
        ),
        ResetOutcome::Cancelled => println!("{}", "Reset cancelled".yellow()),
    }
    Ok(())
}
