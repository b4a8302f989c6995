use super::{connect, describe};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use folio_content::Language;
use folio_editor::ContentPath;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Language to print (defaults to the configured language)
    #[arg(short, long)]
    pub lang: Option<Language>,

    /// Only print the value at this path, e.g. `experience.items.0.role`
    #[arg(short, long)]
    pub path: Option<ContentPath>,
}

pub async fn show(args: ShowArgs, config: &Config, cwd: &str) -> Result<()> {
    let sync = connect(config, cwd).await?;
    let resolution = sync.ready().await?;
    sync.shutdown().await;

    let language = args.lang.unwrap_or(config.default_language);
    let tree = serde_json::to_value(resolution.content.get(language))?;

    let value = match &args.path {
        Some(path) => path
            .lookup(&tree)
            .ok_or_else(|| anyhow!("Nothing at path: {}", path))?,
        None => &tree,
    };

    eprintln!("{} [{}]", describe(&resolution), language);
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
