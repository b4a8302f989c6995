use super::{connect, sign_in};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_content::Language;
use folio_editor::{templates, ContentPath, Draft, EditorError, Mutation, MutationError};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Admin token
    #[arg(long, env = "FOLIO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Language to edit (defaults to the configured language)
    #[arg(short, long)]
    pub lang: Option<Language>,

    /// Set a field, e.g. `hero.title="CTO"`; text fields take VALUE verbatim, others read it as JSON
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    pub set: Vec<Assignment>,

    /// JSON file holding an array of mutations
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Insert a blank experience entry at the top
    #[arg(long)]
    pub add_experience: bool,

    /// Append a blank skill category
    #[arg(long)]
    pub add_skill_category: bool,
}

/// A `PATH=VALUE` pair from the command line, typed once the target field is known
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    path: ContentPath,
    raw: String,
}

fn parse_assignment(input: &str) -> Result<Assignment, String> {
    let (path, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("Expected PATH=VALUE, got `{}`", input))?;
    let path: ContentPath = path.trim().parse().map_err(|e| format!("{}", e))?;
    Ok(Assignment {
        path,
        raw: raw.to_string(),
    })
}

impl Assignment {
    /// Apply to `draft`. A text field gets the raw text even when it looks
    /// like a number; anything else reads it as JSON first and falls back to
    /// text when the tree rejects the typed value.
    fn apply_to(&self, draft: &mut Draft) -> Result<(), EditorError> {
        let text = Value::String(self.raw.clone());
        let typed = match draft.value_at(&self.path)? {
            Some(Value::String(_)) => None,
            _ => serde_json::from_str::<Value>(&self.raw)
                .ok()
                .filter(|value| *value != text),
        };

        if let Some(value) = typed {
            match draft.apply(self.set(value)) {
                Err(EditorError::Mutation(MutationError::InvalidStructure(_))) => {}
                other => return other.map(|_| ()),
            }
        }
        draft.apply(self.set(text)).map(|_| ())
    }

    fn set(&self, value: Value) -> Mutation {
        Mutation::SetField {
            path: self.path.clone(),
            value,
        }
    }
}

pub async fn edit(args: EditArgs, config: &Config, cwd: &str) -> Result<()> {
    let mut mutations = Vec::new();
    if args.add_experience {
        mutations.push(templates::add_experience()?);
    }
    if args.add_skill_category {
        mutations.push(templates::add_skill_category()?);
    }
    if let Some(script) = &args.script {
        let source = std::fs::read_to_string(script)
            .with_context(|| format!("Cannot read {}", script.display()))?;
        let scripted: Vec<Mutation> = serde_json::from_str(&source)
            .with_context(|| format!("Invalid mutation script {}", script.display()))?;
        mutations.extend(scripted);
    }

    let sync = connect(config, cwd).await?;
    sync.ready().await?;
    sign_in(&sync, args.token).await?;

    let language = args.lang.unwrap_or(config.default_language);
    let mut draft = sync.open_editor(language)?;
    let count = mutations.len() + args.set.len();
    draft.apply_all(mutations)?;
    // Typed against the draft as it stands after the mutations above
    for assignment in &args.set {
        assignment.apply_to(&mut draft)?;
    }

    if !draft.is_dirty() {
        println!("{}", "Nothing to save".yellow());
        draft.cancel();
        sync.shutdown().await;
        return Ok(());
    }

    let saved = sync.save(&draft).await;
    sync.shutdown().await;
    saved?;

    println!(
        "{} Applied {} edit(s) to {} content",
        "✅".green(),
        count,
        language.to_string().bright_white()
    );
    Ok(())
}
