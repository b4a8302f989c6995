use crate::config::{AdminConfig, Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store directory
    #[arg(short, long, default_value = ".folio/store")]
    pub store_dir: String,

    /// Admin email to register
    #[arg(long)]
    pub admin: Option<String>,

    /// Token for the admin
    #[arg(long, requires = "admin")]
    pub token: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Folio content store...".bright_blue().bold());

    let store_dir = PathBuf::from(cwd).join(&args.store_dir);
    if !store_dir.exists() {
        fs::create_dir_all(&store_dir)?;
        println!("  {} Created {}/", "✓".green(), args.store_dir);
    }

    let admins = match (args.admin, args.token) {
        (Some(email), Some(token)) => vec![AdminConfig { email, token }],
        (Some(email), None) => {
            println!(
                "  {} No token given for {}; add one to {} before editing",
                "⚠️".yellow(),
                email,
                DEFAULT_CONFIG_NAME
            );
            vec![]
        }
        _ => vec![],
    };

    let config = Config {
        store_dir: args.store_dir.clone(),
        admins,
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Store initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: folio show");
    println!("  2. Run: folio reset --token <token> to seed the document");
    println!("  3. Run: folio serve");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(force: bool) -> InitArgs {
        InitArgs {
            store_dir: "store".to_string(),
            admin: Some("owner@example.com".to_string()),
            token: Some("t0ken".to_string()),
            force,
        }
    }

    #[test]
    fn test_init_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(args(false), cwd).unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.store_dir, "store");
        assert_eq!(config.admins[0].token, "t0ken");
        assert!(dir.path().join("store").is_dir());
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, "{}").unwrap();

        init(args(false), cwd).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        init(args(true), cwd).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
