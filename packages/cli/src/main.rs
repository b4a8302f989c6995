mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, init, reset, serve, show, watch, EditArgs, InitArgs, ResetArgs, ServeArgs, ShowArgs,
    WatchArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Folio CLI - portfolio content sync and editing
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a folio.config.json
    Init(InitArgs),

    /// Print the resolved content
    Show(ShowArgs),

    /// Follow the content document and report every change
    Watch(WatchArgs),

    /// Apply edits to one language and save
    Edit(EditArgs),

    /// Overwrite the document with the default content
    Reset(ResetArgs),

    /// Serve the read-only content API
    Serve(ServeArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, cwd: &str) -> anyhow::Result<()> {
    if let Command::Init(args) = command {
        return init(args, cwd);
    }

    let config = Config::load(cwd)?;
    match command {
        Command::Init(_) => Ok(()),
        Command::Show(args) => show(args, &config, cwd).await,
        Command::Watch(args) => watch(args, &config, cwd).await,
        Command::Edit(args) => edit(args, &config, cwd).await,
        Command::Reset(args) => reset(args, &config, cwd).await,
        Command::Serve(args) => serve(args, &config, cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match std::env::current_dir() {
        Ok(cwd) => run(cli.command, &cwd.display().to_string()).await,
        Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {}", e)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
