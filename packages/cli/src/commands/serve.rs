use super::connect;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn serve(args: ServeArgs, config: &Config, cwd: &str) -> Result<()> {
    let mut config = config.clone();
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    let addr = config.http_addr()?;

    let sync = Arc::new(connect(&config, cwd).await?);

    println!("{}", "🚀 Starting Folio content API...".bright_blue().bold());
    println!("  Document: {}", sync.document().to_string().bright_white());
    println!("  Listening: {}", format!("http://{}", addr).cyan());
    println!();
    println!("  GET /api/status");
    println!("  GET /api/content?lang=en|zh");
    println!("  GET /api/stream");

    tokio::select! {
        served = folio_workspace::server::serve(sync.clone(), addr) => served?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    sync.shutdown().await;
    Ok(())
}
