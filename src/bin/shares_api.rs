use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use niche_parser::shares::{self, store, AppState};

#[derive(Parser)]
#[command(name = "shares_api", about = "HTTP API for saved ranking shares")]
struct Cli {
    /// SQLite file holding share documents
    #[arg(long, env = "SHARES_DB", default_value = "data/shares.sqlite")]
    db: PathBuf,
    /// Address to listen on
    #[arg(long, env = "SHARES_BIND", default_value = "127.0.0.1:7071")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let conn = store::connect(&cli.db)
        .with_context(|| format!("Failed to open {}", cli.db.display()))?;
    let state = AppState::new(conn)?;
    tracing::info!(db = %cli.db.display(), "share store ready");

    shares::serve(cli.bind, state).await
}
