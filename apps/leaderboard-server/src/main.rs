mod response;
mod routes;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::{Context, Result};
use asteroids_leaderboard::Leaderboard;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DB_PATH: &str = "leaderboard.db";

#[derive(Parser)]
#[command(name = "leaderboard-server", about = "Asteroids leaderboard HTTP server")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Listen address [env: LEADERBOARD_BIND_ADDR, default 127.0.0.1:3000]
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database file [env: LEADERBOARD_DB, default leaderboard.db]
    #[arg(long)]
    db: Option<String>,
}

fn from_env_or(flag: Option<String>, var: &str, default: &str) -> String {
    flag.or_else(|| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| default.to_string())
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let bind_addr = from_env_or(cli.bind, "LEADERBOARD_BIND_ADDR", DEFAULT_BIND_ADDR);
    let db_path = from_env_or(cli.db, "LEADERBOARD_DB", DEFAULT_DB_PATH);

    let board = Leaderboard::open(&db_path)
        .with_context(|| format!("failed to open leaderboard database {db_path}"))?;
    let board = web::Data::new(board);

    tracing::info!(%bind_addr, %db_path, "starting leaderboard server");

    HttpServer::new(move || {
        App::new()
            .app_data(board.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("failed to bind {bind_addr}"))?
    .run()
    .await?;

    Ok(())
}
