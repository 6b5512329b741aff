use actix_web::{web::Data, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use taskboard::db::db::Db;
use taskboard::libs::config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the SQLite database file (falls back to TASKBOARD_DB)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
    /// Socket address to serve on (falls back to TASKBOARD_LISTEN)
    #[arg(long, value_name = "ADDR")]
    listen: Option<String>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.db, cli.listen)?;

    // Bring the schema up to date before accepting requests; an unreachable
    // store aborts startup.
    Db::init(&config).with_context(|| format!("cannot initialize database at {}", config.db_path.display()))?;

    tracing::info!(db = %config.db_path.display(), listen = %config.listen, "starting task board");

    let listen = config.listen.clone();
    let data = Data::new(config);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(taskboard::web::routes))
        .bind(listen.as_str())
        .with_context(|| format!("cannot bind {}", listen))?
        .run()
        .await?;

    Ok(())
}
