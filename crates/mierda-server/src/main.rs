//! mierda server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus the
//! environment, and serves the competition API over HTTP.
//!
//! # Delete password
//!
//! To generate the argon2 PHC string for `delete_password_hash`:
//!
//! ```sh
//! cargo run -p mierda-server --bin server -- --hash-password
//! ```

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use mierda_api::AppState;
use mierda_core::schema::{OpponentsType, OrganisationColumn};
use mierda_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "FC Mierda competition API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,

  /// Create the competition table (UK spelling, JSONB opponents) if it does
  /// not exist yet.
  #[arg(long)]
  init_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  let server_cfg = ServerConfig::load(&cli.config)?;

  let store = match server_cfg.database_url() {
    Some(url) => Some(SqliteStore::new(url)),
    None => {
      tracing::warn!(
        "{} not set; every request will fail until it is configured",
        mierda_api::DATABASE_URL_VAR
      );
      None
    }
  };

  if cli.init_schema {
    let store = store
      .as_ref()
      .context("--init-schema needs a database connection string")?;
    store
      .create_table(OrganisationColumn::Uk, OpponentsType::Json)
      .await
      .with_context(|| format!("failed to create schema in {:?}", store.path()))?;
    tracing::info!(path = ?store.path(), "competition table ready");
  }

  if server_cfg.delete_password_hash.is_none() {
    tracing::warn!("delete_password_hash not set; deletes are disabled");
  }

  let state = AppState {
    store:                store.map(Arc::new),
    delete_password_hash: server_cfg.delete_password_hash.as_deref().map(Arc::from),
  };

  let app = mierda_api::api_router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
