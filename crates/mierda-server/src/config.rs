//! Runtime configuration.
//!
//! Sources, later ones winning: the optional TOML file, `MIERDA_*`
//! environment variables, and the `DATABASE_URL` connection string.

use std::path::Path;

use anyhow::Context as _;
use mierda_api::DATABASE_URL_VAR;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  /// Connection string for the store. Routes answer 500 while unset.
  pub database_url:         Option<String>,
  /// argon2 PHC string checked by `DELETE /competitions/{key}`.
  pub delete_password_hash: Option<String>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3000 }

impl ServerConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("MIERDA"))
      .set_override_option("database_url", std::env::var(DATABASE_URL_VAR).ok())?
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// The connection string, with blank values treated as unset.
  pub fn database_url(&self) -> Option<&str> {
    self
      .database_url
      .as_deref()
      .map(str::trim)
      .filter(|url| !url.is_empty())
  }
}
