//! HTTP server wiring for the alumnos grade book.
//!
//! Loads [`ServerConfig`], and mounts the JSON API under `/v1` with request
//! tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use alumnos_core::{GradeBook, store::GradeStore};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ALUMNOS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  /// When set, pending grades list every missing partial in `1..=n`.
  pub expected_partials: Option<u32>,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, and the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080)?
      .set_default("store_path", "alumnos.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ALUMNOS"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router for `store`.
pub fn router<S>(store: S, config: &ServerConfig) -> Router
where
  S: GradeStore + 'static,
{
  let book = GradeBook::new(store).with_expected_partials(config.expected_partials);
  Router::new()
    .nest("/v1", alumnos_api::api_router(Arc::new(book)))
    .layer(TraceLayer::new_for_http())
}
