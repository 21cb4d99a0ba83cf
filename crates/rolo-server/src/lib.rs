//! Process glue for the Rolo server: configuration, router assembly, and
//! shutdown handling. The binary in `main.rs` wires these together.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Json, Router, routing::get};
use config::{ConfigError, Environment, File};
use rolo_core::store::ContactStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file,
/// `ROLO_`-prefixed environment variables (`.env` is loaded into the
/// environment by the binary before this runs).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load configuration from `file` (optional) and the process environment.
pub fn load_config(file: &Path) -> Result<ServerConfig, ConfigError> {
  load_config_with(file, Environment::with_prefix("ROLO"))
}

/// Like [`load_config`] but with an explicit environment source.
pub fn load_config_with(
  file: &Path,
  env: Environment,
) -> Result<ServerConfig, ConfigError> {
  config::Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 8080)?
    .set_default("store_path", "rolo.db")?
    .add_source(File::from(file).required(false))
    .add_source(env)
    .build()?
    .try_deserialize()
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

/// The full application: liveness route, contacts API, request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/", get(health))
    .merge(rolo_api::api_router(store))
    .method_not_allowed_fallback(rolo_api::error::method_not_allowed)
    .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolve on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
  let interrupt = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::warn!(error = %e, "cannot listen for ctrl-c");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::warn!(error = %e, "cannot listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = interrupt => {}
    _ = terminate => {}
  }
  tracing::info!("shutdown signal received, draining connections");
}
