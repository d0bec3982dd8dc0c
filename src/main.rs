//! Answer grader · HTTP service
//!
//! Important env variables:
//!   PORT                   : u16 (default 3000)
//!   GRADER_CONFIG_PATH     : path to TOML config (rubrics, languages, penalties)
//!   LANGUAGETOOL_URL       : enables grammar checking and language detection
//!   OPENAI_API_KEY         : enables semantic similarity via embeddings
//!   OPENAI_BASE_URL        : default "https://api.openai.com/v1"
//!   OPENAI_EMBEDDING_MODEL : default "text-embedding-3-small"
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing::info;

use answer_grader::error::AppError;
use answer_grader::routes::build_router;
use answer_grader::state::AppState;
use answer_grader::telemetry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::from_env());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "grader", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      info!(target: "grader", "Shutdown signal received");
    })
    .await?;
  Ok(())
}
