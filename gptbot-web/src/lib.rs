//! # gptbot-web
//!
//! Small HTTP front end powered by axum.
//!
//! Serves:
//! - `GET /`            — hello
//! - `GET /word/{word}` — dictionary lookup: asks the chat responder what the
//!   word means, on the fixed `diction` function and a fixed chat id, and
//!   returns the answer as plain text.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use chat_session::{ChatFunction, ChatResponder};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared state for the diction endpoint.
#[derive(Clone)]
pub struct DictionState {
    pub responder: Arc<ChatResponder>,
    /// Chat id the web conversation runs under; all web lookups share one
    /// diction history.
    pub chat_id: i64,
}

/// Build the axum router for the web front end.
pub fn build_router(state: DictionState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/word/{word}", get(lookup_word))
        .with_state(state)
}

/// Web server configuration.
pub struct WebParams {
    pub bind: String,
    pub chat_id: i64,
}

/// Start the web server.
///
/// This runs as a background task — call from `tokio::spawn`.
pub async fn start_server(params: WebParams, responder: Arc<ChatResponder>) -> anyhow::Result<()> {
    let state = DictionState {
        responder,
        chat_id: params.chat_id,
    };

    let app = build_router(state);
    let addr: SocketAddr = params
        .bind
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid web bind address: {}", e))?;

    tracing::info!("Diction endpoint starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET / — hello.
async fn hello() -> &'static str {
    "Hello World"
}

/// GET /word/{word} — what does the word mean, in Chinese.
async fn lookup_word(State(state): State<DictionState>, Path(word): Path<String>) -> String {
    tracing::info!(word = %word, "step: diction lookup");
    let query = format!("{}\u{662f}\u{4ec0}\u{4e48}\u{610f}\u{601d}?", word);
    state
        .responder
        .answer(state.chat_id, ChatFunction::Diction, &query)
        .await
}
