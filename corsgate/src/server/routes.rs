//! Router composition for the corsgate server.
//!
//! This module wires handlers into an Axum `Router` without mixing in server
//! lifecycle or CORS logic.

use super::{
	chat::ChatBackendArc,
	handlers::{ChatHandlerState, ok_not_found, serve_chat, serve_healthz, serve_readyz},
};
use axum::{
	Router,
	routing::{get, post},
};

/// Attach the liveness and readiness probes (`/healthz`, `/readyz`).
pub fn add_probes_to_app(app: Router) -> Router {
	app.route("/healthz", get(serve_healthz)).route("/readyz", get(serve_readyz))
}

/// Attach the JSON API (`/api/chat`).
pub fn add_api_to_app(app: Router, backend: ChatBackendArc) -> Router {
	let api_app = Router::new()
		.route("/api/chat", post(serve_chat))
		.with_state(ChatHandlerState { backend });
	app.merge(api_app)
}

/// Unknown paths get a JSON 404.
pub fn add_fallback_to_app(app: Router) -> Router {
	app.fallback(|| async { ok_not_found() })
}
