//! corsgate HTTP server lifecycle and composition.
//!
//! The *logic* is split into focused modules:
//! - `handlers` implement the concrete HTTP handlers and response helpers.
//! - `routes` composes handlers into an Axum `Router`.
//! - `cors` builds a `CorsLayer` from the resolved CORS policy.
//!
//! `api_server.rs` owns *lifecycle* concerns only: taking the resolved configuration,
//! building the router, applying cross-cutting middlewares (CORS, backpressure,
//! timeouts, panic catching), listening on a socket and graceful shutdown.

use super::{
	chat::{ChatBackendArc, EchoBackend},
	cors, routes,
};
use crate::config::{Config, CorsConfig};
use anyhow::{Context, Result};
use axum::{
	BoxError, Router,
	error_handling::HandleErrorLayer,
	http::{HeaderValue, StatusCode, header::RETRY_AFTER},
	response::IntoResponse,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower::{
	ServiceBuilder, buffer::BufferLayer, limit::ConcurrencyLimitLayer, load_shed::LoadShedLayer, timeout::TimeoutLayer,
};
use tower_http::catch_panic::CatchPanicLayer;

const GLOBAL_CONCURRENCY: usize = 256;
const GLOBAL_BUFFER: usize = 512;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin orchestration layer for the corsgate HTTP server.
///
/// The CORS policy is resolved before the server is built and stays fixed for the
/// lifetime of the value. Guarantees:
/// - **Idempotent start/stop:** starting twice stops the previous instance; stopping twice is a no-op.
/// - **Graceful shutdown:** in-flight requests are allowed to finish (up to a timeout).
/// - **Backpressure by default:** global limits protect the process from overload.
pub struct ApiServer {
	ip: String,
	port: u16,
	cors: CorsConfig,
	backend: ChatBackendArc,
	/// One-shot channel to signal graceful shutdown to the serving task.
	exit_signal: Option<oneshot::Sender<()>>,
	/// Join handle for the serving task; awaited in `stop()`.
	join: Option<JoinHandle<()>>,
	/// Address actually bound, known once `start()` succeeded.
	local_addr: Option<SocketAddr>,
}

impl ApiServer {
	/// Construct a server from a resolved `Config`, answering chats with [`EchoBackend`].
	pub fn from_config(config: Config) -> ApiServer {
		ApiServer {
			ip: config.server.ip_or_default().to_string(),
			port: config.server.port_or_default(),
			cors: config.cors,
			backend: Arc::new(EchoBackend),
			exit_signal: None,
			join: None,
			local_addr: None,
		}
	}

	#[must_use]
	pub fn with_backend(mut self, backend: ChatBackendArc) -> ApiServer {
		self.backend = backend;
		self
	}

	pub fn cors(&self) -> &CorsConfig {
		&self.cors
	}

	/// Bound address while running.
	pub fn local_addr(&self) -> Option<SocketAddr> {
		self.local_addr
	}

	pub fn is_running(&self) -> bool {
		self.join.is_some()
	}

	/// The complete application: routes, CORS layer and protection layers.
	///
	/// Must be called inside a tokio runtime; the buffer layer spawns its worker on creation.
	pub fn router(&self) -> Router {
		let mut router = routes::add_probes_to_app(Router::new());
		router = routes::add_api_to_app(router, self.backend.clone());
		router = routes::add_fallback_to_app(router);

		if let Some(cors_layer) = cors::build_cors_layer(&self.cors) {
			router = router.layer(cors_layer);
		}

		// Order from innermost to outermost:
		//   LoadShed → ConcurrencyLimit → Buffer → Timeout → CatchPanic → HandleError
		// `HandleErrorLayer` is outermost so Axum observes an `Infallible` error type.
		let overload_handler = HandleErrorLayer::new(|_err: BoxError| async move {
			let mut resp = (StatusCode::SERVICE_UNAVAILABLE, "Service overloaded, try later").into_response();
			resp.headers_mut().insert(RETRY_AFTER, HeaderValue::from_static("2"));
			Ok::<_, std::convert::Infallible>(resp)
		});

		let protection = ServiceBuilder::new()
			.layer(overload_handler)
			.layer(CatchPanicLayer::new())
			.layer(TimeoutLayer::new(REQUEST_TIMEOUT))
			.layer(BufferLayer::new(GLOBAL_BUFFER))
			.layer(ConcurrencyLimitLayer::new(GLOBAL_CONCURRENCY))
			.layer(LoadShedLayer::new());

		router.layer(protection)
	}

	/// Start listening and serving requests.
	///
	/// Idempotent: if already running, the previous instance is stopped first.
	pub async fn start(&mut self) -> Result<()> {
		if self.exit_signal.is_some() || self.join.is_some() {
			self.stop().await;
		}

		log::info!("starting server");
		log_cors_policy(&self.cors);

		let router = self.router();

		let addr = format!("{}:{}", self.ip, self.port);
		let listener = TcpListener::bind(&addr)
			.await
			.with_context(|| format!("binding {addr}"))?;
		let local_addr = listener.local_addr()?;
		log::info!("server listening on {local_addr}");

		let (tx, rx) = oneshot::channel::<()>();

		let handle = tokio::spawn(async move {
			if let Err(err) = axum::serve(listener, router.into_make_service())
				.with_graceful_shutdown(async {
					rx.await.ok();
				})
				.await
			{
				log::error!("server task exited with error: {err}");
			}
		});

		self.exit_signal = Some(tx);
		self.join = Some(handle);
		self.local_addr = Some(local_addr);

		Ok(())
	}

	/// Trigger graceful shutdown and wait for the server task to finish (with timeout).
	///
	/// Idempotent: if the server is not running, this returns immediately.
	pub async fn stop(&mut self) {
		if self.exit_signal.is_none() && self.join.is_none() {
			return;
		}

		log::info!("stopping server");

		if let Some(tx) = self.exit_signal.take() {
			let _ = tx.send(());
		}

		if let Some(handle) = self.join.take() {
			match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
				Ok(Err(join_err)) => log::warn!("server task join error: {join_err}"),
				Ok(Ok(())) => {}
				Err(_) => log::warn!("server task did not shutdown within timeout; continuing"),
			}
		}

		self.local_addr = None;
	}
}

fn log_cors_policy(cors: &CorsConfig) {
	if !cors.enabled {
		log::info!("CORS disabled");
		return;
	}
	log::info!(
		"CORS enabled: origins={:?} credentials={} methods={:?} headers={:?}",
		cors.allow_origins,
		cors.effective_allow_credentials(),
		cors.allow_methods,
		cors.allow_headers
	);
}
