//! # corsgate
//!
//! corsgate is a small HTTP API service whose Cross-Origin Resource Sharing (CORS)
//! policy is resolved from environment variables at startup.
//!
//! ## Features
//! - **Resolve**: read `CORS_*` variables once into an immutable [`CorsConfig`](config::CorsConfig).
//! - **Layer**: hand the resolved policy to `tower-http`'s `CorsLayer`, or install none when disabled.
//! - **Serve**: `/healthz`, `/readyz` and `/api/chat` behind the CORS and protection layers.
//!
//! ## Usage Example
//!
//! ```no_run
//! use corsgate::{config::Config, server::ApiServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_process_env();
//!     let mut server = ApiServer::from_config(config);
//!     server.start().await?;
//!     tokio::signal::ctrl_c().await?;
//!     server.stop().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod server;
