//! corsgate configuration system.
//!
//! This module provides the configuration types and resolvers for the corsgate HTTP server.
//! It includes support for:
//! - [`Config`](crate::config::Config): top-level configuration loader and YAML parser
//! - [`ServerConfig`](crate::config::ServerConfig): network settings
//! - [`CorsConfig`](crate::config::CorsConfig): CORS policy descriptor resolved from `CORS_*` variables
//! - [`EnvSource`](crate::config::EnvSource): injectable view of environment variables
//!
//! Settings are layered: defaults, then an optional YAML file (`-c server.yml`),
//! then the process environment, then command line flags.

mod cors;
mod env;
mod main;
mod server;

pub use cors::*;
pub use env::{EnvSource, ProcessEnv, parse_flag, parse_list};
pub use main::Config;
pub use server::ServerConfig;
