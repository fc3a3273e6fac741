pub mod policy;
pub mod serve;

use anyhow::Result;
use corsgate::config::{Config, ProcessEnv};
use std::path::Path;

/// Read the optional config file, then layer the process environment on top.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
	let mut config = match path {
		Some(path) => Config::from_path(path)?,
		None => Config::default(),
	};
	config.apply_env(&ProcessEnv);
	Ok(config)
}
