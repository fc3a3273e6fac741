use super::{CorsConfig, EnvSource, ProcessEnv, ServerConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Default, Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// HTTP server configuration
	#[serde(default)]
	pub server: ServerConfig,

	/// Cross-Origin Resource Sharing (CORS) settings
	#[serde(default)]
	pub cors: CorsConfig,
}

impl Config {
	pub fn from_string(text: &str) -> Result<Self> {
		// An empty document deserializes to unit, not to an empty map.
		if text.trim().is_empty() {
			return Ok(Config::default());
		}
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		let mut text = String::new();
		BufReader::new(file)
			.read_to_string(&mut text)
			.with_context(|| format!("reading config file {path:?}"))?;
		Config::from_string(&text).with_context(|| format!("parsing config file {path:?}"))
	}

	/// Configuration taken from `source` only, without a file.
	pub fn from_env(source: &impl EnvSource) -> Self {
		let mut config = Config::default();
		config.apply_env(source);
		config
	}

	/// Configuration taken from the environment of this process.
	pub fn from_process_env() -> Self {
		Config::from_env(&ProcessEnv)
	}

	/// Layer environment variables over the values read from a file.
	pub fn apply_env(&mut self, source: &impl EnvSource) {
		self.cors.override_from_env(source);
	}
}
