//! Cross-Origin Resource Sharing (CORS) configuration for the corsgate server.
//!
//! The policy is read once at startup from `CORS_*` environment variables and then
//! stays fixed for the life of the process. It maps directly to the
//! `Access-Control-*` headers produced by the server's `CorsLayer`.
//!
//! | Variable                 | Format                                | Default |
//! |--------------------------|---------------------------------------|---------|
//! | `CORS_ENABLED`           | `true` / `false`                      | `false` |
//! | `CORS_ALLOW_ORIGINS`     | comma-separated origins or `*`        | empty   |
//! | `CORS_ALLOW_CREDENTIALS` | `true` / `false`                      | `false` |
//! | `CORS_ALLOW_METHODS`     | comma-separated verbs or `*`          | empty   |
//! | `CORS_ALLOW_HEADERS`     | comma-separated header names or `*`   | empty   |
//! | `CORS_MAX_AGE`           | preflight cache duration in seconds   | unset   |
//!
//! The same fields can be given in the `cors:` section of a YAML config file.
//!
//! # Example YAML
//! ```yaml
//! cors:
//!   enabled: true
//!   allow_origins:
//!     - "http://localhost:3000"
//!     - "https://example.com"
//!   allow_credentials: true
//!   allow_methods: ["GET", "POST", "OPTIONS"]
//!   allow_headers: ["Content-Type", "Authorization"]
//!   max_age_seconds: 600
//! ```

use super::env::{EnvSource, parse_flag, parse_list};
use serde::Deserialize;
use std::fmt;

pub const CORS_ENABLED: &str = "CORS_ENABLED";
pub const CORS_ALLOW_ORIGINS: &str = "CORS_ALLOW_ORIGINS";
pub const CORS_ALLOW_CREDENTIALS: &str = "CORS_ALLOW_CREDENTIALS";
pub const CORS_ALLOW_METHODS: &str = "CORS_ALLOW_METHODS";
pub const CORS_ALLOW_HEADERS: &str = "CORS_ALLOW_HEADERS";
pub const CORS_MAX_AGE: &str = "CORS_MAX_AGE";

/// Token that stands for "any origin", "any method" or "any header".
pub const WILDCARD: &str = "*";

/// CORS policy descriptor.
///
/// - `enabled`: whether a CORS layer is installed at all.
/// - `allow_origins`: exact origins, or `["*"]` for any origin.
/// - `allow_credentials`: the configured credentials flag. Use
///   [`effective_allow_credentials`](Self::effective_allow_credentials) for what clients see.
/// - `allow_methods` / `allow_headers`: names, or `"*"` as a wildcard marker.
/// - `max_age_seconds`: how long browsers may cache a preflight answer.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
	pub enabled: bool,
	pub allow_origins: Vec<String>,
	pub allow_credentials: bool,
	pub allow_methods: Vec<String>,
	pub allow_headers: Vec<String>,
	pub max_age_seconds: Option<u64>,
}

impl CorsConfig {
	/// Resolve a policy from environment variables alone.
	///
	/// Total: malformed or missing values fall back to the defaults.
	pub fn from_env(source: &impl EnvSource) -> CorsConfig {
		let mut config = CorsConfig::default();
		config.override_from_env(source);
		config
	}

	/// Replace every field whose variable is set in `source`; keep the rest.
	pub fn override_from_env(&mut self, source: &impl EnvSource) {
		if let Some(value) = source.var(CORS_ENABLED) {
			self.enabled = parse_flag(Some(&value));
		}
		if let Some(value) = source.var(CORS_ALLOW_ORIGINS) {
			self.allow_origins = parse_list(&value);
		}
		if let Some(value) = source.var(CORS_ALLOW_CREDENTIALS) {
			self.allow_credentials = parse_flag(Some(&value));
		}
		if let Some(value) = source.var(CORS_ALLOW_METHODS) {
			self.allow_methods = parse_list(&value);
		}
		if let Some(value) = source.var(CORS_ALLOW_HEADERS) {
			self.allow_headers = parse_list(&value);
		}
		if let Some(value) = source.var(CORS_MAX_AGE) {
			self.max_age_seconds = value.trim().parse().ok();
		}
	}

	/// True if any origin is permitted.
	pub fn allows_any_origin(&self) -> bool {
		self.allow_origins.iter().any(|o| o == WILDCARD)
	}

	/// True if the method list contains the wildcard marker.
	pub fn allows_any_method(&self) -> bool {
		self.allow_methods.iter().any(|m| m == WILDCARD)
	}

	/// True if the header list contains the wildcard marker.
	pub fn allows_any_header(&self) -> bool {
		self.allow_headers.iter().any(|h| h == WILDCARD)
	}

	/// Credentials flag as presented to clients.
	///
	/// A wildcard origin and credentialed requests are mutually exclusive, so the
	/// configured flag is dropped whenever any origin is allowed.
	pub fn effective_allow_credentials(&self) -> bool {
		self.allow_credentials && !self.allows_any_origin()
	}
}

impl fmt::Display for CorsConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fn list(values: &[String]) -> String {
			if values.is_empty() {
				String::from("(none)")
			} else {
				values.join(", ")
			}
		}

		writeln!(f, "enabled:           {}", self.enabled)?;
		writeln!(f, "allow_origins:     {}", list(&self.allow_origins))?;
		writeln!(
			f,
			"allow_credentials: {} (effective: {})",
			self.allow_credentials,
			self.effective_allow_credentials()
		)?;
		writeln!(f, "allow_methods:     {}", list(&self.allow_methods))?;
		writeln!(f, "allow_headers:     {}", list(&self.allow_headers))?;
		match self.max_age_seconds {
			Some(seconds) => write!(f, "max_age_seconds:   {seconds}"),
			None => write!(f, "max_age_seconds:   (unset)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	const NO_ENV: [(&str, &str); 0] = [];

	fn strings(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| (*v).to_string()).collect()
	}

	#[test]
	fn defaults_when_nothing_is_set() {
		let config = CorsConfig::from_env(&NO_ENV);
		assert_eq!(
			config,
			CorsConfig {
				enabled: false,
				allow_origins: vec![],
				allow_credentials: false,
				allow_methods: vec![],
				allow_headers: vec![],
				max_age_seconds: None,
			}
		);
	}

	#[test]
	fn full_environment() {
		let config = CorsConfig::from_env(&[
			(CORS_ENABLED, "true"),
			(CORS_ALLOW_ORIGINS, "http://localhost:3000,https://example.com"),
			(CORS_ALLOW_CREDENTIALS, "true"),
			(CORS_ALLOW_METHODS, "GET,POST,OPTIONS"),
			(CORS_ALLOW_HEADERS, "Content-Type,Authorization"),
			(CORS_MAX_AGE, "600"),
		]);

		assert_eq!(
			config,
			CorsConfig {
				enabled: true,
				allow_origins: strings(&["http://localhost:3000", "https://example.com"]),
				allow_credentials: true,
				allow_methods: strings(&["GET", "POST", "OPTIONS"]),
				allow_headers: strings(&["Content-Type", "Authorization"]),
				max_age_seconds: Some(600),
			}
		);
		assert!(config.effective_allow_credentials());
	}

	#[test]
	fn origins_single() {
		let config = CorsConfig::from_env(&[(CORS_ALLOW_ORIGINS, "http://localhost:3000")]);
		assert_eq!(config.allow_origins, strings(&["http://localhost:3000"]));
	}

	#[test]
	fn origins_multiple_with_whitespace() {
		let config = CorsConfig::from_env(&[(
			CORS_ALLOW_ORIGINS,
			"http://localhost:3000, https://example.com , https://api.example.com",
		)]);
		assert_eq!(
			config.allow_origins,
			strings(&["http://localhost:3000", "https://example.com", "https://api.example.com"])
		);
	}

	#[rstest]
	#[case(None, false)]
	#[case(Some("false"), false)]
	#[case(Some("no"), false)]
	#[case(Some(""), false)]
	#[case(Some("true"), true)]
	fn enabled_flag(#[case] value: Option<&str>, #[case] expected: bool) {
		let config = match value {
			Some(v) => CorsConfig::from_env(&[(CORS_ENABLED, v)]),
			None => CorsConfig::from_env(&NO_ENV),
		};
		assert_eq!(config.enabled, expected);
	}

	#[rstest]
	#[case("600", Some(600))]
	#[case(" 30 ", Some(30))]
	#[case("-1", None)]
	#[case("ten", None)]
	#[case("", None)]
	fn max_age(#[case] value: &str, #[case] expected: Option<u64>) {
		assert_eq!(CorsConfig::from_env(&[(CORS_MAX_AGE, value)]).max_age_seconds, expected);
	}

	#[test]
	fn wildcards_pass_through() {
		let config = CorsConfig::from_env(&[
			(CORS_ALLOW_ORIGINS, "*"),
			(CORS_ALLOW_METHODS, "*"),
			(CORS_ALLOW_HEADERS, " * "),
		]);
		assert_eq!(config.allow_origins, strings(&["*"]));
		assert_eq!(config.allow_methods, strings(&["*"]));
		assert_eq!(config.allow_headers, strings(&["*"]));
		assert!(config.allows_any_origin());
		assert!(config.allows_any_method());
		assert!(config.allows_any_header());
	}

	#[rstest]
	#[case("*", "true", false)]
	#[case("*", "false", false)]
	#[case("https://example.com,*", "true", false)]
	#[case("https://example.com", "true", true)]
	#[case("https://example.com", "false", false)]
	#[case("", "true", true)]
	fn wildcard_disables_credentials(#[case] origins: &str, #[case] credentials: &str, #[case] effective: bool) {
		let config = CorsConfig::from_env(&[
			(CORS_ENABLED, "true"),
			(CORS_ALLOW_ORIGINS, origins),
			(CORS_ALLOW_CREDENTIALS, credentials),
		]);
		assert_eq!(config.allow_credentials, credentials == "true");
		assert_eq!(config.effective_allow_credentials(), effective);
	}

	#[test]
	fn resolving_twice_is_identical() {
		let env = [
			(CORS_ENABLED, "true"),
			(CORS_ALLOW_ORIGINS, " https://a.example , https://b.example"),
			(CORS_ALLOW_CREDENTIALS, "TRUE"),
		];
		assert_eq!(CorsConfig::from_env(&env), CorsConfig::from_env(&env));
	}

	#[test]
	fn override_keeps_unset_fields() {
		let mut config = CorsConfig {
			enabled: true,
			allow_origins: strings(&["https://from-file.example"]),
			allow_credentials: true,
			allow_methods: strings(&["GET"]),
			allow_headers: vec![],
			max_age_seconds: Some(60),
		};
		config.override_from_env(&[(CORS_ALLOW_ORIGINS, "https://from-env.example"), (CORS_ENABLED, "false")]);

		assert!(!config.enabled);
		assert_eq!(config.allow_origins, strings(&["https://from-env.example"]));
		assert!(config.allow_credentials);
		assert_eq!(config.allow_methods, strings(&["GET"]));
		assert_eq!(config.max_age_seconds, Some(60));
	}

	#[test]
	fn parse_yaml_section() {
		let config: CorsConfig =
			serde_yaml_ng::from_str("enabled: true\nallow_origins: [\"https://example.org\"]\nmax_age_seconds: 5").unwrap();
		assert!(config.enabled);
		assert_eq!(config.allow_origins, strings(&["https://example.org"]));
		assert!(!config.allow_credentials);
		assert_eq!(config.max_age_seconds, Some(5));
	}

	#[test]
	fn reject_unknown_yaml_fields() {
		assert!(serde_yaml_ng::from_str::<CorsConfig>("allowed_origins: [\"*\"]").is_err());
	}

	#[test]
	fn display() {
		let config = CorsConfig::from_env(&[
			(CORS_ENABLED, "true"),
			(CORS_ALLOW_ORIGINS, "*"),
			(CORS_ALLOW_CREDENTIALS, "true"),
		]);
		assert_eq!(
			config.to_string(),
			"enabled:           true\n\
			 allow_origins:     *\n\
			 allow_credentials: true (effective: false)\n\
			 allow_methods:     (none)\n\
			 allow_headers:     (none)\n\
			 max_age_seconds:   (unset)"
		);
	}
}
