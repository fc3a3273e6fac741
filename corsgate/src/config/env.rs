//! Access to environment variables and the parsing rules shared by all `CORS_*` inputs.
//!
//! Resolution never reads `std::env` directly. It goes through [`EnvSource`], so the
//! server reads the real process environment while tests inject a fixed mapping.

use std::collections::HashMap;

/// A read-only mapping from variable names to optional string values.
pub trait EnvSource {
	/// Value of `name`, or `None` if it is not set.
	fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
	fn var(&self, name: &str) -> Option<String> {
		// Values that are not valid unicode are treated as unset.
		std::env::var(name).ok()
	}
}

impl EnvSource for HashMap<String, String> {
	fn var(&self, name: &str) -> Option<String> {
		self.get(name).cloned()
	}
}

impl EnvSource for HashMap<&str, &str> {
	fn var(&self, name: &str) -> Option<String> {
		self.get(name).map(|v| (*v).to_string())
	}
}

impl<const N: usize> EnvSource for [(&str, &str); N] {
	fn var(&self, name: &str) -> Option<String> {
		self.iter().find(|(key, _)| *key == name).map(|(_, v)| (*v).to_string())
	}
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
	fn var(&self, name: &str) -> Option<String> {
		(**self).var(name)
	}
}

/// Boolean flag rule: `"true"` in any letter case, surrounding whitespace ignored.
/// Everything else, including absence, is `false`.
pub fn parse_flag(value: Option<&str>) -> bool {
	value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// List rule: split on `,`, trim every segment, drop empty segments.
///
/// Order and duplicates are kept; `"*"` passes through as a plain entry.
pub fn parse_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|segment| !segment.is_empty())
		.map(String::from)
		.collect()
}
