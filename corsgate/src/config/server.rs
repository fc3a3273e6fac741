use serde::Deserialize;

pub const DEFAULT_IP: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5050;

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
	/// IP to bind to.
	#[serde(default)]
	pub ip: Option<String>,

	/// TCP port to bind to. `0` picks a free port.
	#[serde(default)]
	pub port: Option<u16>,
}

impl ServerConfig {
	pub fn override_optional_ip(&mut self, ip: &Option<String>) {
		if ip.is_some() {
			self.ip = ip.clone();
		}
	}

	pub fn override_optional_port(&mut self, port: &Option<u16>) {
		if port.is_some() {
			self.port = *port;
		}
	}

	pub fn ip_or_default(&self) -> &str {
		self.ip.as_deref().unwrap_or(DEFAULT_IP)
	}

	pub fn port_or_default(&self) -> u16 {
		self.port.unwrap_or(DEFAULT_PORT)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = ServerConfig::default();
		assert_eq!(config.ip_or_default(), "0.0.0.0");
		assert_eq!(config.port_or_default(), 5050);
	}

	#[test]
	fn overrides_only_when_given() {
		let mut config = ServerConfig {
			ip: Some("10.0.0.1".into()),
			port: Some(8000),
		};

		config.override_optional_ip(&None);
		config.override_optional_port(&None);
		assert_eq!(config.ip_or_default(), "10.0.0.1");
		assert_eq!(config.port_or_default(), 8000);

		config.override_optional_ip(&Some("127.0.0.1".into()));
		config.override_optional_port(&Some(0));
		assert_eq!(config.ip_or_default(), "127.0.0.1");
		assert_eq!(config.port_or_default(), 0);
	}
}
