//! CORS layer construction.
//!
//! Turns a resolved [`CorsConfig`] into a `tower-http` [`CorsLayer`]. The layer does all
//! of the negotiation (origin reflection, preflight answers, `Vary`); this module only
//! translates configuration:
//! - disabled                 → no layer at all
//! - `allow_origins = ["*"]`  → `Access-Control-Allow-Origin: *`
//! - exact origins            → the request origin is reflected only if it is listed
//! - methods / headers `"*"`  → `*`, or a mirror of the request when credentials are allowed
//!
//! Credentials are only switched on via [`CorsConfig::effective_allow_credentials`],
//! so a wildcard origin never goes out together with `Access-Control-Allow-Credentials: true`.

use crate::config::{CorsConfig, WILDCARD};
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

/// Build the CORS layer for `config`, or `None` if CORS is disabled.
pub fn build_cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
	if !config.enabled {
		log::debug!("CORS disabled");
		return None;
	}

	let credentials = config.effective_allow_credentials();
	if config.allow_credentials && !credentials {
		log::warn!("CORS: wildcard origin cannot be combined with credentials, credentials disabled");
	}

	let mut layer = CorsLayer::new()
		.allow_origin(allow_origin(&config.allow_origins))
		.allow_credentials(credentials);

	if let Some(methods) = allow_methods(&config.allow_methods, credentials) {
		layer = layer.allow_methods(methods);
	}
	if let Some(headers) = allow_headers(&config.allow_headers, credentials) {
		layer = layer.allow_headers(headers);
	}
	if let Some(seconds) = config.max_age_seconds {
		layer = layer.max_age(Duration::from_secs(seconds));
	}

	Some(layer)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
	if origins.iter().any(|o| o == WILDCARD) {
		return AllowOrigin::any();
	}

	let values: Vec<HeaderValue> = origins
		.iter()
		.filter_map(|origin| match HeaderValue::from_str(origin) {
			Ok(value) => Some(value),
			Err(_) => {
				log::warn!("CORS: ignoring invalid origin {origin:?}");
				None
			}
		})
		.collect();

	AllowOrigin::list(values)
}

fn allow_methods(methods: &[String], credentials: bool) -> Option<AllowMethods> {
	if methods.is_empty() {
		return None;
	}
	if methods.iter().any(|m| m == WILDCARD) {
		// `*` is taken literally by browsers on credentialed requests.
		return Some(if credentials {
			AllowMethods::mirror_request()
		} else {
			Any.into()
		});
	}

	let list: Vec<Method> = methods
		.iter()
		.filter_map(|method| match Method::from_bytes(method.as_bytes()) {
			Ok(value) => Some(value),
			Err(_) => {
				log::warn!("CORS: ignoring invalid method {method:?}");
				None
			}
		})
		.collect();

	Some(list.into())
}

fn allow_headers(headers: &[String], credentials: bool) -> Option<AllowHeaders> {
	if headers.is_empty() {
		return None;
	}
	if headers.iter().any(|h| h == WILDCARD) {
		return Some(if credentials {
			AllowHeaders::mirror_request()
		} else {
			Any.into()
		});
	}

	let list: Vec<HeaderName> = headers
		.iter()
		.filter_map(|header| match HeaderName::from_bytes(header.as_bytes()) {
			Ok(value) => Some(value),
			Err(_) => {
				log::warn!("CORS: ignoring invalid header name {header:?}");
				None
			}
		})
		.collect();

	Some(list.into())
}
