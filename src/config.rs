//! Client configuration: backend location, revocation markers, and polling cadence.

// std
use std::{env, time::Duration as StdDuration};
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable read by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "BOOKLITE_API_URL";
/// Backend used when [`BASE_URL_ENV`] is unset.
pub const DEFAULT_BASE_URL: &str = "https://projetbooklite-backend.onrender.com";

/// Immutable client configuration.
///
/// Build values through [`ClientConfig::builder`] so the base URL is validated once and
/// endpoint construction never fails on scheme or base problems later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Backend origin, e.g. `https://shop.example.com`.
	pub base_url: Url,
	/// API root derived from the base URL and prefix, e.g. `https://shop.example.com/api`.
	pub api_root: Url,
	/// Substrings of a 401 error message that mark the session as revoked.
	pub revoked_markers: Vec<String>,
	/// Interval between backend version checks.
	pub version_poll_interval: StdDuration,
}
impl ClientConfig {
	/// Default API path prefix.
	pub const DEFAULT_API_PREFIX: &'static str = "api";
	/// Default revocation marker emitted by the backend.
	pub const DEFAULT_REVOKED_MARKER: &'static str = "Token révoqué";
	/// Default version polling interval.
	pub const DEFAULT_VERSION_POLL_INTERVAL: StdDuration = StdDuration::from_secs(30);

	/// Starts a builder for the provided backend origin.
	pub fn builder(base_url: Url) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Parses `base_url` and builds a configuration with default settings.
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		let base_url =
			Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Self::builder(base_url).build()
	}

	/// Reads the backend origin from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		match env::var(BASE_URL_ENV) {
			Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
			_ => Self::new(DEFAULT_BASE_URL),
		}
	}

	/// Builds an endpoint URL by appending percent-encoded path segments to the API root.
	pub fn endpoint<I>(&self, segments: I) -> Url
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut url = self.api_root.clone();

		// `api_root` is validated as a base URL by the builder.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}

		url
	}

	/// Appends a backend-relative path (e.g. `/uploads/cover.png`) to the base URL.
	pub fn asset_url(&self, path: &str) -> Url {
		let mut url = self.base_url.clone();

		url.set_query(None);
		url.set_fragment(None);

		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty().extend(path.split('/').filter(|segment| !segment.is_empty()));
		}

		url
	}

	/// Returns `true` when `message` carries one of the configured revocation markers.
	pub fn is_revocation_message(&self, message: &str) -> bool {
		self.revoked_markers.iter().any(|marker| message.contains(marker.as_str()))
	}
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	base_url: Url,
	api_prefix: String,
	revoked_markers: Vec<String>,
	version_poll_interval: StdDuration,
}
impl ClientConfigBuilder {
	fn new(base_url: Url) -> Self {
		Self {
			base_url,
			api_prefix: ClientConfig::DEFAULT_API_PREFIX.into(),
			revoked_markers: vec![ClientConfig::DEFAULT_REVOKED_MARKER.into()],
			version_poll_interval: ClientConfig::DEFAULT_VERSION_POLL_INTERVAL,
		}
	}

	/// Overrides the API path prefix (defaults to `api`); an empty prefix targets the origin.
	pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.api_prefix = prefix.into();

		self
	}

	/// Adds a revocation marker on top of the defaults.
	pub fn revoked_marker(mut self, marker: impl Into<String>) -> Self {
		self.revoked_markers.push(marker.into());

		self
	}

	/// Overrides the version polling interval (defaults to 30 seconds).
	pub fn version_poll_interval(mut self, interval: StdDuration) -> Self {
		self.version_poll_interval = interval;

		self
	}

	/// Validates the base URL and produces the configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let scheme = self.base_url.scheme();

		if scheme != "http" && scheme != "https" {
			return Err(ConfigError::UnsupportedScheme { scheme: scheme.to_owned() });
		}
		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: self.base_url.to_string() });
		}
		if self.version_poll_interval.is_zero() {
			return Err(ConfigError::ZeroPollInterval);
		}

		let mut api_root = self.base_url.clone();

		api_root.set_query(None);
		api_root.set_fragment(None);

		if let Ok(mut path) = api_root.path_segments_mut() {
			path.pop_if_empty()
				.extend(self.api_prefix.split('/').filter(|segment| !segment.is_empty()));
		}

		Ok(ClientConfig {
			base_url: self.base_url,
			api_root,
			revoked_markers: self.revoked_markers,
			version_poll_interval: self.version_poll_interval,
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config(base: &str) -> ClientConfig {
		ClientConfig::new(base).expect("Fixture base URL should be valid.")
	}

	#[test]
	fn endpoint_appends_encoded_segments() {
		let config = config("https://shop.example.com");

		assert_eq!(config.api_root.as_str(), "https://shop.example.com/api");
		assert_eq!(
			config.endpoint(["auth", "me"]).as_str(),
			"https://shop.example.com/api/auth/me"
		);
		assert_eq!(
			config.endpoint(["links", "a/b c", "reset"]).as_str(),
			"https://shop.example.com/api/links/a%2Fb%20c/reset"
		);
	}

	#[test]
	fn endpoint_respects_base_path_and_trailing_slash() {
		let config = config("https://shop.example.com/backend/");

		assert_eq!(
			config.endpoint(["products"]).as_str(),
			"https://shop.example.com/backend/api/products"
		);
	}

	#[test]
	fn builder_rejects_invalid_settings() {
		let url = Url::parse("ftp://shop.example.com").expect("Fixture URL should parse.");
		let err = ClientConfig::builder(url).build().expect_err("FTP must be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));

		let url = Url::parse("https://shop.example.com").expect("Fixture URL should parse.");
		let err = ClientConfig::builder(url)
			.version_poll_interval(StdDuration::ZERO)
			.build()
			.expect_err("A zero interval must be rejected.");

		assert!(matches!(err, ConfigError::ZeroPollInterval));
	}

	#[test]
	fn asset_url_appends_backend_paths() {
		let config = config("https://shop.example.com/backend");

		assert_eq!(
			config.asset_url("uploads/cover.png").as_str(),
			"https://shop.example.com/backend/uploads/cover.png"
		);
		assert_eq!(
			config.asset_url("/uploads/cover.png").as_str(),
			"https://shop.example.com/backend/uploads/cover.png"
		);
	}

	#[test]
	fn revocation_markers_extend_defaults() {
		let url = Url::parse("https://shop.example.com").expect("Fixture URL should parse.");
		let config = ClientConfig::builder(url)
			.revoked_marker("session revoked")
			.build()
			.expect("Config should build.");

		assert!(config.is_revocation_message("Token révoqué, reconnectez-vous"));
		assert!(config.is_revocation_message("Your session revoked"));
		assert!(!config.is_revocation_message("Token expiré"));
	}
}
