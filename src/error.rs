//! Client-wide error types shared across the request pipeline, endpoints, and stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every failure path of the client is normalized into this shape so callers can surface
/// [`Error::message`] without inspecting transport details.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Backend rejected the request with a client error other than 401.
	#[error("{message}")]
	Api {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Server-supplied or fallback message.
		message: String,
	},
	/// Backend rejected the credentials and silent recovery did not help.
	#[error("{message}")]
	Unauthorized {
		/// Server-supplied or fallback message.
		message: String,
	},
	/// Backend reported the session as revoked; the stored token has been cleared.
	#[error("Session has been revoked. Please log in again.")]
	Revoked,
	/// Backend failed with a 5xx status.
	#[error("{message}")]
	Server {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Server-supplied or fallback message.
		message: String,
	},
	/// Backend answered successfully but the body could not be decoded.
	#[error("Backend returned a malformed response.")]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl Error {
	/// Returns the coarse failure category.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Storage(_) => ErrorKind::Storage,
			Self::Config(_) => ErrorKind::Config,
			Self::Transport(_) => ErrorKind::Transport,
			Self::Api { .. } => ErrorKind::Validation,
			Self::Unauthorized { .. } => ErrorKind::Unauthorized,
			Self::Revoked => ErrorKind::Revoked,
			Self::Server { .. } => ErrorKind::Server,
			Self::Decode { .. } => ErrorKind::Decode,
		}
	}

	/// Returns the human-readable message callers should display.
	pub fn message(&self) -> String {
		self.to_string()
	}

	/// Returns the HTTP status attached to the failure, when one exists.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } | Self::Server { status, .. } | Self::Decode { status, .. } =>
				Some(*status),
			Self::Unauthorized { .. } | Self::Revoked => Some(StatusCode::UNAUTHORIZED.as_u16()),
			_ => None,
		}
	}

	/// Returns `true` when the caller should treat the user as logged out.
	pub fn is_auth_failure(&self) -> bool {
		matches!(self.kind(), ErrorKind::Unauthorized | ErrorKind::Revoked)
	}
}

/// Coarse failure categories used for uniform handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Network or IO failure.
	Transport,
	/// 4xx response other than 401.
	Validation,
	/// 401 that survived the single refresh-and-retry.
	Unauthorized,
	/// Server-revoked session.
	Revoked,
	/// 5xx response.
	Server,
	/// Malformed success body.
	Decode,
	/// Local configuration problem.
	Config,
	/// Session store failure.
	Storage,
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] ::http::Error),
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than http or https.
	#[error("Base URL must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Rejected scheme.
		scheme: String,
	},
	/// Base URL cannot carry path segments (e.g., `mailto:`).
	#[error("Base URL `{url}` cannot be used as an API root.")]
	CannotBeABase {
		/// Rejected URL.
		url: String,
	},
	/// Version poll interval must be non-zero.
	#[error("Version poll interval must be greater than zero.")]
	ZeroPollInterval,
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	Serialize(#[from] serde_json::Error),
	/// Backend-issued token cannot be used as a header value.
	#[error("Access token contains characters that are not valid in an HTTP header.")]
	InvalidToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
