//! Adapter-level error types shared across flows, transports, and configuration.

// self
use crate::{_prelude::*, provider::Endpoint};

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical adapter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Invalid configuration or a request that could not be built.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; the caller decides whether to retry.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// The request never produced an HTTP response.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A token-bearing response lacked its token, or default-mode preconditions failed.
	#[error("Authorization failed: {message}.")]
	AuthorizationFailed {
		/// Human-readable summary of the failure.
		message: String,
		/// Raw response payload (or `null` when no request was sent).
		payload: Value,
	},
	/// The user-info endpoint returned an empty `data` field.
	#[error("Invalid response: {message}.")]
	InvalidResponse {
		/// Summary embedding the full raw response.
		message: String,
	},
}
impl Error {
	/// Builds an [`Error::AuthorizationFailed`] carrying the raw response map.
	pub fn authorization_failed(message: impl Into<String>, payload: &JsonMap) -> Self {
		Self::AuthorizationFailed {
			message: message.into(),
			payload: Value::Object(payload.to_owned()),
		}
	}

	/// Returns the raw diagnostic payload attached to an authorization failure.
	pub fn payload(&self) -> Option<&Value> {
		match self {
			Self::AuthorizationFailed { payload, .. } => Some(payload),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the adapter.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Transport builder rejected its settings.
	#[error("HTTP transport could not be built.")]
	HttpClientBuild {
		/// Builder error reported by the transport.
		#[source]
		source: BoxError,
	},
	/// An outbound request was malformed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request body could not be serialized.
	#[error("Request body for {endpoint} could not be serialized.")]
	RequestBody {
		/// Endpoint the body was meant for.
		endpoint: Endpoint,
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Open-platform base URL cannot be used.
	#[error("Base URL `{url}` is invalid: {reason}.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
		/// Why the URL was rejected.
		reason: &'static str,
	},
	/// Base URL or endpoint path cannot be parsed.
	#[error("Endpoint URL cannot be parsed.")]
	InvalidEndpoint {
		/// URL parser error.
		#[source]
		source: url::ParseError,
	},
	/// Client identifier failed validation.
	#[error(transparent)]
	InvalidClientId(#[from] crate::auth::IdentifierError),
}
impl ConfigError {
	/// Boxes a transport builder error.
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

/// Upstream failures that may clear up on their own; the adapter never retries them.
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Platform answered with a throttling or server-side status.
	#[error("{endpoint} returned an unexpected response: {message}.")]
	Upstream {
		/// Endpoint that failed.
		endpoint: Endpoint,
		/// Adapter-supplied message summarizing the failure.
		message: String,
		/// Response status, if one was received.
		status: Option<u16>,
		/// Delay requested through `Retry-After`.
		retry_after: Option<Duration>,
	},
}

/// Failures below HTTP.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Connection, DNS, or TLS failure reported by the transport.
	#[error("Network error occurred while calling the open platform.")]
	Network {
		/// Error reported by the transport.
		#[source]
		source: BoxError,
	},
	/// Socket or stream I/O failure.
	#[error("I/O error occurred while calling the open platform.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Boxes a transport network error.
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
