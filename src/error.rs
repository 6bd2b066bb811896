//! Bridge-level error types shared across validation, restoration, and session calls.

// std
use std::time::Duration;
// self
use crate::_prelude::*;

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical bridge error exposed by public APIs.
///
/// Every variant is terminal for the operation that raised it; nothing inside the crate
/// retries on the caller's behalf.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Endpoint grant or session request was rejected.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Caller asked for a feature the bridge does not provide.
	#[error(transparent)]
	Unimplemented(#[from] UnimplementedError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream did not answer before the deadline.
	#[error(transparent)]
	Timeout(#[from] TimeoutError),
	/// Upstream answered with something the session protocol cannot express.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Classifies the error for callers that speak the capability protocol's exception kinds.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::Timeout(_) => ErrorKind::Overloaded,
			Error::Unimplemented(_) => ErrorKind::Unimplemented,
			_ => ErrorKind::Failed,
		}
	}

	/// Returns true when an upstream caller may retry with backoff.
	pub fn is_retryable(&self) -> bool {
		matches!(self.kind(), ErrorKind::Overloaded)
	}
}

/// Exception kinds understood by the capability protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Generic failure; retrying will not help.
	Failed,
	/// Temporary lack of resources; retry with backoff.
	Overloaded,
	/// The requested method is not implemented.
	Unimplemented,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Failed => "failed",
			ErrorKind::Overloaded => "overloaded",
			ErrorKind::Unimplemented => "unimplemented",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Client-facing rejections raised while validating grants or opening sessions.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// URL scheme is neither `http` nor `https`.
	#[error("URL must be HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// Rejected URL.
		url: String,
	},
	/// URL could not be parsed.
	#[error("URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// URL-embedded credentials collide with an explicit credential.
	#[error("Can't support multiple authentication mechanisms at once.")]
	MultipleAuthMechanisms,
	/// Session type requested from a UI view is not the API session type.
	#[error("Session type {type_id} is not supported; expected an API session.")]
	UnsupportedSessionType {
		/// Requested interface identifier.
		type_id: u64,
	},
	/// Untyped request failed to decode.
	#[error("Request is malformed at `{path}`: {message}.")]
	MalformedRequest {
		/// Path to the offending field.
		path: String,
		/// Decoder message.
		message: String,
	},
}
impl ValidationError {
	/// HTTP-equivalent status reported to the caller.
	pub const fn status(&self) -> u16 {
		400
	}
}

/// Features that are recognized but deliberately not provided.
#[derive(Debug, ThisError)]
pub enum UnimplementedError {
	/// Refresh-style credentials cannot be restored.
	#[error("Refresh credentials unimplemented.")]
	RefreshCredential,
	/// Streaming request bodies are not supported.
	#[error("Streaming {operation} is unimplemented.")]
	Streaming {
		/// Streaming verb that was requested.
		operation: &'static str,
	},
	/// Socket upgrades are not supported.
	#[error("WebSocket upgrades are unimplemented.")]
	WebSocket,
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream endpoint.")]
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

/// Deadline failures; always reported as [`ErrorKind::Overloaded`].
#[derive(Debug, ThisError)]
pub enum TimeoutError {
	/// The exchange was aborted after the fixed deadline elapsed.
	#[error("Request timed out after {}ms.", elapsed.as_millis())]
	Deadline {
		/// Deadline that was exceeded.
		elapsed: Duration,
	},
}

/// Responses the session protocol has no representation for.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// Status code is absent from the classification table.
	#[error("Invalid status code {status} received in response.")]
	UnexpectedStatus {
		/// Raw HTTP status code.
		status: u16,
	},
}

/// Configuration and wiring failures raised by the bridge.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// No handler is registered for the frontend reference field.
	#[error("No frontend reference handler is registered for `{field}`.")]
	UnknownFrontendRef {
		/// Field name that was looked up.
		field: String,
	},
	/// A handler for the field is already registered.
	#[error("A frontend reference handler for `{field}` is already registered.")]
	DuplicateFrontendRef {
		/// Field name that collided.
		field: &'static str,
	},
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
