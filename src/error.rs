//! Crate-level error types shared across activation, redirect building, and configuration.

// self
use crate::{_prelude::*, auth::IdentifierError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The remote service could not be reached or returned nothing.
	#[error(transparent)]
	RemoteCall(#[from] RemoteCallError),
	/// The remote service answered without a field the operation requires.
	#[error(transparent)]
	MalformedResponse(#[from] MalformedResponseError),
	/// Caller-supplied input was rejected before any side effect.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl From<IdentifierError> for Error {
	fn from(e: IdentifierError) -> Self {
		Self::Validation(e.into())
	}
}

/// Failures reaching the remote service.
#[derive(Debug, ThisError)]
pub enum RemoteCallError {
	/// Underlying transport reported a failure.
	#[error("Transport failure while calling `{method}`.")]
	Transport {
		/// Remote method that was being called.
		method: String,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// The transport completed but produced no response node.
	#[error("Remote method `{method}` returned no response.")]
	NoResponse {
		/// Remote method that was being called.
		method: String,
	},
}
impl RemoteCallError {
	/// Wraps a transport-specific failure for `method`.
	pub fn transport(
		method: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Transport { method: method.into(), source: Box::new(src) }
	}

	/// Name of the remote method involved in the failure.
	pub fn method(&self) -> &str {
		match self {
			Self::Transport { method, .. } | Self::NoResponse { method } => method,
		}
	}
}

/// Response payloads that lack or garble an expected field.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum MalformedResponseError {
	/// A required field is absent.
	#[error("Response to `{method}` is missing the `{field}` field.")]
	MissingField {
		/// Remote method that produced the response.
		method: &'static str,
		/// Field that was expected.
		field: &'static str,
	},
	/// A required field is present but cannot be interpreted.
	#[error("Response to `{method}` has an invalid `{field}` value: {value}.")]
	InvalidField {
		/// Remote method that produced the response.
		method: &'static str,
		/// Field that failed to parse.
		field: &'static str,
		/// Raw value received.
		value: String,
	},
}

/// Caller input rejected at the API boundary.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// The `next` redirect target was empty.
	#[error("Redirect target cannot be empty.")]
	EmptyRedirectTarget,
	/// The `next` redirect target contains control characters.
	#[error("Redirect target contains control characters.")]
	InvalidRedirectTarget,
	/// An authorization token was empty.
	#[error("Authorization token cannot be empty.")]
	EmptyAuthToken,
	/// A session key was empty.
	#[error("Session key cannot be empty.")]
	EmptySessionKey,
	/// Permission list failed validation.
	#[error(transparent)]
	Permission(#[from] crate::auth::PermissionValidationError),
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),
}

/// Configuration failures raised while assembling endpoints or credentials.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// A configured endpoint cannot be parsed.
	#[error("The {endpoint} endpoint is not a valid URL: {reason}.")]
	InvalidEndpoint {
		/// Which endpoint failed.
		endpoint: &'static str,
		/// Parser message.
		reason: String,
	},
	/// A configured endpoint uses an unsupported scheme.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed.
		endpoint: &'static str,
		/// Offending URL.
		url: String,
	},
	/// A configured endpoint carries a query string or fragment.
	#[error("The {endpoint} endpoint must not carry a query or fragment: {url}.")]
	EndpointHasQuery {
		/// Which endpoint failed.
		endpoint: &'static str,
		/// Offending URL.
		url: String,
	},
	/// Application secret is empty.
	#[error("Application secret cannot be empty.")]
	EmptySecret,
	/// Application key failed validation.
	#[error("Application key is invalid.")]
	InvalidApiKey(#[source] IdentifierError),
}
