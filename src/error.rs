//! Crate-level error types shared by request construction, signing, and dispatch.
//!
//! Transport failures are deliberately absent: the executor captures them into a
//! [`Response`](crate::response::Response) so callers always get an inspectable result once a
//! URI has been built.

// self
use crate::{_prelude::*, request::HttpMethod};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Request reached an executor that cannot send it.
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
	/// The injected token provider failed.
	#[error("Token generation failed.")]
	TokenGeneration(
		#[from]
		#[source]
		crate::auth::TokenError,
	),
}

/// Construction-time failures; fatal for the value being built.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP method is not one of GET, PUT, POST, or DELETE.
	#[error("HTTP method `{method}` is unsupported.")]
	UnsupportedMethod {
		/// Upper-cased method string supplied by the caller.
		method: String,
	},
	/// Header name cannot be sent over HTTP.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderName,
	},
	/// Header value cannot be sent over HTTP.
	#[error("Header `{name}` carries an invalid value.")]
	InvalidHeaderValue {
		/// Header name the value belongs to.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// Host and path could not be combined into a URI.
	#[error("Request URI `{uri}` is invalid.")]
	InvalidUri {
		/// Textual URI that failed to parse.
		uri: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request context failed validation.
	#[error(transparent)]
	Context(#[from] crate::context::ContextBuildError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
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

/// Internal invariant violations raised between URI construction and the executor.
#[derive(Debug, ThisError)]
pub enum DispatchError {
	/// The executor declared that it cannot send this verb.
	#[error("Executor cannot dispatch HTTP method {method}.")]
	UnsupportedMethod {
		/// Method that reached the executor.
		method: HttpMethod,
	},
}
