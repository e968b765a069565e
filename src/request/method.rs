//! Closed set of HTTP verbs accepted by [`AuthenticatedRequest`](super::AuthenticatedRequest).

// self
use crate::{_prelude::*, error::ConfigError};

/// HTTP verbs supported by the signed-request pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`; the only verb whose caller query parameters reach the URI.
	Get,
	/// `PUT`
	Put,
	/// `POST`
	Post,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Every supported verb.
	pub const ALL: [HttpMethod; 4] =
		[HttpMethod::Get, HttpMethod::Put, HttpMethod::Post, HttpMethod::Delete];

	/// Parses a method string case-insensitively.
	pub fn parse(value: &str) -> Result<Self, ConfigError> {
		let normalized = value.trim().to_ascii_uppercase();

		match normalized.as_str() {
			"GET" => Ok(Self::Get),
			"PUT" => Ok(Self::Put),
			"POST" => Ok(Self::Post),
			"DELETE" => Ok(Self::Delete),
			_ => Err(ConfigError::UnsupportedMethod { method: normalized }),
		}
	}

	/// Returns the canonical upper-case label.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Put => "PUT",
			HttpMethod::Post => "POST",
			HttpMethod::Delete => "DELETE",
		}
	}

	/// Whether caller query parameters are carried in the URI for this verb.
	pub const fn carries_query(self) -> bool {
		matches!(self, HttpMethod::Get)
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl From<HttpMethod> for http::Method {
	fn from(value: HttpMethod) -> Self {
		match value {
			HttpMethod::Get => http::Method::GET,
			HttpMethod::Put => http::Method::PUT,
			HttpMethod::Post => http::Method::POST,
			HttpMethod::Delete => http::Method::DELETE,
		}
	}
}
