//! Target host description and URI construction.

// self
use crate::{_prelude::*, context::ContextBuildError, error::ConfigError};

/// Transport scheme used to reach the API host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
	/// Plain-text HTTP; intended for local test servers.
	Http,
	/// HTTP over TLS.
	#[default]
	Https,
}
impl Scheme {
	/// Returns the URI scheme label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Scheme::Http => "http",
			Scheme::Https => "https",
		}
	}
}
impl Display for Scheme {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// API host that turns resolved paths and query strings into URIs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
	/// Scheme used for every request.
	#[serde(default)]
	pub scheme: Scheme,
	/// DNS name or IP literal.
	pub name: String,
	/// Explicit port; the scheme default applies when absent.
	#[serde(default)]
	pub port: Option<u16>,
}
impl Host {
	/// Creates an HTTPS host on the default port.
	pub fn https(name: impl Into<String>) -> Self {
		Self { scheme: Scheme::Https, name: name.into(), port: None }
	}

	/// Creates a plain HTTP host on the default port.
	pub fn http(name: impl Into<String>) -> Self {
		Self { scheme: Scheme::Http, name: name.into(), port: None }
	}

	/// Overrides the port.
	pub fn with_port(mut self, port: u16) -> Self {
		self.port = Some(port);

		self
	}

	/// Parses a base URL such as `https://lms.example.edu:8443`; any path or query is ignored.
	pub fn parse(value: &str) -> Result<Self, ContextBuildError> {
		let url = Url::parse(value).map_err(|e| ContextBuildError::InvalidHost {
			value: value.to_owned(),
			reason: e.to_string(),
		})?;
		let scheme = match url.scheme() {
			"http" => Scheme::Http,
			"https" => Scheme::Https,
			other => return Err(ContextBuildError::UnsupportedScheme { scheme: other.to_owned() }),
		};
		let name = url
			.host_str()
			.filter(|name| !name.is_empty())
			.ok_or_else(|| ContextBuildError::InvalidHost {
				value: value.to_owned(),
				reason: "missing host name".into(),
			})?
			.to_owned();

		Ok(Self { scheme, name, port: url.port() })
	}

	/// Returns the scheme + authority as a URL with an empty path.
	pub fn base_url(&self) -> Result<Url, ConfigError> {
		let raw = match self.port {
			Some(port) => format!("{}://{}:{port}", self.scheme, self.name),
			None => format!("{}://{}", self.scheme, self.name),
		};

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUri { uri: raw, source })
	}

	/// Builds a URI from a resolved path and an unencoded query string.
	///
	/// Characters that are illegal in a path or query component are percent-encoded; an
	/// empty `query` produces a URI without `?`.
	pub fn to_uri(&self, path: &str, query: &str) -> Result<Url, ConfigError> {
		let mut url = self.base_url()?;

		url.set_path(path);
		url.set_query((!query.is_empty()).then_some(query));

		Ok(url)
	}
}
impl Display for Host {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self.port {
			Some(port) => write!(f, "{}://{}:{port}", self.scheme, self.name),
			None => write!(f, "{}://{}", self.scheme, self.name),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn to_uri_combines_path_and_query() {
		let host = Host::https("lms.example.edu");
		let uri = host
			.to_uri("/d2l/api/lp/1.9/users/whoami", "x_a=app&x_b=user")
			.expect("URI should build.");

		assert_eq!(
			uri.as_str(),
			"https://lms.example.edu/d2l/api/lp/1.9/users/whoami?x_a=app&x_b=user"
		);
	}

	#[test]
	fn to_uri_skips_empty_query() {
		let host = Host::http("127.0.0.1").with_port(8080);
		let uri = host.to_uri("/status", "").expect("URI should build.");

		assert_eq!(uri.as_str(), "http://127.0.0.1:8080/status");
		assert_eq!(uri.query(), None);
	}

	#[test]
	fn parse_keeps_scheme_and_port() {
		let host = Host::parse("http://127.0.0.1:5000/ignored?q=1").expect("Host should parse.");

		assert_eq!(host, Host::http("127.0.0.1").with_port(5000));
	}

	#[test]
	fn parse_rejects_foreign_schemes() {
		let err = Host::parse("ftp://files.example.edu").expect_err("FTP hosts must be rejected.");

		assert_eq!(err, ContextBuildError::UnsupportedScheme { scheme: "ftp".into() });
	}

	#[test]
	fn host_deserializes_with_defaults() {
		let host: Host = serde_json::from_str(r#"{"name":"lms.example.edu"}"#)
			.expect("Host should deserialize.");

		assert_eq!(host, Host::https("lms.example.edu"));
	}
}
