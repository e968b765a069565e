//! Transport primitives for dispatching signed requests.
//!
//! The module exposes [`RequestExecutor`] alongside the [`OutboundRequest`] and
//! [`TransportOutcome`] values it exchanges with the orchestrator, so downstream crates can
//! plug in their own HTTP stack. Executors never return errors: a failed call is captured as
//! [`TransportOutcome::Failed`] with whatever response data arrived before the failure.

// crates.io
use http::{HeaderMap, HeaderValue, StatusCode};
#[cfg(feature = "reqwest")] use http::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, request::HttpMethod};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`RequestExecutor::send`].
pub type ExecutorFuture<'a> = Pin<Box<dyn Future<Output = TransportOutcome> + 'a + Send>>;

/// Abstraction over HTTP transports capable of sending one signed request.
///
/// Implementations make exactly one attempt per [`send`](RequestExecutor::send) call and
/// must release any connection they opened before the returned future completes.
pub trait RequestExecutor
where
	Self: Send + Sync,
{
	/// Whether this executor can send `method`. Defaults to every supported verb.
	fn supports(&self, method: HttpMethod) -> bool {
		let _ = method;

		true
	}

	/// Sends `request` and reports the outcome.
	fn send(&self, request: OutboundRequest) -> ExecutorFuture<'_>;
}

/// Fully built request handed to a [`RequestExecutor`].
#[derive(Clone, Debug)]
pub struct OutboundRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Authenticated URI, tokens included.
	pub uri: Url,
	/// The complete header set; executors add nothing else.
	pub headers: HeaderMap,
	/// Content type, set only when the caller supplied one.
	pub content_type: Option<HeaderValue>,
	/// Raw body, sent only when the caller supplied one.
	pub body: Option<Vec<u8>>,
}

/// Response data exactly as the transport received it.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// Status line code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Response body bytes.
	pub body: Vec<u8>,
}

/// Transport failure captured at the executor boundary.
#[derive(Clone, Debug)]
pub struct TransportFailure {
	/// Human-readable error chain.
	pub description: String,
	/// Status, headers, and body received before the failure, when any arrived.
	pub partial: Option<RawResponse>,
}

/// Result of one dispatch attempt.
#[derive(Clone, Debug)]
pub enum TransportOutcome {
	/// The server answered; any status code counts.
	Completed(RawResponse),
	/// The call failed before a complete response was read.
	Failed(TransportFailure),
}
impl TransportOutcome {
	/// Builds a failure outcome.
	pub fn failed(description: impl Into<String>, partial: Option<RawResponse>) -> Self {
		Self::Failed(TransportFailure { description: description.into(), partial })
	}
}

/// Settings for the default reqwest executor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
	/// Upper bound on a single call, connection through body.
	pub timeout: StdDuration,
	/// Optional `User-Agent`; none is sent when absent.
	pub user_agent: Option<String>,
}
impl ExecutorConfig {
	/// Default ceiling for a single call.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(20);

	/// Returns a reqwest builder configured for single-shot calls.
	///
	/// Idle pooling is disabled so every connection is closed when its call ends, and
	/// redirects are returned to the caller instead of being followed.
	#[cfg(feature = "reqwest")]
	pub fn client_builder(&self) -> reqwest::ClientBuilder {
		let mut builder = ReqwestClient::builder()
			.timeout(self.timeout)
			.pool_max_idle_per_host(0)
			.redirect(reqwest::redirect::Policy::none());

		if let Some(agent) = self.user_agent.as_deref() {
			builder = builder.user_agent(agent);
		}

		builder
	}
}
impl Default for ExecutorConfig {
	fn default() -> Self {
		Self { timeout: Self::DEFAULT_TIMEOUT, user_agent: None }
	}
}

/// Default executor backed by [`ReqwestClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestExecutor(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestExecutor {
	/// Builds an executor with [`ExecutorConfig::default`].
	pub fn new() -> Result<Self, ConfigError> {
		Self::from_config(&ExecutorConfig::default())
	}

	/// Builds an executor from `config`.
	pub fn from_config(config: &ExecutorConfig) -> Result<Self, ConfigError> {
		Ok(Self(config.client_builder().build()?))
	}

	/// Wraps an existing client. Configure it the way [`ExecutorConfig::client_builder`] does
	/// to keep single-shot semantics.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl RequestExecutor for ReqwestExecutor {
	fn send(&self, request: OutboundRequest) -> ExecutorFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let OutboundRequest { method, uri, mut headers, content_type, body } = request;

			if let Some(content_type) = content_type {
				headers.insert(CONTENT_TYPE, content_type);
			}

			let mut builder = client.request(http::Method::from(method), uri).headers(headers);

			if let Some(body) = body {
				builder = builder.body(body);
			}

			let response = match builder.send().await {
				Ok(response) => response,
				Err(e) => return TransportOutcome::failed(describe_error(&e), None),
			};
			let status = response.status();
			let headers = response.headers().to_owned();

			match response.bytes().await {
				Ok(body) => {
					let body = body.to_vec();

					TransportOutcome::Completed(RawResponse { status, headers, body })
				},
				Err(e) => TransportOutcome::failed(
					describe_error(&e),
					Some(RawResponse { status, headers, body: Vec::new() }),
				),
			}
		})
	}
}

#[cfg(feature = "reqwest")]
fn describe_error(err: &ReqwestError) -> String {
	let mut buf = err.to_string();
	let mut source = err.source();

	while let Some(inner) = source {
		buf.push_str(": ");
		buf.push_str(&inner.to_string());

		source = inner.source();
	}

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_config_uses_twenty_second_ceiling() {
		let config = ExecutorConfig::default();

		assert_eq!(config.timeout, StdDuration::from_secs(20));
		assert_eq!(config.user_agent, None);
	}

	#[test]
	fn config_deserializes_partial_input() {
		let config: ExecutorConfig = serde_json::from_str(r#"{"user_agent":"valence-tests"}"#)
			.expect("Executor config should deserialize.");

		assert_eq!(config.timeout, ExecutorConfig::DEFAULT_TIMEOUT);
		assert_eq!(config.user_agent.as_deref(), Some("valence-tests"));
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn refused_connection_is_captured() {
		let executor = ReqwestExecutor::from_config(&ExecutorConfig {
			timeout: StdDuration::from_secs(2),
			..Default::default()
		})
		.expect("Executor should build.");
		let port = std::net::TcpListener::bind("127.0.0.1:0")
			.and_then(|listener| listener.local_addr())
			.expect("Ephemeral port should bind.")
			.port();
		let request = OutboundRequest {
			method: HttpMethod::Get,
			uri: Url::parse(&format!("http://127.0.0.1:{port}/ping")).expect("URI should parse."),
			headers: HeaderMap::new(),
			content_type: None,
			body: None,
		};

		match executor.send(request).await {
			TransportOutcome::Failed(failure) => {
				assert!(failure.partial.is_none());
				assert!(!failure.description.is_empty());
			},
			TransportOutcome::Completed(raw) => panic!("Unexpected response: {raw:?}."),
		}
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn explicit_content_type_replaces_caller_header() {
		// std
		use std::{
			io::{BufRead, BufReader, Read, Write},
			net::TcpListener,
			thread,
		};

		let listener = TcpListener::bind("127.0.0.1:0").expect("Listener should bind.");
		let port = listener.local_addr().expect("Listener should have an address.").port();
		let server = thread::spawn(move || {
			let (stream, _) = listener.accept().expect("Client should connect.");
			let mut reader = BufReader::new(stream);
			let mut head = Vec::new();
			let mut content_length = 0;

			loop {
				let mut line = String::new();

				reader.read_line(&mut line).expect("Request line should be readable.");

				if line == "\r\n" || line.is_empty() {
					break;
				}
				if let Some((name, value)) = line.split_once(':') {
					if name.eq_ignore_ascii_case("content-length") {
						content_length =
							value.trim().parse().expect("Content length should parse.");
					}
				}

				head.push(line.trim_end().to_owned());
			}

			let mut body = vec![0; content_length];

			reader.read_exact(&mut body).expect("Request body should be readable.");
			reader
				.get_mut()
				.write_all(b"HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n")
				.expect("Response should be writable.");

			head
		});
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

		let request = OutboundRequest {
			method: HttpMethod::Post,
			uri: Url::parse(&format!("http://127.0.0.1:{port}/p?t=x")).expect("URI should parse."),
			headers,
			content_type: Some(HeaderValue::from_static("application/json")),
			body: Some(br#"{"a":1}"#.to_vec()),
		};
		let executor = ReqwestExecutor::from_config(&ExecutorConfig {
			timeout: StdDuration::from_secs(5),
			..Default::default()
		})
		.expect("Executor should build.");

		match executor.send(request).await {
			TransportOutcome::Completed(raw) => assert_eq!(raw.status, StatusCode::NO_CONTENT),
			TransportOutcome::Failed(failure) => panic!("Unexpected failure: {failure:?}."),
		}

		let head = server.join().expect("Server thread should finish.");
		let content_types = head
			.iter()
			.filter_map(|line| line.split_once(':'))
			.filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
			.map(|(_, value)| value.trim())
			.collect::<Vec<_>>();

		assert_eq!(content_types, vec!["application/json"]);
	}
}
