mod common;

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};
// self
use common::{StaticTokenProvider, build_context};
use valence_request::{
	context::Host,
	error::{DispatchError, Error},
	executor::{ExecutorFuture, OutboundRequest, RawResponse, RequestExecutor, TransportOutcome},
	http::{HeaderMap, HeaderValue, StatusCode},
	request::{AuthenticatedRequest, HttpMethod},
};

/// Executor that fails mid-body after receiving a timestamp rejection.
#[derive(Default)]
struct TruncatingExecutor {
	requests: Mutex<Vec<OutboundRequest>>,
	server_offset: Duration,
}
impl TruncatingExecutor {
	fn with_offset(server_offset: Duration) -> Self {
		Self { requests: Default::default(), server_offset }
	}
}
impl RequestExecutor for TruncatingExecutor {
	fn supports(&self, method: HttpMethod) -> bool {
		method != HttpMethod::Delete
	}

	fn send(&self, request: OutboundRequest) -> ExecutorFuture<'_> {
		self.requests.lock().push(request);

		let server_time = (OffsetDateTime::now_utc() + self.server_offset).unix_timestamp();

		Box::pin(async move {
			TransportOutcome::failed(
				"connection reset while reading body",
				Some(RawResponse {
					status: StatusCode::FORBIDDEN,
					headers: HeaderMap::new(),
					body: format!("Timestamp out of range {server_time}").into_bytes(),
				}),
			)
		})
	}
}

fn context() -> valence_request::context::RequestContext {
	build_context(
		Host::https("lms.example.edu"),
		Arc::new(StaticTokenProvider::new([("x_t", "1700000000")])),
	)
}

#[tokio::test]
async fn partial_failure_feeds_skew_back() {
	let context = context();
	let executor = TruncatingExecutor::with_offset(Duration::seconds(-300));
	let route = "/d2l/api/lp/:version/users/whoami";
	let mut request = AuthenticatedRequest::with_method(&context, HttpMethod::Get, route);
	let response = request.execute(&executor).await.expect("Execute should return a response.");

	assert!(response.is_transport_failure());
	assert_eq!(response.failure(), Some("connection reset while reading body"));
	assert_eq!(response.status(), Some(StatusCode::FORBIDDEN));

	let skew = context.server_skew();

	assert!(
		(Duration::seconds(-302)..=Duration::seconds(-298)).contains(&skew),
		"Unexpected skew {skew}."
	);
}

#[tokio::test]
async fn outbound_request_carries_exactly_the_caller_headers() {
	let context = context();
	let executor = TruncatingExecutor::default();
	let route = "/d2l/api/lp/:version/users/:id";
	let mut request = AuthenticatedRequest::with_method(&context, HttpMethod::Put, route)
		.route_param("id", 3)
		.header("x-request-id", "abc")
		.expect("Header should be valid.");

	request.execute(&executor).await.expect("Execute should return a response.");

	let requests = executor.requests.lock();
	let sent = requests.first().expect("One request should be recorded.");

	assert_eq!(sent.headers.len(), 1);
	assert_eq!(sent.headers.get("x-request-id"), Some(&HeaderValue::from_static("abc")));
	assert!(sent.content_type.is_none());
	assert!(sent.body.is_none());
	assert_eq!(
		sent.uri.as_str(),
		"https://lms.example.edu/d2l/api/lp/1.9/users/3?x_t=1700000000"
	);
}

#[tokio::test]
async fn unsupported_verbs_fail_before_dispatch() {
	let context = context();
	let executor = TruncatingExecutor::default();
	let route = "/d2l/api/lp/:version/users/3";
	let mut request = AuthenticatedRequest::with_method(&context, HttpMethod::Delete, route);
	let err =
		request.execute(&executor).await.expect_err("DELETE is not supported by this executor.");

	match err {
		Error::Dispatch(DispatchError::UnsupportedMethod { method }) =>
			assert_eq!(method, HttpMethod::Delete),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert!(executor.requests.lock().is_empty());
}
