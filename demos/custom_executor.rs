//! Demonstrates plugging a non-reqwest executor into the pipeline.
//!
//! 1. Implement [`RequestExecutor`] and return a [`TransportOutcome`] for every call.
//! 2. Report failures as [`TransportOutcome::Failed`], attaching any partial response.
//! 3. Pass the executor to [`AuthenticatedRequest::execute`].

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use time::OffsetDateTime;
// self
use valence_request::{
	auth::{AuthTokenProvider, TokenError, TokenRequest, TokenSet},
	context::{AppKeys, Host, RequestContext},
	executor::{ExecutorFuture, OutboundRequest, RawResponse, RequestExecutor, TransportOutcome},
	http::{HeaderMap, StatusCode},
	request::AuthenticatedRequest,
};

#[derive(Debug)]
struct DemoProvider;
impl AuthTokenProvider for DemoProvider {
	fn generate(&self, request: &TokenRequest<'_>) -> Result<TokenSet, TokenError> {
		let timestamp = request.adjusted_now().unix_timestamp().to_string();

		Ok([("x_a", request.context.app_keys.app_id.clone()), ("x_t", timestamp)]
			.into_iter()
			.collect())
	}
}

/// Answers every call with a timestamp rejection one minute ahead of the local clock.
struct SkewedServer;
impl RequestExecutor for SkewedServer {
	fn send(&self, request: OutboundRequest) -> ExecutorFuture<'_> {
		println!("Would send {} {}.", request.method, request.uri);

		let server_time = OffsetDateTime::now_utc().unix_timestamp() + 60;

		Box::pin(async move {
			TransportOutcome::Completed(RawResponse {
				status: StatusCode::FORBIDDEN,
				headers: HeaderMap::new(),
				body: format!("Timestamp out of range\r\n{server_time}").into_bytes(),
			})
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let context = RequestContext::builder()
		.host(Host::https("lms.example.edu"))
		.api_version("1.9")
		.app_keys(AppKeys::new("demo-app", "demo-key"))
		.token_provider(Arc::new(DemoProvider))
		.build()?;
	let route = "/d2l/api/lp/:version/users/whoami";
	let mut first = AuthenticatedRequest::new(&context, "get", route)?;

	first.execute(&SkewedServer).await?;

	println!("Learned server skew: {}.", context.server_skew());

	let mut second = AuthenticatedRequest::new(&context, "get", route)?;

	second.execute(&SkewedServer).await?;

	Ok(())
}
