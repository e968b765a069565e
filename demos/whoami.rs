//! Calls `whoami` against a live host with a toy token provider.
//!
//! Set `VALENCE_HOST` (e.g. `https://lms.example.edu`) before running. The provider below only
//! shows where a real signing implementation plugs in; a real server will reject its tokens.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
// self
use valence_request::{
	auth::{AuthTokenProvider, TokenError, TokenRequest, TokenSet},
	context::{AppKeys, Host, RequestContext},
	executor::ReqwestExecutor,
	request::AuthenticatedRequest,
};

#[derive(Debug)]
struct UnsignedProvider;
impl AuthTokenProvider for UnsignedProvider {
	fn generate(&self, request: &TokenRequest<'_>) -> Result<TokenSet, TokenError> {
		let mut tokens = TokenSet::new();

		tokens.insert("x_a", request.context.app_keys.app_id.as_str());
		tokens.insert("x_t", request.adjusted_now().unix_timestamp().to_string());

		Ok(tokens)
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let host = env::var("VALENCE_HOST").unwrap_or_else(|_| "https://lms.example.edu".into());
	let context = RequestContext::builder()
		.host(Host::parse(&host)?)
		.api_version("1.9")
		.app_keys(AppKeys::new("demo-app", "demo-key"))
		.token_provider(Arc::new(UnsignedProvider))
		.build()?;
	let executor = ReqwestExecutor::new()?;
	let route = "/d2l/api/lp/:version/users/whoami";
	let mut request = AuthenticatedRequest::new(&context, "GET", route)?;
	let response = request.execute(&executor).await?;

	println!("Status: {:?}.", response.status_label());
	println!("Body: {}.", response.text());
	println!("Server skew now: {}.", context.server_skew());

	Ok(())
}
