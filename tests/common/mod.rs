//! Shared helpers for integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
// self
use valence_request::{
	auth::{AuthTokenProvider, TokenError, TokenRequest, TokenSet},
	context::{AppKeys, Host, RequestContext, UserKeys},
	executor::{ExecutorConfig, ReqwestExecutor},
};

/// Token provider that returns a fixed token set and records every request it signed.
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
	tokens: Vec<(String, String)>,
	signed: Mutex<Vec<String>>,
}
impl StaticTokenProvider {
	pub fn new<I, K, V>(tokens: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			tokens: tokens.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
			signed: Default::default(),
		}
	}

	/// `METHOD path` pairs signed so far.
	pub fn signed(&self) -> Vec<String> {
		self.signed.lock().clone()
	}
}
impl AuthTokenProvider for StaticTokenProvider {
	fn generate(&self, request: &TokenRequest<'_>) -> Result<TokenSet, TokenError> {
		self.signed.lock().push(format!("{} {}", request.method, request.path));

		Ok(self.tokens.iter().cloned().collect())
	}
}

pub fn build_context(host: Host, provider: Arc<dyn AuthTokenProvider>) -> RequestContext {
	RequestContext::builder()
		.host(host)
		.api_version("1.9")
		.app_keys(AppKeys::new("test-app-id", "test-app-key"))
		.user_keys(UserKeys::new("test-user-id", "test-user-key"))
		.token_provider(provider)
		.build()
		.expect("Failed to build test request context.")
}

/// Executor that accepts the self-signed certificates `httpmock` serves during tests.
pub fn build_executor() -> ReqwestExecutor {
	let config =
		ExecutorConfig { timeout: std::time::Duration::from_secs(5), ..Default::default() };
	let client = config
		.client_builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure test client.");

	ReqwestExecutor::with_client(client)
}
