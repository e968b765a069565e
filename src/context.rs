//! Long-lived request context: host, API version, signing keys, token provider, and the
//! server clock skew fed back by every executed request.

pub mod host;
pub mod secret;

pub use host::*;
pub use secret::*;

// self
use crate::{_prelude::*, auth::AuthTokenProvider};

/// Errors raised while constructing or validating a [`RequestContext`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ContextBuildError {
	/// Host is required to build URIs.
	#[error("Missing API host.")]
	MissingHost,
	/// API version substitutes the `:version` placeholder and cannot be empty.
	#[error("Missing API version.")]
	MissingApiVersion,
	/// Every signature carries the application identity.
	#[error("Missing application keys.")]
	MissingAppKeys,
	/// Requests cannot be signed without a token provider.
	#[error("Missing token provider.")]
	MissingTokenProvider,
	/// Host string could not be parsed.
	#[error("Host `{value}` is invalid: {reason}.")]
	InvalidHost {
		/// Host string that failed validation.
		value: String,
		/// Parser explanation.
		reason: String,
	},
	/// Only `http` and `https` hosts are reachable.
	#[error("Host scheme `{scheme}` is unsupported.")]
	UnsupportedScheme {
		/// Scheme that was supplied.
		scheme: String,
	},
}

/// Server clock offset relative to the local clock.
///
/// Every executed request overwrites the value; concurrent writers resolve as
/// last-writer-wins.
#[derive(Debug, Default)]
pub struct ServerSkew(RwLock<Duration>);
impl ServerSkew {
	/// Returns the current offset (server time minus local time).
	pub fn get(&self) -> Duration {
		*self.0.read()
	}

	/// Replaces the offset.
	pub fn set(&self, skew: Duration) {
		*self.0.write() = skew;
	}
}

/// Shared configuration every [`AuthenticatedRequest`](crate::request::AuthenticatedRequest)
/// borrows.
pub struct RequestContext {
	/// API host requests are sent to.
	pub host: Host,
	/// Version substituted for the `:version` route placeholder.
	pub api_version: String,
	/// Application identity.
	pub app_keys: AppKeys,
	/// User identity, absent for anonymous application calls.
	pub user_keys: Option<UserKeys>,
	token_provider: Arc<dyn AuthTokenProvider>,
	server_skew: ServerSkew,
}
impl RequestContext {
	/// Starts a validating builder.
	pub fn builder() -> RequestContextBuilder {
		RequestContextBuilder::default()
	}

	/// Capability that signs each request.
	pub fn token_provider(&self) -> &dyn AuthTokenProvider {
		self.token_provider.as_ref()
	}

	/// Current server clock skew.
	pub fn server_skew(&self) -> Duration {
		self.server_skew.get()
	}

	/// Overwrites the server clock skew.
	pub fn set_server_skew(&self, skew: Duration) {
		self.server_skew.set(skew);
	}

	/// Placeholders the context fills after caller route params.
	pub(crate) fn known_params(&self) -> [(&str, &str); 1] {
		[("version", self.api_version.as_str())]
	}
}
impl Debug for RequestContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestContext")
			.field("host", &self.host)
			.field("api_version", &self.api_version)
			.field("app_keys", &self.app_keys)
			.field("user_keys", &self.user_keys)
			.field("server_skew", &self.server_skew())
			.finish()
	}
}

/// Builder for [`RequestContext`] values.
#[derive(Default)]
pub struct RequestContextBuilder {
	/// Host requests are sent to.
	pub host: Option<Host>,
	/// API version string.
	pub api_version: Option<String>,
	/// Application identity.
	pub app_keys: Option<AppKeys>,
	/// Optional user identity.
	pub user_keys: Option<UserKeys>,
	/// Signing capability.
	pub token_provider: Option<Arc<dyn AuthTokenProvider>>,
	/// Initial skew, usually restored from a previous session.
	pub server_skew: Duration,
}
impl RequestContextBuilder {
	/// Sets the host.
	pub fn host(mut self, host: Host) -> Self {
		self.host = Some(host);

		self
	}

	/// Sets the API version.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = Some(version.into());

		self
	}

	/// Sets the application identity.
	pub fn app_keys(mut self, keys: AppKeys) -> Self {
		self.app_keys = Some(keys);

		self
	}

	/// Sets the user identity.
	pub fn user_keys(mut self, keys: UserKeys) -> Self {
		self.user_keys = Some(keys);

		self
	}

	/// Sets the token provider.
	pub fn token_provider(mut self, provider: Arc<dyn AuthTokenProvider>) -> Self {
		self.token_provider = Some(provider);

		self
	}

	/// Seeds the server skew.
	pub fn server_skew(mut self, skew: Duration) -> Self {
		self.server_skew = skew;

		self
	}

	/// Consumes the builder and validates the resulting context.
	pub fn build(self) -> Result<RequestContext, ContextBuildError> {
		let host = self.host.ok_or(ContextBuildError::MissingHost)?;

		if host.name.trim().is_empty() {
			return Err(ContextBuildError::InvalidHost {
				value: host.to_string(),
				reason: "missing host name".into(),
			});
		}

		let api_version = self
			.api_version
			.filter(|version| !version.trim().is_empty())
			.ok_or(ContextBuildError::MissingApiVersion)?;
		let app_keys = self.app_keys.ok_or(ContextBuildError::MissingAppKeys)?;
		let token_provider = self.token_provider.ok_or(ContextBuildError::MissingTokenProvider)?;
		let server_skew = ServerSkew::default();

		server_skew.set(self.server_skew);

		Ok(RequestContext {
			host,
			api_version,
			app_keys,
			user_keys: self.user_keys,
			token_provider,
			server_skew,
		})
	}
}
impl Debug for RequestContextBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestContextBuilder")
			.field("host", &self.host)
			.field("api_version", &self.api_version)
			.field("token_provider_set", &self.token_provider.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::{TokenError, TokenRequest, TokenSet};

	#[derive(Debug)]
	struct NoTokens;
	impl AuthTokenProvider for NoTokens {
		fn generate(&self, _request: &TokenRequest<'_>) -> Result<TokenSet, TokenError> {
			Ok(TokenSet::default())
		}
	}

	#[test]
	fn context_is_shareable_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}

		assert_send_sync::<RequestContext>();
		assert_send_sync::<ServerSkew>();
	}

	fn builder() -> RequestContextBuilder {
		RequestContext::builder()
			.host(Host::https("lms.example.edu"))
			.api_version("1.9")
			.app_keys(AppKeys::new("app-1", "app-secret"))
			.token_provider(Arc::new(NoTokens))
	}

	#[test]
	fn build_requires_host_version_and_provider() {
		assert_eq!(
			RequestContext::builder().api_version("1.9").build().map(|_| ()),
			Err(ContextBuildError::MissingHost)
		);
		assert_eq!(
			builder().api_version("  ").build().map(|_| ()),
			Err(ContextBuildError::MissingApiVersion)
		);
		assert_eq!(
			RequestContext::builder()
				.host(Host::https("lms.example.edu"))
				.api_version("1.9")
				.app_keys(AppKeys::new("app-1", "app-secret"))
				.build()
				.map(|_| ()),
			Err(ContextBuildError::MissingTokenProvider)
		);
	}

	#[test]
	fn build_requires_app_keys() {
		let err = RequestContext::builder()
			.host(Host::https("lms.example.edu"))
			.api_version("1.9")
			.token_provider(Arc::new(NoTokens))
			.build()
			.expect_err("App keys are mandatory.");

		assert_eq!(err, ContextBuildError::MissingAppKeys);
	}

	#[test]
	fn skew_is_seeded_and_overwritten() {
		let context = builder()
			.server_skew(Duration::seconds(-3))
			.build()
			.expect("Context should build.");

		assert_eq!(context.server_skew(), Duration::seconds(-3));

		context.set_server_skew(Duration::milliseconds(1_500));

		assert_eq!(context.server_skew(), Duration::milliseconds(1_500));
	}

	#[test]
	fn known_params_expose_api_version() {
		let context = builder().build().expect("Context should build.");

		assert_eq!(context.known_params(), [("version", "1.9")]);
	}

	#[test]
	fn debug_output_hides_provider_and_keys() {
		let context = builder().build().expect("Context should build.");
		let rendered = format!("{context:?}");

		assert!(rendered.contains("lms.example.edu"));
		assert!(!rendered.contains("app-secret"));
	}
}
