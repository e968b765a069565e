//! Authenticated request orchestration.
//!
//! An [`AuthenticatedRequest`] borrows a long-lived [`RequestContext`], resolves its route
//! template once, asks the context's token provider to sign the resolved path, and hands the
//! resulting URI to a [`RequestExecutor`]. Whatever happens on the wire comes back as a
//! [`Response`]; the skew it carries is written into the context so later signatures
//! compensate for the server clock.

pub mod method;

pub use method::*;

// std
use std::{iter, sync::OnceLock, time::Instant};
// crates.io
use http::{HeaderMap, HeaderName, HeaderValue};
// self
use crate::{
	_prelude::*,
	auth::{TokenRequest, TokenSet},
	context::RequestContext,
	error::{ConfigError, DispatchError},
	executor::{OutboundRequest, RequestExecutor, TransportOutcome},
	obs::{self, RequestOutcome, RequestSpan},
	query, route,
	response::Response,
};

/// Lifecycle stage of an [`AuthenticatedRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
	/// Constructed; the path has not been resolved.
	Unresolved,
	/// The path is resolved and cached.
	PathResolved,
	/// At least one dispatch completed and its response is cached.
	Executed,
}

/// One-shot signed call against the API described by a [`RequestContext`].
///
/// The resolved path is memoized on first access: changing route params afterwards does not
/// alter it. Each [`execute`](Self::execute) performs a fresh dispatch and replaces the
/// cached response.
#[derive(Debug)]
pub struct AuthenticatedRequest<'ctx> {
	context: &'ctx RequestContext,
	method: HttpMethod,
	route: String,
	route_params: BTreeMap<String, String>,
	query_params: BTreeMap<String, String>,
	headers: HeaderMap,
	content_type: Option<HeaderValue>,
	payload: Option<Vec<u8>>,
	path: OnceLock<String>,
	response: Option<Response>,
}
impl<'ctx> AuthenticatedRequest<'ctx> {
	/// Creates a request, parsing `method` case-insensitively.
	///
	/// Fails with [`ConfigError::UnsupportedMethod`] unless the method is GET, PUT, POST, or
	/// DELETE.
	pub fn new(
		context: &'ctx RequestContext,
		method: &str,
		route: impl Into<String>,
	) -> Result<Self> {
		let method = HttpMethod::parse(method)?;

		Ok(Self::with_method(context, method, route))
	}

	/// Creates a request from an already validated method.
	pub fn with_method(
		context: &'ctx RequestContext,
		method: HttpMethod,
		route: impl Into<String>,
	) -> Self {
		Self {
			context,
			method,
			route: route.into(),
			route_params: BTreeMap::new(),
			query_params: BTreeMap::new(),
			headers: HeaderMap::new(),
			content_type: None,
			payload: None,
			path: OnceLock::new(),
			response: None,
		}
	}

	/// Adds a route parameter.
	pub fn route_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
		self.route_params.insert(name.into(), value.to_string());

		self
	}

	/// Adds a query parameter; only `GET` requests carry these in the URI.
	pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
		self.query_params.insert(name.into(), value.to_string());

		self
	}

	/// Adds a header, validating its name and value.
	pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
		let header_name = HeaderName::from_bytes(name.as_bytes())
			.map_err(|source| ConfigError::InvalidHeaderName { name: name.to_owned(), source })?;
		let header_value = HeaderValue::from_str(value)
			.map_err(|source| ConfigError::InvalidHeaderValue { name: name.to_owned(), source })?;

		self.headers.insert(header_name, header_value);

		Ok(self)
	}

	/// Replaces the whole header set.
	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;

		self
	}

	/// Sets the content type.
	pub fn content_type(mut self, value: &str) -> Result<Self> {
		let value = HeaderValue::from_str(value).map_err(|source| ConfigError::InvalidHeaderValue {
			name: http::header::CONTENT_TYPE.as_str().to_owned(),
			source,
		})?;

		self.content_type = Some(value);

		Ok(self)
	}

	/// Sets the raw payload.
	pub fn payload(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.payload = Some(body.into());

		self
	}

	/// Context this request signs against.
	pub fn context(&self) -> &'ctx RequestContext {
		self.context
	}

	/// Validated HTTP method.
	pub fn method(&self) -> HttpMethod {
		self.method
	}

	/// Route template as supplied.
	pub fn route(&self) -> &str {
		&self.route
	}

	/// Route parameters.
	pub fn route_params(&self) -> &BTreeMap<String, String> {
		&self.route_params
	}

	/// Mutable route parameters; has no effect on an already resolved path.
	pub fn route_params_mut(&mut self) -> &mut BTreeMap<String, String> {
		&mut self.route_params
	}

	/// Query parameters.
	pub fn query_params(&self) -> &BTreeMap<String, String> {
		&self.query_params
	}

	/// Mutable query parameters.
	pub fn query_params_mut(&mut self) -> &mut BTreeMap<String, String> {
		&mut self.query_params
	}

	/// Mutable header set.
	pub fn headers_mut(&mut self) -> &mut HeaderMap {
		&mut self.headers
	}

	/// Response cached by the latest [`execute`](Self::execute).
	pub fn response(&self) -> Option<&Response> {
		self.response.as_ref()
	}

	/// Current lifecycle stage.
	pub fn state(&self) -> RequestState {
		if self.response.is_some() {
			RequestState::Executed
		} else if self.path.get().is_some() {
			RequestState::PathResolved
		} else {
			RequestState::Unresolved
		}
	}

	/// Resolved path: route params first, then the context's known params.
	///
	/// Computed once; later calls return the cached value.
	pub fn path(&self) -> &str {
		self.path.get_or_init(|| {
			let caller =
				self.route_params.iter().map(|(name, value)| (name.as_str(), value.as_str()));

			route::resolve(&self.route, caller.chain(self.context.known_params()))
		})
	}

	/// Asks the context's provider for this request's tokens.
	pub fn tokens(&self) -> Result<TokenSet> {
		let request =
			TokenRequest { method: self.method, path: self.path(), context: self.context };

		Ok(self.context.token_provider().generate(&request)?)
	}

	/// Composed, unencoded query string with freshly generated tokens.
	pub fn query(&self) -> Result<String> {
		let tokens = self.tokens()?;

		Ok(query::compose(self.method, &self.query_params, &tokens).to_query_string())
	}

	/// Builds the authenticated URI, then overlays every override that has a value.
	pub fn authenticated_uri<I, K, V>(&self, overrides: I) -> Result<Url>
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let uri = self.context.host.to_uri(self.path(), &self.query()?)?;

		Ok(query::overlay(uri, overrides))
	}

	/// Signs and sends the request once, caches the response, and stores its skew in the
	/// context.
	///
	/// Transport failures are returned as a [`Response`]; only token generation and
	/// dispatch invariant violations produce an `Err`.
	pub async fn execute<E>(&mut self, executor: &E) -> Result<&Response>
	where
		E: ?Sized + RequestExecutor,
	{
		let method = self.method;
		let span = RequestSpan::new(method, &self.route);
		let started = Instant::now();

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = span.instrument(self.dispatch(executor)).await;
		let outcome = match &result {
			Ok(response) if response.is_transport_failure() => RequestOutcome::TransportFailure,
			Ok(_) => RequestOutcome::Completed,
			Err(Error::TokenGeneration(_)) => RequestOutcome::TokenFailure,
			Err(_) => RequestOutcome::Rejected,
		};

		span.record_outcome(outcome);
		obs::record_request_outcome(method, outcome);
		obs::record_request_duration(method, outcome, started.elapsed());

		let response = result?;

		self.context.set_server_skew(response.server_skew());
		obs::trace_skew_update(response.server_skew());

		Ok(&*self.response.insert(response))
	}

	async fn dispatch<E>(&self, executor: &E) -> Result<Response>
	where
		E: ?Sized + RequestExecutor,
	{
		let uri = self.authenticated_uri(iter::empty::<(&str, Option<&str>)>())?;

		if !executor.supports(self.method) {
			return Err(DispatchError::UnsupportedMethod { method: self.method }.into());
		}

		obs::trace_dispatch(self.method, &uri, &route::placeholders(self.path()));

		let outcome = executor
			.send(OutboundRequest {
				method: self.method,
				uri,
				headers: self.headers.clone(),
				content_type: self.content_type.clone(),
				body: self.payload.clone(),
			})
			.await;

		if let TransportOutcome::Failed(failure) = &outcome {
			obs::trace_transport_failure(self.method, &failure.description);
		}

		Ok(Response::from_outcome(outcome))
	}
}
