//! Token-generation contract consumed by the request pipeline.
//!
//! The crate never signs anything itself. A [`RequestContext`] carries an
//! [`AuthTokenProvider`] and the pipeline hands it a [`TokenRequest`] view (method, resolved
//! path, context) right before composing the query string. Whatever [`TokenSet`] comes back is
//! appended to the URI for exactly one dispatch.

// std
use std::vec::IntoIter;
// self
use crate::{_prelude::*, context::RequestContext, error::BoxError, request::HttpMethod};

/// Signs requests on behalf of a [`RequestContext`].
pub trait AuthTokenProvider
where
	Self: 'static + Send + Sync,
{
	/// Produces the token parameters for `request`.
	///
	/// Implementations should compensate their timestamps with
	/// [`TokenRequest::adjusted_now`] so that skew learned from earlier responses is applied.
	fn generate(&self, request: &TokenRequest<'_>) -> Result<TokenSet, TokenError>;
}

/// Read-only view of a request handed to an [`AuthTokenProvider`].
#[derive(Clone, Copy, Debug)]
pub struct TokenRequest<'a> {
	/// Verb the signature covers.
	pub method: HttpMethod,
	/// Fully resolved request path.
	pub path: &'a str,
	/// Context holding keys and the current server skew.
	pub context: &'a RequestContext,
}
impl TokenRequest<'_> {
	/// Local time shifted by the context's server skew.
	pub fn adjusted_now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc() + self.context.server_skew()
	}
}

/// Failure reported by an [`AuthTokenProvider`]; propagated to callers unchanged.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// Provider-supplied explanation.
	#[error("{0}")]
	Message(String),
	/// Provider-specific error value.
	#[error(transparent)]
	Source(BoxError),
}
impl TokenError {
	/// Creates an error from a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self::Message(message.into())
	}

	/// Wraps a provider-specific error.
	pub fn from_source(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Source(Box::new(src))
	}
}

/// Token parameters for a single request, in provider order.
///
/// Inserting an existing name replaces its value in place. Values are redacted from
/// `Debug` output because they are signatures.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenSet(Vec<(String, String)>);
impl TokenSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a token.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((name, value)),
		}
	}

	/// Returns the value for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.iter().find(|(existing, _)| existing == name).map(|(_, value)| value.as_str())
	}

	/// Iterates over `(name, value)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Number of tokens.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the set holds no tokens.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl<K, V> FromIterator<(K, V)> for TokenSet
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut set = Self::new();

		for (name, value) in iter {
			set.insert(name, value);
		}

		set
	}
}
impl IntoIterator for TokenSet {
	type IntoIter = IntoIter<(String, String)>;
	type Item = (String, String);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
impl Debug for TokenSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_map().entries(self.0.iter().map(|(name, _)| (name, "<redacted>"))).finish()
	}
}
