//! Query-string composition and URI parameter overlay.

// self
use crate::{_prelude::*, auth::TokenSet, request::HttpMethod};

/// Ordered `(name, value)` pairs where re-inserting a name replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPairs(Vec<(String, String)>);
impl QueryPairs {
	/// Adds or replaces a pair.
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

	/// Iterates over the pairs in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Whether no pairs are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Joins the pairs as `name=value` separated by `&`, without encoding.
	pub fn to_query_string(&self) -> String {
		let mut buf = String::new();

		for (idx, (name, value)) in self.0.iter().enumerate() {
			if idx > 0 {
				buf.push('&');
			}

			buf.push_str(name);
			buf.push('=');
			buf.push_str(value);
		}

		buf
	}
}
impl<K, V> FromIterator<(K, V)> for QueryPairs
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut pairs = Self::default();

		for (name, value) in iter {
			pairs.insert(name, value);
		}

		pairs
	}
}

/// Composes the query pairs for a request.
///
/// Tokens are always present. Only `GET` keeps the caller's parameters, with tokens
/// overriding them on collision; every other verb sends the tokens alone.
pub fn compose(
	method: HttpMethod,
	query_params: &BTreeMap<String, String>,
	tokens: &TokenSet,
) -> QueryPairs {
	let mut pairs = QueryPairs::default();

	if method.carries_query() {
		for (name, value) in query_params {
			pairs.insert(name.as_str(), value.as_str());
		}
	}
	for (name, value) in tokens.iter() {
		pairs.insert(name, value);
	}

	pairs
}

/// Decodes the query already on `uri`, overlays every override with a value, and re-encodes.
///
/// Overrides whose value is `None` leave the existing pair untouched. Duplicate names in
/// the existing query collapse to their last value.
pub fn overlay<I, K, V>(mut uri: Url, overrides: I) -> Url
where
	I: IntoIterator<Item = (K, Option<V>)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut pairs: QueryPairs = uri.query_pairs().collect();

	for (name, value) in overrides {
		if let Some(value) = value {
			pairs.insert(name.as_ref(), value.as_ref());
		}
	}

	if pairs.is_empty() {
		uri.set_query(None);
	} else {
		uri.query_pairs_mut().clear().extend_pairs(pairs.iter());
	}

	uri
}
