//! Signing key material held by a [`RequestContext`](super::RequestContext).

// self
use crate::_prelude::*;

/// Redacted key wrapper keeping signing material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySecret(String);
impl KeySecret {
	/// Wraps a new key string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner key. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for KeySecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for KeySecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("KeySecret").field(&"<redacted>").finish()
	}
}
impl Display for KeySecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Application identity issued by the API operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppKeys {
	/// Public application identifier, sent alongside every signature.
	pub app_id: String,
	/// Application signing key.
	pub app_key: KeySecret,
}
impl AppKeys {
	/// Bundles an application identifier with its signing key.
	pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
		Self { app_id: app_id.into(), app_key: KeySecret::new(app_key) }
	}
}

/// User identity issued by the server after the user authorized the application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserKeys {
	/// Server-issued user identifier.
	pub user_id: String,
	/// Server-issued user signing key.
	pub user_key: KeySecret,
}
impl UserKeys {
	/// Bundles a user identifier with its signing key.
	pub fn new(user_id: impl Into<String>, user_key: impl Into<String>) -> Self {
		Self { user_id: user_id.into(), user_key: KeySecret::new(user_key) }
	}
}
