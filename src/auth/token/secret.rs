//! Redacting holder for `app_secret`, `app_ticket`, and the app, tenant, and user tokens.

// self
use crate::_prelude::*;

/// Credential string that never shows up in `Debug` or `Display` output.
///
/// Serde reads and writes the plain string, so [`ProviderConfig`](crate::provider::ProviderConfig)
/// keeps its `client_secret` and `app_ticket` keys as-is.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Plain value, for request bodies and headers only.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the value is `""`; an empty `app_ticket` counts as unset.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
