//! Typed client configuration and application mode.

// self
use crate::{
	_prelude::*,
	auth::{AppId, TokenSecret},
	error::ConfigError,
};

/// How the application is registered on the open platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum AppMode {
	/// Enterprise self-built app; credentials alone mint app/tenant tokens.
	#[default]
	Internal,
	/// Marketplace app; token issuance also requires the rotating `app_ticket`.
	Default,
}
impl AppMode {
	/// Returns the `kind_of_app` value for this mode.
	pub const fn as_str(self) -> &'static str {
		match self {
			AppMode::Internal => "internal",
			AppMode::Default => "default",
		}
	}

	/// Interprets a `kind_of_app` value. Anything other than `internal` selects default mode.
	pub fn from_kind(kind: &str) -> Self {
		if kind == "internal" { AppMode::Internal } else { AppMode::Default }
	}
}
impl From<String> for AppMode {
	fn from(value: String) -> Self {
		Self::from_kind(&value)
	}
}
impl From<Option<String>> for AppMode {
	fn from(value: Option<String>) -> Self {
		Self::from_kind(value.as_deref().unwrap_or_default())
	}
}
impl From<AppMode> for String {
	fn from(value: AppMode) -> Self {
		value.as_str().into()
	}
}
impl Display for AppMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Client credentials and mode flags owned by a provider adapter.
///
/// Deserializes from the recognized configuration keys; `kind_of_app` defaults to
/// `internal` when absent, while an explicit `null` selects default mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
	client_id: AppId,
	client_secret: TokenSecret,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	redirect_uri: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	app_ticket: Option<TokenSecret>,
	#[serde(default, rename = "kind_of_app")]
	app_mode: AppMode,
}
impl ProviderConfig {
	/// Creates an internal-mode configuration for the provided credentials.
	pub fn new(
		client_id: impl AsRef<str>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			client_id: AppId::new(client_id)?,
			client_secret: TokenSecret::new(client_secret),
			redirect_uri: None,
			app_ticket: None,
			app_mode: AppMode::default(),
		})
	}

	/// Sets the redirect URI sent with authorization requests.
	pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
		self.set_redirect_uri(uri);

		self
	}

	/// Sets the application mode.
	pub fn with_app_mode(mut self, mode: AppMode) -> Self {
		self.set_app_mode(mode);

		self
	}

	/// Sets the app ticket required in default mode.
	pub fn with_app_ticket(mut self, ticket: impl Into<String>) -> Self {
		self.set_app_ticket(ticket);

		self
	}

	/// Replaces the redirect URI.
	pub fn set_redirect_uri(&mut self, uri: impl Into<String>) {
		self.redirect_uri = Some(uri.into());
	}

	/// Replaces the application mode.
	pub fn set_app_mode(&mut self, mode: AppMode) {
		self.app_mode = mode;
	}

	/// Replaces the app ticket, typically after the platform pushed a fresh one.
	pub fn set_app_ticket(&mut self, ticket: impl Into<String>) {
		self.app_ticket = Some(TokenSecret::new(ticket));
	}

	/// Application identifier.
	pub fn client_id(&self) -> &AppId {
		&self.client_id
	}

	/// Application secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}

	/// Configured redirect URI, if any.
	pub fn redirect_uri(&self) -> Option<&str> {
		self.redirect_uri.as_deref()
	}

	/// Configured app ticket. Empty tickets count as absent.
	pub fn app_ticket(&self) -> Option<&TokenSecret> {
		self.app_ticket.as_ref().filter(|ticket| !ticket.is_empty())
	}

	/// Current application mode.
	pub fn app_mode(&self) -> AppMode {
		self.app_mode
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn kind_of_app_defaults_to_internal() {
		let config: ProviderConfig =
			serde_json::from_value(json!({ "client_id": "cli_1", "client_secret": "s" }))
				.expect("Minimal configuration should deserialize.");

		assert_eq!(config.app_mode(), AppMode::Internal);
		assert!(config.app_ticket().is_none());
		assert!(config.redirect_uri().is_none());
	}

	#[test]
	fn any_other_kind_selects_default_mode() {
		for kind in ["default", "store", "Internal", ""] {
			let config: ProviderConfig = serde_json::from_value(json!({
				"client_id": "cli_1",
				"client_secret": "s",
				"kind_of_app": kind,
				"app_ticket": "ticket-1",
				"redirect_uri": "https://app.example.com/cb"
			}))
			.expect("Full configuration should deserialize.");

			assert_eq!(config.app_mode(), AppMode::Default, "kind_of_app = {kind:?}");
			assert_eq!(config.app_ticket().map(TokenSecret::expose), Some("ticket-1"));
			assert_eq!(config.redirect_uri(), Some("https://app.example.com/cb"));
		}
	}

	#[test]
	fn null_kind_selects_default_mode() {
		let config: ProviderConfig = serde_json::from_value(
			json!({ "client_id": "cli_1", "client_secret": "s", "kind_of_app": null }),
		)
		.expect("Null `kind_of_app` should deserialize.");

		assert_eq!(config.app_mode(), AppMode::Default);
	}

	#[test]
	fn empty_ticket_counts_as_missing() {
		let config = ProviderConfig::new("cli_1", "s")
			.expect("Configuration fixture should be valid.")
			.with_app_ticket("");

		assert!(config.app_ticket().is_none());
	}

	#[test]
	fn invalid_client_id_is_rejected() {
		assert!(matches!(ProviderConfig::new("", "s"), Err(ConfigError::InvalidClientId(_))));
		assert!(
			serde_json::from_value::<ProviderConfig>(
				json!({ "client_id": "has space", "client_secret": "s" })
			)
			.is_err()
		);
	}

	#[test]
	fn serializes_with_recognized_keys() {
		let config = ProviderConfig::new("cli_1", "s")
			.expect("Configuration fixture should be valid.")
			.with_app_mode(AppMode::Default);
		let value = serde_json::to_value(&config).expect("Configuration should serialize.");

		assert_eq!(value, json!({ "client_id": "cli_1", "client_secret": "s", "kind_of_app": "default" }));
	}
}
