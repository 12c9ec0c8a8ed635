//! The Feishu provider adapter and its operations.
//!
//! [`FeishuProvider`] owns the client configuration, the endpoint table, and the transport.
//! Operations are split by concern:
//!
//! - `authorize`: authorization URL construction (no network);
//! - `app_token`: app and tenant access tokens, internal or default mode;
//! - `code_exchange`: authorization code to user access token;
//! - `user_info`: user profile lookup and identity mapping.
//!
//! Every operation performs a strictly sequential chain of requests and nothing is cached:
//! app/tenant tokens are fetched anew on each call.

mod app_token;
mod authorize;
mod code_exchange;
mod user_info;

pub use authorize::generate_state;

// self
use crate::{
	_prelude::*,
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
	provider::{AppMode, FeishuEndpoints, ProviderConfig},
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Provider specialized for the crate's default reqwest transport stack.
pub type ReqwestFeishuProvider = FeishuProvider<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// OAuth adapter for one Feishu/Lark application.
///
/// The application mode is the only state that influences requests. It starts from the
/// configuration's `kind_of_app` and changes only through the explicit setters below, so a
/// call always observes the mode that was in place when it started.
pub struct FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Open-platform endpoint table.
	pub endpoints: FeishuEndpoints,
	config: ProviderConfig,
	state: Option<String>,
}
impl<C, M> FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a provider that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ProviderConfig,
		endpoints: FeishuEndpoints,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			endpoints,
			config,
			state: None,
		}
	}

	/// Switches to internal (enterprise self-built) mode.
	pub fn with_internal_mode(mut self) -> Self {
		self.set_app_mode(AppMode::Internal);

		self
	}

	/// Switches to default (marketplace) mode, which requires an app ticket.
	pub fn with_default_mode(mut self) -> Self {
		self.set_app_mode(AppMode::Default);

		self
	}

	/// Stores the app ticket used in default mode.
	pub fn with_app_ticket(mut self, ticket: impl Into<String>) -> Self {
		self.set_app_ticket(ticket);

		self
	}

	/// Overrides the redirect URI sent with authorization requests.
	pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
		self.config.set_redirect_uri(uri);

		self
	}

	/// Attaches an opaque `state` value to authorization URLs.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Replaces the application mode in place.
	pub fn set_app_mode(&mut self, mode: AppMode) {
		self.config.set_app_mode(mode);
	}

	/// Replaces the app ticket in place, e.g. after the platform pushed a fresh one.
	pub fn set_app_ticket(&mut self, ticket: impl Into<String>) {
		self.config.set_app_ticket(ticket);
	}

	/// Current application mode.
	pub fn app_mode(&self) -> AppMode {
		self.config.app_mode()
	}

	/// Configuration owned by this provider.
	pub fn config(&self) -> &ProviderConfig {
		&self.config
	}

	/// `state` value attached to authorization URLs, if any.
	pub fn state(&self) -> Option<&str> {
		self.state.as_deref()
	}
}
#[cfg(feature = "reqwest")]
impl FeishuProvider<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a provider against the Feishu open platform with its own reqwest transport.
	///
	/// Use [`FeishuProvider::with_http_client`] to target Lark or a custom base URL.
	pub fn new(config: ProviderConfig) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(
			config,
			FeishuEndpoints::feishu()?,
			ReqwestHttpClient::new()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}
}
impl<C, M> Clone for FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			endpoints: self.endpoints.clone(),
			config: self.config.clone(),
			state: self.state.clone(),
		}
	}
}
impl<C, M> Debug for FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FeishuProvider")
			.field("base", &self.endpoints.base().as_str())
			.field("client_id", self.config.client_id())
			.field("app_mode", &self.config.app_mode())
			.field("app_ticket_set", &self.config.app_ticket().is_some())
			.finish()
	}
}
