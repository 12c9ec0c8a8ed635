//! App and tenant access token resolution.
//!
//! Internal apps authenticate with `app_id` + `app_secret` against the `/internal` paths.
//! Default (marketplace) apps must also present the `app_ticket` pushed by the platform; the
//! ticket is checked before any request goes out. Both endpoints return the token at the top
//! level of the response instead of under `data`.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	flows::FeishuProvider,
	http::ApiHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, CallOutcome, CallSpan},
	provider::{AppMode, Endpoint},
};

#[derive(Debug, Serialize)]
struct AppCredentials<'a> {
	app_id: &'a str,
	app_secret: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	app_ticket: Option<&'a str>,
}

impl<C, M> FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Requests a fresh app access token, identifying the application itself.
	pub async fn app_access_token(&self) -> Result<TokenSecret> {
		self.app_credential(Endpoint::AppAccessToken, "app_access_token").await
	}

	/// Requests a fresh tenant access token, identifying the application within a tenant.
	pub async fn tenant_access_token(&self) -> Result<TokenSecret> {
		self.app_credential(Endpoint::TenantAccessToken, "tenant_access_token").await
	}

	async fn app_credential(&self, endpoint: Endpoint, field: &'static str) -> Result<TokenSecret> {
		let span = CallSpan::new(endpoint, "app_credential");

		obs::record_call_outcome(endpoint, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mode = self.app_mode();
				let app_ticket = match mode {
					AppMode::Internal => None,
					AppMode::Default => Some(self.config().app_ticket().ok_or_else(|| {
						Error::AuthorizationFailed {
							message: "Default mode requires `app_ticket`; configure it first"
								.into(),
							payload: Value::Null,
						}
					})?),
				};
				let body = AppCredentials {
					app_id: self.config().client_id(),
					app_secret: self.config().client_secret().expose(),
					app_ticket: app_ticket.map(TokenSecret::expose),
				};
				let url = self.endpoints.url(endpoint, mode)?;
				let request = oauth::post_json(endpoint, &url, &body)?;
				let response = oauth::send(
					self.http_client.as_ref(),
					self.transport_mapper.as_ref(),
					endpoint,
					request,
				)
				.await?;

				response
					.get(field)
					.filter(|value| !oauth::is_blank(value))
					.and_then(oauth::scalar_string)
					.map(TokenSecret::new)
					.ok_or_else(|| {
						let mut message = format!("Invalid `{field}` response");

						if let Some(detail) = oauth::envelope_message(&response) {
							message.push_str(&format!(" ({detail})"));
						}

						Error::authorization_failed(message, &response)
					})
			})
			.await;

		obs::record_call_outcome(endpoint, CallOutcome::of(&result));

		result
	}
}
