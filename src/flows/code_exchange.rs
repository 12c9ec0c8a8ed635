//! Authorization code exchange.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::FeishuProvider,
	http::ApiHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, CallOutcome, CallSpan},
	provider::Endpoint,
};

#[derive(Debug, Serialize)]
struct CodeExchange<'a> {
	app_access_token: &'a str,
	code: &'a str,
	grant_type: &'static str,
}

impl<C, M> FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code for a user access token.
	///
	/// An app access token is resolved first and sent alongside the code, so the call issues
	/// two requests in order. The token's lifetime is read from `refresh_expires_in`.
	pub async fn exchange_code_for_token(&self, code: &str) -> Result<AccessToken> {
		const ENDPOINT: Endpoint = Endpoint::UserAccessToken;

		let span = CallSpan::new(ENDPOINT, "exchange_code_for_token");

		obs::record_call_outcome(ENDPOINT, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let app_access_token = self.app_access_token().await?;
				let body = CodeExchange {
					app_access_token: app_access_token.expose(),
					code,
					grant_type: "authorization_code",
				};
				let url = self.endpoints.url(ENDPOINT, self.app_mode())?;
				let request = oauth::post_json(ENDPOINT, &url, &body)?;
				let response = oauth::send(
					self.http_client.as_ref(),
					self.transport_mapper.as_ref(),
					ENDPOINT,
					request,
				)
				.await?;
				let Some(data) =
					response.get("data").and_then(Value::as_object).filter(|data| !data.is_empty())
				else {
					let mut message = String::from("Invalid token response");

					if let Some(detail) = oauth::envelope_message(&response) {
						message.push_str(&format!(" ({detail})"));
					}

					return Err(Error::authorization_failed(message, &response));
				};

				AccessToken::from_payload(data.to_owned())
			})
			.await;

		obs::record_call_outcome(ENDPOINT, CallOutcome::of(&result));

		result
	}
}
