//! User profile lookup and identity mapping.

// self
use crate::{
	_prelude::*,
	auth::UserIdentity,
	flows::FeishuProvider,
	http::ApiHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, CallOutcome, CallSpan},
	provider::Endpoint,
};

impl<C, M> FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the raw user payload (`data`) for a user access token.
	///
	/// The token travels both as a bearer credential and as the `user_access_token` query
	/// parameter; the parameter is left out when the token is empty.
	pub async fn fetch_user_by_token(&self, token: &str) -> Result<JsonMap> {
		const ENDPOINT: Endpoint = Endpoint::UserInfo;

		let span = CallSpan::new(ENDPOINT, "fetch_user_by_token");

		obs::record_call_outcome(ENDPOINT, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut url = self.endpoints.url(ENDPOINT, self.app_mode())?;

				if !oauth::is_blank(&Value::from(token)) {
					url.query_pairs_mut().append_pair("user_access_token", token);
				}

				let request = oauth::get_with_bearer(&url, token)?;
				let response = oauth::send(
					self.http_client.as_ref(),
					self.transport_mapper.as_ref(),
					ENDPOINT,
					request,
				)
				.await?;

				match response.get("data").and_then(Value::as_object) {
					Some(data) if !data.is_empty() => Ok(data.to_owned()),
					_ => Err(Error::InvalidResponse {
						message: format!(
							"User info response carries no data: {}",
							serde_json::to_string(&response).unwrap_or_default()
						),
					}),
				}
			})
			.await;

		obs::record_call_outcome(ENDPOINT, CallOutcome::of(&result));

		result
	}

	/// Projects a raw user payload into a [`UserIdentity`]. Never fails.
	pub fn map_to_user_identity(&self, raw: JsonMap) -> UserIdentity {
		UserIdentity::from_payload(raw)
	}

	/// Fetches and maps the user behind a user access token.
	pub async fn user_from_token(&self, token: &str) -> Result<UserIdentity> {
		let raw = self.fetch_user_by_token(token).await?;

		Ok(self.map_to_user_identity(raw))
	}

	/// Runs the whole sign-in: code exchange, profile lookup, and mapping.
	///
	/// The returned identity carries the [`AccessToken`](crate::auth::AccessToken) it was
	/// fetched with.
	pub async fn user_from_code(&self, code: &str) -> Result<UserIdentity> {
		let token = self.exchange_code_for_token(code).await?;
		let user = self.user_from_token(token.access_token.expose()).await?;

		Ok(user.with_token(token))
	}
}
