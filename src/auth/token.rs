//! Normalized user access token returned by the code exchange.

pub mod secret;

// self
use crate::{
	_prelude::*,
	auth::token::secret::TokenSecret,
	oauth::{self, is_blank},
};

/// Normalized record for the `authen/v1/access_token` payload.
///
/// The record can only be built from a payload whose `access_token` field is present and
/// non-empty. Every field the platform returned stays available through [`AccessToken::raw`].
///
/// Serde goes through the raw payload too, so deserialization applies the same check.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonMap", into = "JsonMap")]
pub struct AccessToken {
	/// User access token; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token, when the platform issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Lifetime in seconds, read from [`AccessToken::EXPIRES_IN_KEY`].
	pub expires_in: i64,
	/// Instant the payload was normalized.
	pub received_at: OffsetDateTime,
	/// Raw `data` payload as returned by the platform.
	pub raw: JsonMap,
}
impl AccessToken {
	/// Payload key holding the access token.
	pub const ACCESS_TOKEN_KEY: &'static str = "access_token";
	/// Payload key holding the lifetime. Feishu reports the refresh window here, not under
	/// `expires_in`.
	pub const EXPIRES_IN_KEY: &'static str = "refresh_expires_in";
	/// Payload key holding the refresh token.
	pub const REFRESH_TOKEN_KEY: &'static str = "refresh_token";

	/// Normalizes a `data` payload, rejecting payloads without an access token.
	pub fn from_payload(raw: JsonMap) -> Result<Self> {
		let access_token = match raw.get(Self::ACCESS_TOKEN_KEY) {
			Some(value) if !is_blank(value) => oauth::scalar_string(value),
			_ => None,
		};
		let Some(access_token) = access_token else {
			let message = format!(
				"Authorize Failed: {}",
				serde_json::to_string(&raw).unwrap_or_default()
			);

			return Err(Error::authorization_failed(message, &raw));
		};
		let refresh_token = raw
			.get(Self::REFRESH_TOKEN_KEY)
			.and_then(oauth::scalar_string)
			.filter(|value| !value.is_empty())
			.map(TokenSecret::new);
		let expires_in = raw.get(Self::EXPIRES_IN_KEY).map(int_value).unwrap_or(0);

		Ok(Self {
			access_token: TokenSecret::new(access_token),
			refresh_token,
			expires_in,
			received_at: OffsetDateTime::now_utc(),
			raw,
		})
	}

	/// Lifetime as a [`Duration`].
	pub fn lifetime(&self) -> Duration {
		Duration::seconds(self.expires_in)
	}

	/// Instant at which the lifetime reported by the platform runs out.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.received_at.saturating_add(self.lifetime())
	}
}
impl TryFrom<JsonMap> for AccessToken {
	type Error = Error;

	fn try_from(raw: JsonMap) -> Result<Self> {
		Self::from_payload(raw)
	}
}
impl From<AccessToken> for JsonMap {
	fn from(token: AccessToken) -> Self {
		token.raw
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_in", &self.expires_in)
			.field("received_at", &self.received_at)
			.field("raw_keys", &self.raw.keys().collect::<Vec<_>>())
			.finish()
	}
}

// Lenient integer coercion: numbers truncate, numeric strings parse, anything else is zero.
fn int_value(value: &Value) -> i64 {
	match value {
		Value::Number(number) => number
			.as_i64()
			.or_else(|| number.as_f64().map(|float| float as i64))
			.unwrap_or_default(),
		Value::String(text) => {
			let text = text.trim();

			text.parse::<i64>()
				.ok()
				.or_else(|| text.parse::<f64>().ok().map(|float| float as i64))
				.unwrap_or_default()
		},
		Value::Bool(flag) => i64::from(*flag),
		_ => 0,
	}
}
