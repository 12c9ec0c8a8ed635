//! Normalized user identity projected from the `authen/v1/user_info` payload.

// self
use crate::{_prelude::*, auth::AccessToken, oauth};

/// User identity as seen by the application.
///
/// Every field is optional; projection from a raw payload never fails.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
	/// Platform user identifier (`user_id`).
	pub id: Option<String>,
	/// Display name (`name`).
	pub name: Option<String>,
	/// Nickname; the platform has none, so this mirrors `name`.
	pub nickname: Option<String>,
	/// Avatar URL (`avatar_url`).
	pub avatar_url: Option<String>,
	/// Email address (`email`).
	pub email: Option<String>,
	/// Raw payload the identity was projected from.
	pub raw: JsonMap,
	/// Access token used to fetch the identity, when it came from a code exchange.
	#[serde(skip)]
	pub token: Option<AccessToken>,
}
impl UserIdentity {
	/// Projects a raw user payload. Missing or non-scalar fields become `None`.
	pub fn from_payload(raw: JsonMap) -> Self {
		let field = |key: &str| raw.get(key).and_then(oauth::scalar_string);
		let name = field("name");

		Self {
			id: field("user_id"),
			nickname: name.clone(),
			name,
			avatar_url: field("avatar_url"),
			email: field("email"),
			token: None,
			raw,
		}
	}

	/// Attaches the access token the identity was fetched with.
	pub fn with_token(mut self, token: AccessToken) -> Self {
		self.token = Some(token);

		self
	}
}
