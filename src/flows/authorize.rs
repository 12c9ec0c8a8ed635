//! Authorization URL construction.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	flows::FeishuProvider,
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
	provider::Endpoint,
};

const STATE_LEN: usize = 32;

impl<C, M> FeishuProvider<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the browser authorization URL (`authen/v1/index`).
	///
	/// The query carries `redirect_uri` (when configured), `app_id`, and `state` (when set).
	/// No request is sent.
	pub fn build_authorization_url(&self) -> Result<Url> {
		let mut url = self.endpoints.url(Endpoint::Authorize, self.app_mode())?;
		let mut pairs = url.query_pairs_mut();

		if let Some(redirect_uri) = self.config().redirect_uri() {
			pairs.append_pair("redirect_uri", redirect_uri);
		}

		pairs.append_pair("app_id", self.config().client_id());

		if let Some(state) = self.state() {
			pairs.append_pair("state", state);
		}

		drop(pairs);

		Ok(url)
	}
}

/// Generates a random alphanumeric value suitable for [`FeishuProvider::with_state`].
pub fn generate_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
