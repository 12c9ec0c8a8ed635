//! Runs the whole sign-in against an in-memory transport instead of reqwest.
//!
//! 1. Implement [`ApiHttpClient`] so the transport records [`ResponseMetadata`] via the
//!    provided [`ResponseMetadataSlot`].
//! 2. Provide a [`TransportErrorMapper`] for the transport's own error type.
//! 3. Hand both to [`FeishuProvider::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use feishu_oauth::{
	error::{Error, TransportError},
	flows::FeishuProvider,
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	provider::{Endpoint, FeishuEndpoints, ProviderConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ProviderConfig::new("cli_demo", "demo-secret")?;
	let provider: FeishuProvider<CannedHttpClient, CannedTransportErrorMapper> =
		FeishuProvider::with_http_client(
			config.clone(),
			FeishuEndpoints::feishu()?,
			Arc::new(CannedHttpClient { offline: false }),
			Arc::new(CannedTransportErrorMapper),
		);
	let user = provider.user_from_code("demo-code").await?;

	println!("Signed in as {:?} ({:?}).", user.name, user.id);

	let offline: FeishuProvider<CannedHttpClient, CannedTransportErrorMapper> =
		FeishuProvider::with_http_client(
			config,
			FeishuEndpoints::lark()?,
			Arc::new(CannedHttpClient { offline: true }),
			Arc::new(CannedTransportErrorMapper),
		);

	match offline.tenant_access_token().await {
		Ok(_) => println!("Offline transport unexpectedly produced a token."),
		Err(e) => println!("Transport error mapped by the adapter: {e}"),
	}

	Ok(())
}

#[derive(Debug)]
struct Offline;
impl Display for Offline {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("network unreachable")
	}
}
impl StdError for Offline {}

/// Answers each open-platform path with a canned body.
#[derive(Clone)]
struct CannedHttpClient {
	offline: bool,
}
impl ApiHttpClient for CannedHttpClient {
	type Handle = CannedHandle;
	type TransportError = Offline;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		CannedHandle { slot, offline: self.offline }
	}
}

struct CannedHandle {
	slot: ResponseMetadataSlot,
	offline: bool,
}
impl<'a> AsyncHttpClient<'a> for CannedHandle {
	type Error = HttpClientError<Offline>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			self.slot.take();

			if self.offline {
				return Err(HttpClientError::Reqwest(Box::new(Offline)));
			}

			let path = request.uri().path();
			let body: &[u8] = if path.ends_with("/auth/v3/app_access_token/internal") {
				br#"{"code":0,"msg":"ok","app_access_token":"a-demo","expire":7200}"#
			} else if path.ends_with("/authen/v1/access_token") {
				br#"{"code":0,"data":{"access_token":"u-demo","refresh_expires_in":2592000}}"#
			} else if path.ends_with("/authen/v1/user_info") {
				br#"{"code":0,"data":{"user_id":"ou_demo","name":"Demo User"}}"#
			} else {
				br#"{"code":404,"msg":"unknown path"}"#
			};

			self.slot.store(ResponseMetadata { status: Some(200), ..Default::default() });

			Ok(HttpResponse::new(body.to_vec()))
		})
	}
}

struct CannedTransportErrorMapper;
impl TransportErrorMapper<Offline> for CannedTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: Endpoint,
		_meta: Option<&ResponseMetadata>,
		err: HttpClientError<Offline>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => {
				println!("{endpoint} failed: {inner}.");

				TransportError::network(*inner).into()
			},
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransportError::network(std::io::Error::other(format!("{other:?}"))).into(),
		}
	}
}
