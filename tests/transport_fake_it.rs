// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
use serde_json::{Value, json};
use time::Duration;
use url::Url;
// self
use feishu_oauth::{
	error::{ConfigError, Error, TransientError, TransportError},
	flows::FeishuProvider,
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{StatusCode, header::AUTHORIZATION},
		},
	},
	provider::{AppMode, Endpoint, FeishuEndpoints, ProviderConfig},
};

#[derive(Debug)]
enum FakeTransportError {
	ConnectionReset,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset by peer."),
		}
	}
}
impl StdError for FakeTransportError {}

enum Scripted {
	Respond(u16, Value),
	Fail(ResponseMetadata),
}

#[derive(Debug)]
struct Recorded {
	method: String,
	url: Url,
	authorization: Option<String>,
	body: Value,
}

/// In-memory transport that replays scripted responses and records every request.
#[derive(Clone, Default)]
struct ScriptedHttpClient {
	script: Arc<Mutex<VecDeque<Scripted>>>,
	requests: Arc<Mutex<Vec<Recorded>>>,
}
impl ScriptedHttpClient {
	fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
		Self { script: Arc::new(Mutex::new(script.into_iter().collect())), ..Default::default() }
	}

	fn take_requests(&self) -> Vec<Recorded> {
		std::mem::take(&mut *self.requests.lock())
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		ScriptedHandle { client: self.clone(), slot }
	}
}

struct ScriptedHandle {
	client: ScriptedHttpClient,
	slot: ResponseMetadataSlot,
}
impl<'c> AsyncHttpClient<'c> for ScriptedHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			assert!(
				self.slot.take().is_none(),
				"ResponseMetadataSlot must be clear before dispatching a request."
			);

			let body = if request.body().is_empty() {
				Value::Null
			} else {
				serde_json::from_slice(request.body()).expect("Request bodies should be JSON.")
			};

			self.client.requests.lock().push(Recorded {
				method: request.method().to_string(),
				url: Url::parse(&request.uri().to_string()).expect("Request URI should parse."),
				authorization: request
					.headers()
					.get(AUTHORIZATION)
					.and_then(|value| value.to_str().ok())
					.map(ToOwned::to_owned),
				body,
			});

			let next = self
				.client
				.script
				.lock()
				.pop_front()
				.expect("Transport received more requests than scripted.");

			match next {
				Scripted::Respond(status, body) => {
					let mut response = HttpResponse::new(
						serde_json::to_vec(&body).expect("Scripted body should serialize."),
					);

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Scripted status should be valid.");

					self.slot.store(ResponseMetadata { status: Some(status), ..Default::default() });

					Ok(response)
				},
				Scripted::Fail(meta) => {
					self.slot.store(meta);

					Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionReset)))
				},
			}
		})
	}
}

#[derive(Clone, Default)]
struct RecordingTransportErrorMapper {
	seen: Arc<Mutex<Vec<(Endpoint, Option<ResponseMetadata>)>>>,
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: Endpoint,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.seen.lock().push((endpoint, meta.cloned()));

		match err {
			HttpClientError::Reqwest(inner) => TransientError::Upstream {
				endpoint,
				message: format!("Fake transport error: {inner}"),
				status: meta.and_then(|value| value.status),
				retry_after: meta.and_then(|value| value.retry_after),
			}
			.into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransportError::network(std::io::Error::other(format!("{other:?}"))).into(),
		}
	}
}

type ScriptedProvider = FeishuProvider<ScriptedHttpClient, RecordingTransportErrorMapper>;

fn build_provider(
	endpoints: FeishuEndpoints,
	script: impl IntoIterator<Item = Scripted>,
) -> (ScriptedProvider, ScriptedHttpClient, RecordingTransportErrorMapper) {
	let config = ProviderConfig::new("cli_fake", "secret-fake")
		.expect("Fake client identifier should be valid.");
	let http_client = ScriptedHttpClient::new(script);
	let mapper = RecordingTransportErrorMapper::default();
	let provider = FeishuProvider::with_http_client(
		config,
		endpoints,
		Arc::new(http_client.clone()),
		Arc::new(mapper.clone()),
	);

	(provider, http_client, mapper)
}

fn feishu() -> FeishuEndpoints {
	FeishuEndpoints::feishu().expect("Built-in Feishu base should be valid.")
}

#[tokio::test]
async fn sign_in_issues_requests_in_order() {
	let (provider, http_client, _) = build_provider(feishu(), [
		Scripted::Respond(200, json!({ "code": 0, "app_access_token": "a-1" })),
		Scripted::Respond(200, json!({ "code": 0, "data": { "access_token": "u-1" } })),
		Scripted::Respond(200, json!({ "code": 0, "data": { "user_id": "ou_1", "name": "Ann" } })),
	]);
	let identity = provider.user_from_code("code-1").await.expect("Sign-in should succeed.");

	assert_eq!(identity.id.as_deref(), Some("ou_1"));

	let requests = http_client.take_requests();
	let calls = requests
		.iter()
		.map(|request| (request.method.as_str(), request.url.path()))
		.collect::<Vec<_>>();

	assert_eq!(calls, [
		("POST", "/open-apis/auth/v3/app_access_token/internal"),
		("POST", "/open-apis/authen/v1/access_token"),
		("GET", "/open-apis/authen/v1/user_info"),
	]);
	assert_eq!(
		requests[1].body,
		json!({ "app_access_token": "a-1", "code": "code-1", "grant_type": "authorization_code" })
	);
	assert_eq!(requests[2].url.query(), Some("user_access_token=u-1"));
	assert_eq!(requests[2].authorization.as_deref(), Some("Bearer u-1"));
}

#[tokio::test]
async fn app_ticket_is_sent_only_in_default_mode() {
	let (provider, http_client, _) = build_provider(feishu(), [
		Scripted::Respond(200, json!({ "tenant_access_token": "t-1" })),
		Scripted::Respond(200, json!({ "tenant_access_token": "t-2" })),
	]);

	provider.tenant_access_token().await.expect("Internal tenant token should succeed.");

	let provider = provider.with_default_mode().with_app_ticket("ticket-9");

	provider.tenant_access_token().await.expect("Default tenant token should succeed.");

	let requests = http_client.take_requests();

	assert_eq!(requests[0].url.path(), "/open-apis/auth/v3/tenant_access_token/internal");
	assert_eq!(requests[0].body, json!({ "app_id": "cli_fake", "app_secret": "secret-fake" }));
	assert_eq!(requests[1].url.path(), "/open-apis/auth/v3/tenant_access_token");
	assert_eq!(
		requests[1].body,
		json!({ "app_id": "cli_fake", "app_secret": "secret-fake", "app_ticket": "ticket-9" })
	);
}

#[tokio::test]
async fn empty_ticket_counts_as_missing() {
	let (provider, http_client, _) = build_provider(feishu(), []);
	let provider = provider.with_default_mode().with_app_ticket("");
	let err = provider.app_access_token().await.expect_err("Empty tickets must be rejected.");

	assert!(matches!(err, Error::AuthorizationFailed { payload: Value::Null, .. }));
	assert!(http_client.take_requests().is_empty());
}

#[tokio::test]
async fn blank_user_token_omits_query_parameter() {
	let (provider, http_client, _) = build_provider(feishu(), [Scripted::Respond(
		200,
		json!({ "code": 0, "data": { "user_id": "ou_2" } }),
	)]);
	let raw = provider.fetch_user_by_token("").await.expect("User lookup should succeed.");

	assert_eq!(raw.get("user_id"), Some(&json!("ou_2")));

	let requests = http_client.take_requests();

	assert_eq!(requests[0].url.query(), None);
	assert_eq!(requests[0].authorization.as_deref(), Some("Bearer "));
}

#[tokio::test]
async fn lark_endpoints_target_larksuite_host() {
	let endpoints = FeishuEndpoints::lark().expect("Built-in Lark base should be valid.");
	let (provider, http_client, _) =
		build_provider(endpoints, [Scripted::Respond(200, json!({ "app_access_token": "a-1" }))]);

	provider.app_access_token().await.expect("Lark app token should succeed.");

	let requests = http_client.take_requests();

	assert_eq!(
		requests[0].url.as_str(),
		"https://open.larksuite.com/open-apis/auth/v3/app_access_token/internal"
	);
}

#[tokio::test]
async fn transport_failures_reach_custom_mapper_with_metadata() {
	let meta = ResponseMetadata {
		status: Some(503),
		retry_after: Some(Duration::seconds(5)),
		log_id: Some("log-1".into()),
	};
	let (provider, _, mapper) = build_provider(feishu(), [Scripted::Fail(meta.clone())]);
	let err = provider.app_access_token().await.expect_err("Transport failures must surface.");

	match err {
		Error::Transient(TransientError::Upstream { endpoint, message, status, retry_after }) => {
			assert_eq!(endpoint, Endpoint::AppAccessToken);
			assert_eq!(message, "Fake transport error: Connection reset by peer.");
			assert_eq!(status, Some(503));
			assert_eq!(retry_after, Some(Duration::seconds(5)));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(*mapper.seen.lock(), [(Endpoint::AppAccessToken, Some(meta))]);
}

#[tokio::test]
async fn mode_setters_apply_to_later_calls() {
	let (mut provider, http_client, _) = build_provider(feishu(), [
		Scripted::Respond(200, json!({ "app_access_token": "a-1" })),
		Scripted::Respond(200, json!({ "app_access_token": "a-2" })),
	]);

	provider.set_app_mode(AppMode::Default);
	provider.set_app_ticket("ticket-1");

	let first = provider.app_access_token().await.expect("Default app token should succeed.");

	provider.set_app_mode(AppMode::Internal);

	let second = provider.app_access_token().await.expect("Internal app token should succeed.");

	assert_eq!((first.expose(), second.expose()), ("a-1", "a-2"));

	let paths = http_client
		.take_requests()
		.into_iter()
		.map(|request| request.url.path().to_owned())
		.collect::<Vec<_>>();

	assert_eq!(paths, [
		"/open-apis/auth/v3/app_access_token",
		"/open-apis/auth/v3/app_access_token/internal",
	]);
}
