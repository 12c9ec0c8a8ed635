//! JSON exchange facade over [`ApiHttpClient`] plus transport error mapping.
//!
//! Every open-platform call goes through [`send`]: the request is dispatched on an
//! instrumented handle, throttling/server statuses become [`TransientError`]s, and the body is
//! decoded into a JSON object. Bodies that are not JSON objects decode to an empty map so that
//! callers report them through their regular "empty field" checks.

pub use oauth2;

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request, StatusCode,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransientError, TransportError},
	http::{ApiHttpClient, ResponseMetadata, ResponseMetadataSlot},
	provider::Endpoint,
};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Maps HTTP transport failures into adapter [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into an adapter error.
	fn map_transport_error(
		&self,
		endpoint: Endpoint,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: Endpoint,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(endpoint, meta, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(endpoint, meta, message),
			_ => map_unknown_transport_error(endpoint, meta),
		}
	}
}

/// Builds a JSON `POST` request.
pub(crate) fn post_json<B>(endpoint: Endpoint, url: &Url, body: &B) -> Result<HttpRequest>
where
	B: ?Sized + Serialize,
{
	let body = serde_json::to_vec(body)
		.map_err(|source| ConfigError::RequestBody { endpoint, source })?;
	let request = Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
		.header(ACCEPT, "application/json")
		.body(body)
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Builds a bearer-authenticated `GET` request.
pub(crate) fn get_with_bearer(url: &Url, token: &str) -> Result<HttpRequest> {
	let request = Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
		.header(ACCEPT, "application/json")
		.header(AUTHORIZATION, format!("Bearer {token}"))
		.body(Vec::new())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Dispatches `request` and decodes the response body into a JSON object.
pub(crate) async fn send<C, M>(
	http_client: &C,
	error_mapper: &M,
	endpoint: Endpoint,
	request: HttpRequest,
) -> Result<JsonMap>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let meta = ResponseMetadataSlot::default();
	let handle = http_client.with_metadata(meta.clone());
	let response = oauth2::AsyncHttpClient::call(&handle, request)
		.await
		.map_err(|err| error_mapper.map_transport_error(endpoint, meta.take().as_ref(), err))?;

	decode_response(endpoint, response)
}

fn decode_response(endpoint: Endpoint, response: HttpResponse) -> Result<JsonMap> {
	let status = response.status();

	if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
		let meta = ResponseMetadata::from_headers(status.as_u16(), response.headers());
		let body = parse_object(response.body());
		let mut message = format!("HTTP {status}");

		if let Some(detail) = envelope_message(&body) {
			message.push_str(&format!(", {detail}"));
		}
		if let Some(log_id) = &meta.log_id {
			message.push_str(&format!(" (log id {log_id})"));
		}

		return Err(TransientError::Upstream {
			endpoint,
			message,
			status: meta.status,
			retry_after: meta.retry_after,
		}
		.into());
	}

	Ok(parse_object(response.body()))
}

/// Decodes a JSON object, degrading anything else to an empty map.
pub(crate) fn parse_object(body: &[u8]) -> JsonMap {
	match serde_json::from_slice::<Value>(body) {
		Ok(Value::Object(map)) => map,
		_ => JsonMap::new(),
	}
}

/// Summarizes the platform envelope's `code`/`msg` pair, if present.
pub(crate) fn envelope_message(body: &JsonMap) -> Option<String> {
	let code = body.get("code").filter(|code| !code.is_null());
	let msg = body.get("msg").and_then(Value::as_str).filter(|msg| !msg.is_empty());

	match (code, msg) {
		(Some(code), Some(msg)) => Some(format!("code {code}: {msg}")),
		(Some(code), None) => Some(format!("code {code}")),
		(None, Some(msg)) => Some(msg.to_owned()),
		(None, None) => None,
	}
}

/// Loose emptiness test used for every required payload field: `null`, `false`, `0`, `""`,
/// `"0"`, `[]`, and `{}` all count as empty.
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64() == Some(0.0),
		Value::String(text) => text.is_empty() || text == "0",
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
	}
}

/// Reads a scalar field as text; strings pass through and numbers are rendered.
pub fn scalar_string(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(
	endpoint: Endpoint,
	meta: Option<&ResponseMetadata>,
	err: ReqwestError,
) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransientError::Upstream {
			endpoint,
			message: "Request timed out".into(),
			status: meta_status(meta).or_else(|| err.status().map(|code| code.as_u16())),
			retry_after: meta_retry_after(meta),
		}
		.into();
	}

	TransportError::from(err).into()
}

#[cfg(feature = "reqwest")]
fn map_generic_transport_error(
	endpoint: Endpoint,
	meta: Option<&ResponseMetadata>,
	message: impl Display,
) -> Error {
	TransientError::Upstream {
		endpoint,
		message: format!("HTTP client error: {message}"),
		status: meta_status(meta),
		retry_after: meta_retry_after(meta),
	}
	.into()
}

#[cfg(feature = "reqwest")]
fn map_unknown_transport_error(endpoint: Endpoint, meta: Option<&ResponseMetadata>) -> Error {
	TransientError::Upstream {
		endpoint,
		message: "HTTP client error".into(),
		status: meta_status(meta),
		retry_after: meta_retry_after(meta),
	}
	.into()
}

#[cfg(feature = "reqwest")]
fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}

#[cfg(feature = "reqwest")]
fn meta_retry_after(meta: Option<&ResponseMetadata>) -> Option<Duration> {
	meta.and_then(|value| value.retry_after)
}
