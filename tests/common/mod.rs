//! Shared fixtures for the reqwest-backed integration tests.

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use feishu_oauth::{
	flows::{FeishuProvider, ReqwestFeishuProvider},
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	provider::{AppMode, FeishuEndpoints, ProviderConfig},
	reqwest::Client,
};

pub const CLIENT_ID: &str = "cli_it";
pub const CLIENT_SECRET: &str = "secret-it";

/// Builds a provider whose endpoints live under the mock server's `/open-apis/` prefix.
pub fn provider(server: &MockServer, mode: AppMode) -> ReqwestFeishuProvider {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");
	let endpoints = FeishuEndpoints::new(&server.url("/open-apis/"))
		.expect("Mock base URL should be accepted by endpoints.");
	let config = ProviderConfig::new(CLIENT_ID, CLIENT_SECRET)
		.expect("Test client identifier should be valid.")
		.with_app_mode(mode);

	FeishuProvider::with_http_client(
		config,
		endpoints,
		ReqwestHttpClient::with_client(client),
		Arc::new(ReqwestTransportErrorMapper),
	)
}
