//! Open-platform endpoint table.

// self
use crate::{_prelude::*, error::ConfigError, provider::AppMode};

/// Operations exposed by the open platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Browser authorization page (`authen/v1/index`).
	Authorize,
	/// Authorization code exchange (`authen/v1/access_token`).
	UserAccessToken,
	/// User profile lookup (`authen/v1/user_info`).
	UserInfo,
	/// App access token issuance (`auth/v3/app_access_token[/internal]`).
	AppAccessToken,
	/// Tenant access token issuance (`auth/v3/tenant_access_token[/internal]`).
	TenantAccessToken,
}
impl Endpoint {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Authorize => "authorize",
			Endpoint::UserAccessToken => "user_access_token",
			Endpoint::UserInfo => "user_info",
			Endpoint::AppAccessToken => "app_access_token",
			Endpoint::TenantAccessToken => "tenant_access_token",
		}
	}

	/// Path relative to the open-platform base for the given mode.
	pub const fn path(self, mode: AppMode) -> &'static str {
		match (self, mode) {
			(Endpoint::Authorize, _) => "authen/v1/index",
			(Endpoint::UserAccessToken, _) => "authen/v1/access_token",
			(Endpoint::UserInfo, _) => "authen/v1/user_info",
			(Endpoint::AppAccessToken, AppMode::Internal) => "auth/v3/app_access_token/internal",
			(Endpoint::AppAccessToken, AppMode::Default) => "auth/v3/app_access_token",
			(Endpoint::TenantAccessToken, AppMode::Internal) =>
				"auth/v3/tenant_access_token/internal",
			(Endpoint::TenantAccessToken, AppMode::Default) => "auth/v3/tenant_access_token",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Validated open-platform base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeishuEndpoints {
	base: Url,
}
impl FeishuEndpoints {
	/// Open-platform root for Feishu (mainland China).
	pub const FEISHU_BASE_URL: &'static str = "https://open.feishu.cn/open-apis/";
	/// Open-platform root for Lark (international).
	pub const LARK_BASE_URL: &'static str = "https://open.larksuite.com/open-apis/";

	/// Validates `base` and normalizes it to end with `/`.
	pub fn new(base: &str) -> Result<Self, ConfigError> {
		let mut base =
			Url::parse(base).map_err(|source| ConfigError::InvalidEndpoint { source })?;

		if !matches!(base.scheme(), "http" | "https") {
			return Err(invalid_base(&base, "scheme must be http or https"));
		}
		if base.cannot_be_a_base() {
			return Err(invalid_base(&base, "URL cannot be used as a base"));
		}
		if base.query().is_some() || base.fragment().is_some() {
			return Err(invalid_base(&base, "query and fragment are not allowed"));
		}
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());

			base.set_path(&path);
		}

		Ok(Self { base })
	}

	/// Endpoints rooted at [`FeishuEndpoints::FEISHU_BASE_URL`].
	pub fn feishu() -> Result<Self, ConfigError> {
		Self::new(Self::FEISHU_BASE_URL)
	}

	/// Endpoints rooted at [`FeishuEndpoints::LARK_BASE_URL`].
	pub fn lark() -> Result<Self, ConfigError> {
		Self::new(Self::LARK_BASE_URL)
	}

	/// Normalized base URL.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Absolute URL for `endpoint` under `mode`.
	pub fn url(&self, endpoint: Endpoint, mode: AppMode) -> Result<Url, ConfigError> {
		self.base.join(endpoint.path(mode)).map_err(|source| ConfigError::InvalidEndpoint { source })
	}
}

fn invalid_base(url: &Url, reason: &'static str) -> ConfigError {
	ConfigError::InvalidBaseUrl { url: url.to_string(), reason }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_table_matches_modes() {
		let endpoints = FeishuEndpoints::feishu().expect("Feishu base URL should be valid.");
		let url = |endpoint, mode| {
			endpoints.url(endpoint, mode).expect("Endpoint URL should resolve.").to_string()
		};

		assert_eq!(
			url(Endpoint::Authorize, AppMode::Default),
			"https://open.feishu.cn/open-apis/authen/v1/index"
		);
		assert_eq!(
			url(Endpoint::UserInfo, AppMode::Internal),
			"https://open.feishu.cn/open-apis/authen/v1/user_info"
		);
		assert_eq!(
			url(Endpoint::AppAccessToken, AppMode::Internal),
			"https://open.feishu.cn/open-apis/auth/v3/app_access_token/internal"
		);
		assert_eq!(
			url(Endpoint::AppAccessToken, AppMode::Default),
			"https://open.feishu.cn/open-apis/auth/v3/app_access_token"
		);
		assert_eq!(
			url(Endpoint::TenantAccessToken, AppMode::Internal),
			"https://open.feishu.cn/open-apis/auth/v3/tenant_access_token/internal"
		);
		assert_eq!(
			url(Endpoint::TenantAccessToken, AppMode::Default),
			"https://open.feishu.cn/open-apis/auth/v3/tenant_access_token"
		);
	}

	#[test]
	fn base_without_trailing_slash_is_normalized() {
		let endpoints = FeishuEndpoints::new("http://127.0.0.1:8080/open-apis")
			.expect("Loopback base URL should be accepted.");

		assert_eq!(
			endpoints
				.url(Endpoint::UserAccessToken, AppMode::Internal)
				.expect("Endpoint URL should resolve.")
				.as_str(),
			"http://127.0.0.1:8080/open-apis/authen/v1/access_token"
		);
		assert_eq!(
			FeishuEndpoints::lark().expect("Lark base URL should be valid.").base().host_str(),
			Some("open.larksuite.com")
		);
	}

	#[test]
	fn rejects_unusable_bases() {
		assert!(matches!(
			FeishuEndpoints::new("ftp://open.feishu.cn/open-apis/"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			FeishuEndpoints::new("https://open.feishu.cn/open-apis/?lang=en"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(FeishuEndpoints::new("not a url"), Err(ConfigError::InvalidEndpoint { .. })));
	}
}
