//! Prints a Feishu authorization URL for a configured application.

// crates.io
use color_eyre::Result;
// self
use feishu_oauth::{
	flows::{ReqwestFeishuProvider, generate_state},
	provider::{AppMode, ProviderConfig},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ProviderConfig::new("cli_a1b2c3d4e5f6", "demo-secret")?
		.with_redirect_uri("https://app.example.com/callback")
		.with_app_mode(AppMode::Internal);
	let provider = ReqwestFeishuProvider::new(config)?.with_state(generate_state());

	println!("Send the user to: {}", provider.build_authorization_url()?);

	Ok(())
}
