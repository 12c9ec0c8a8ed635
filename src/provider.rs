//! Provider-facing configuration (credentials, app mode) and the endpoint table.
//!
//! `config` exposes [`ProviderConfig`], the typed form of the recognized configuration keys
//! (`client_id`, `client_secret`, `redirect_uri`, `app_ticket`, `kind_of_app`).
//! `endpoints` resolves each [`Endpoint`] against a validated open-platform base URL,
//! selecting the internal or default path according to [`AppMode`].

pub mod config;
pub mod endpoints;

pub use config::*;
pub use endpoints::*;
