//! Per-call telemetry for open-platform requests.
//!
//! Every adapter operation is labeled with the [`Endpoint`](crate::provider::Endpoint) it
//! ends at (`app_access_token`, `tenant_access_token`, `user_access_token`, `user_info`) and
//! the method that issued it. A `user_from_code` sign-in therefore shows up as nested
//! `user_access_token` and `app_access_token` calls followed by a `user_info` call.
//!
//! # Feature Flags
//!
//! - `tracing`: each call runs inside a `feishu_oauth.call` span with `endpoint` and `stage`
//!   fields, `stage` being the adapter method name.
//! - `metrics`: `feishu_oauth_call_total` is incremented once when a call starts and once when
//!   it settles, labeled with `endpoint` and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// `outcome` label of `feishu_oauth_call_total`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// The adapter is about to send the first request of the call.
	Attempt,
	/// The call returned a token, a user payload, or an identity.
	Success,
	/// The call returned any [`Error`], including a missing `app_ticket` detected locally.
	Failure,
}
impl CallOutcome {
	/// Label value written to spans and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}

	/// Outcome of a settled call.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure }
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
