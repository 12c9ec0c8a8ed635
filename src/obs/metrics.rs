// self
use crate::{obs::CallOutcome, provider::Endpoint};

/// Bumps `feishu_oauth_call_total{endpoint, outcome}` on the installed recorder.
///
/// Compiles to nothing without the `metrics` feature.
pub fn record_call_outcome(endpoint: Endpoint, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"feishu_oauth_call_total",
			"endpoint" => endpoint.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (endpoint, outcome);
	}
}
