//! Global `metrics` counters for call outcomes and session teardown.

// self
use crate::obs::{CallKind, CallOutcome, ClearReason};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"booklite_client_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records that the stored session token was cleared.
pub fn record_session_cleared(reason: ClearReason) {
	#[cfg(feature = "tracing")]
	tracing::info!(reason = reason.as_str(), "Session token cleared.");

	#[cfg(feature = "metrics")]
	{
		metrics::counter!("booklite_client_session_cleared_total", "reason" => reason.as_str())
			.increment(1);
	}

	#[cfg(not(any(feature = "metrics", feature = "tracing")))]
	{
		let _ = reason;
	}
}
