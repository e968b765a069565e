// self
use crate::{_prelude::*, obs::RequestOutcome, request::HttpMethod};

/// Counts one execution stage for `method` under `valence_request_total`.
pub fn record_request_outcome(method: HttpMethod, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"valence_request_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}

/// Observes how long a settled execution took, in seconds.
///
/// Only settled outcomes are meaningful here; [`RequestOutcome::Attempt`] is skipped.
pub fn record_request_duration(
	method: HttpMethod,
	outcome: RequestOutcome,
	elapsed: StdDuration,
) {
	#[cfg(feature = "metrics")]
	{
		if outcome == RequestOutcome::Attempt {
			return;
		}

		metrics::histogram!(
			"valence_request_duration_seconds",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.record(elapsed.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome, elapsed);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_accept_every_outcome() {
		for outcome in [
			RequestOutcome::Attempt,
			RequestOutcome::Completed,
			RequestOutcome::TransportFailure,
			RequestOutcome::TokenFailure,
			RequestOutcome::Rejected,
		] {
			record_request_outcome(HttpMethod::Delete, outcome);
			record_request_duration(HttpMethod::Delete, outcome, StdDuration::from_millis(12));
		}
	}
}
