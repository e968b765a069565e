//! Optional observability helpers for request execution.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `valence_request.execute` with the `method`
//!   and `route` fields; the settled `outcome` is recorded on the span before it closes.
//! - Enable `metrics` to increment the `valence_request_total` counter for every
//!   attempt/completion/failure, labeled by `method` + `outcome`, and to observe
//!   `valence_request_duration_seconds` for every settled call.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to [`AuthenticatedRequest::execute`](crate::request::AuthenticatedRequest::execute).
	Attempt,
	/// The server answered (any status).
	Completed,
	/// The transport failed and the failure was captured into a response.
	TransportFailure,
	/// The token provider failed before dispatch.
	TokenFailure,
	/// The request was rejected locally before dispatch.
	Rejected,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Completed => "completed",
			RequestOutcome::TransportFailure => "transport_failure",
			RequestOutcome::TokenFailure => "token_failure",
			RequestOutcome::Rejected => "rejected",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
