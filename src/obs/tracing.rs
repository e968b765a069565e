// self
use crate::{_prelude::*, obs::RequestOutcome, request::HttpMethod};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span covering one [`execute`](crate::request::AuthenticatedRequest::execute) call.
///
/// The span is opened with the verb and route template; the final outcome label is
/// recorded on it once the call settles.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Opens a span for `method` against the unresolved `route` template.
	pub fn new(method: HttpMethod, route: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"valence_request.execute",
				method = method.as_str(),
				route,
				outcome = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, route);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Stamps the settled outcome onto the span.
	pub fn record_outcome(&self, outcome: RequestOutcome) {
		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());
		#[cfg(not(feature = "tracing"))]
		let _ = outcome;
	}
}

/// Emits a debug event for a dispatched request.
///
/// `unresolved` lists placeholders no mapping filled; they are sent verbatim, so a
/// non-empty list is raised to a warning.
pub fn trace_dispatch(method: HttpMethod, uri: &Url, unresolved: &[&str]) {
	#[cfg(feature = "tracing")]
	{
		if unresolved.is_empty() {
			tracing::debug!(
				method = method.as_str(),
				host = uri.host_str(),
				path = uri.path(),
				"dispatching request"
			);
		} else {
			tracing::warn!(
				method = method.as_str(),
				host = uri.host_str(),
				path = uri.path(),
				unresolved = ?unresolved,
				"dispatching request with unresolved placeholders"
			);
		}
	}
	#[cfg(not(feature = "tracing"))]
	let _ = (method, uri, unresolved);
}

/// Emits a warning for a transport failure that was captured into a response.
pub fn trace_transport_failure(method: HttpMethod, description: &str) {
	#[cfg(feature = "tracing")]
	tracing::warn!(method = method.as_str(), error = description, "transport failure captured");
	#[cfg(not(feature = "tracing"))]
	let _ = (method, description);
}

/// Emits a debug event when a response carried a new server skew.
pub fn trace_skew_update(skew: Duration) {
	#[cfg(feature = "tracing")]
	tracing::debug!(skew_ms = skew.whole_milliseconds() as i64, "server skew updated");
	#[cfg(not(feature = "tracing"))]
	let _ = skew;
}
