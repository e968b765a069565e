//! Uniform response wrapper over completed and failed dispatches.

// std
use std::borrow::Cow;
// crates.io
use http::{HeaderMap, StatusCode};
// self
use crate::{
	_prelude::*,
	executor::{RawResponse, TransportFailure, TransportOutcome},
};

/// Body prefix the server uses when a signature timestamp is outside its tolerance.
pub const TIMESTAMP_ERROR_PREFIX: &str = "Timestamp out of range";

/// Normalized result of
/// [`AuthenticatedRequest::execute`](crate::request::AuthenticatedRequest::execute).
///
/// A transport failure still produces a `Response`: status and headers come from whatever
/// partial response arrived, and the body falls back to the failure description.
#[derive(Clone, Debug)]
pub struct Response {
	status: Option<StatusCode>,
	headers: HeaderMap,
	body: Vec<u8>,
	failure: Option<String>,
	server_skew: Duration,
}
impl Response {
	/// Wraps a transport outcome, deriving the skew against the current clock.
	pub fn from_outcome(outcome: TransportOutcome) -> Self {
		Self::from_outcome_at(outcome, OffsetDateTime::now_utc())
	}

	/// Wraps a transport outcome, deriving the skew against `now`.
	pub fn from_outcome_at(outcome: TransportOutcome, now: OffsetDateTime) -> Self {
		let mut response = match outcome {
			TransportOutcome::Completed(RawResponse { status, headers, body }) => Self {
				status: Some(status),
				headers,
				body,
				failure: None,
				server_skew: Duration::ZERO,
			},
			TransportOutcome::Failed(TransportFailure { description, partial: Some(raw) }) => {
				let body =
					if raw.body.is_empty() { description.clone().into_bytes() } else { raw.body };

				Self {
					status: Some(raw.status),
					headers: raw.headers,
					body,
					failure: Some(description),
					server_skew: Duration::ZERO,
				}
			},
			TransportOutcome::Failed(TransportFailure { description, partial: None }) => Self {
				status: None,
				headers: HeaderMap::new(),
				body: description.clone().into_bytes(),
				failure: Some(description),
				server_skew: Duration::ZERO,
			},
		};

		response.server_skew =
			timestamp_skew(response.status, &response.body, now).unwrap_or(Duration::ZERO);

		response
	}

	/// Status code, absent when the transport failed before a status line arrived.
	pub fn status(&self) -> Option<StatusCode> {
		self.status
	}

	/// Symbolic status label such as `HTTP_200`.
	pub fn status_label(&self) -> Option<String> {
		self.status.map(|status| format!("HTTP_{}", status.as_u16()))
	}

	/// Response headers; empty when none arrived.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Raw body bytes, or the failure description when no body arrived.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Transport failure description, if the dispatch failed.
	pub fn failure(&self) -> Option<&str> {
		self.failure.as_deref()
	}

	/// Whether the transport failed.
	pub fn is_transport_failure(&self) -> bool {
		self.failure.is_some()
	}

	/// Whether the server answered with a 2xx status and the body was read completely.
	pub fn is_success(&self) -> bool {
		self.failure.is_none() && self.status.is_some_and(|status| status.is_success())
	}

	/// Whether the server rejected the signature timestamp.
	pub fn is_timestamp_error(&self) -> bool {
		self.status == Some(StatusCode::FORBIDDEN)
			&& self.text().trim_start().starts_with(TIMESTAMP_ERROR_PREFIX)
	}

	/// Server time minus local time, or zero when the response carried no server time.
	pub fn server_skew(&self) -> Duration {
		self.server_skew
	}
}

/// Derives the skew from a `403 Timestamp out of range <unix seconds>` response.
fn timestamp_skew(
	status: Option<StatusCode>,
	body: &[u8],
	now: OffsetDateTime,
) -> Option<Duration> {
	if status != Some(StatusCode::FORBIDDEN) {
		return None;
	}

	let text = std::str::from_utf8(body).ok()?.trim_start();
	let rest = text.strip_prefix(TIMESTAMP_ERROR_PREFIX)?.trim_start();
	let digits = rest.find(|c: char| !c.is_ascii_digit()).map_or(rest, |end| &rest[..end]);
	let server_time = OffsetDateTime::from_unix_timestamp(digits.parse().ok()?).ok()?;

	Some(server_time - now)
}
