// self
use crate::{_prelude::*, http::HttpMethod};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by session calls.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided method + stage.
	pub fn new(method: HttpMethod, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("http_session.request", method = method.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, stage);

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

	/// Records that the exchange was aborted at the deadline.
	pub fn record_timeout(&self, path: &str) {
		#[cfg(feature = "tracing")]
		{
			let _guard = self.span.enter();

			tracing::warn!(path, "upstream request aborted at deadline");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = path;
		}
	}
}

/// Emits a debug event when a persisted descriptor becomes a live session.
pub fn record_restore(credential: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(credential, "restored external HTTP session");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = credential;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = RequestSpan::new(HttpMethod::Get, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn record_timeout_is_safe_outside_a_runtime() {
		RequestSpan::new(HttpMethod::Post, "timeout").record_timeout("/slow");
		record_restore("bearer");
	}
}
