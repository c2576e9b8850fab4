// self
use crate::{
	_prelude::*,
	obs::{self, OperationOutcome, SessionOperation},
};

/// Future produced by [`OperationSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Future produced by [`OperationSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span covering one session operation, named `legacy_web_auth.session`.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	operation: SessionOperation,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span for `operation`; `stage` names the remote step it is waiting on.
	pub fn new(operation: SessionOperation, stage: &'static str) -> Self {
		#[cfg(not(feature = "tracing"))]
		let _ = stage;

		Self {
			operation,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!(
				"legacy_web_auth.session",
				operation = operation.as_str(),
				stage
			),
		}
	}

	/// Operation the span was opened for.
	pub fn operation(&self) -> SessionOperation {
		self.operation
	}

	/// Attaches the span to `fut` so it is entered on every poll.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(fut, self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Runs `fut` inside the span, counting the attempt and its final outcome.
	pub async fn observe<T, E, Fut>(self, fut: Fut) -> Result<T, E>
	where
		Fut: Future<Output = Result<T, E>>,
	{
		obs::record_outcome(self.operation, OperationOutcome::Attempt);

		let result = self.instrument(fut).await;
		let outcome =
			if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure };

		obs::record_outcome(self.operation, outcome);

		result
	}
}
