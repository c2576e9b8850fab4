// self
use crate::obs::{OperationOutcome, SessionOperation};

/// Records an activation outcome via the global metrics recorder (when enabled).
pub fn record_outcome(operation: SessionOperation, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"legacy_web_auth_activation_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}
