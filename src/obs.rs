//! Optional observability helpers for session activation.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named `legacy_web_auth.session`
//!   with the `operation` and `stage` (remote step) fields.
//! - Enable `metrics` to increment the `legacy_web_auth_activation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Session operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionOperation {
	/// Token-to-session exchange.
	ActivateWithToken,
	/// Direct assignment of a previously issued session key.
	ActivateWithPreviousSession,
}
impl SessionOperation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionOperation::ActivateWithToken => "activate_with_token",
			SessionOperation::ActivateWithPreviousSession => "activate_with_previous_session",
		}
	}
}
impl Display for SessionOperation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an activation helper.
	Attempt,
	/// Session committed.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
