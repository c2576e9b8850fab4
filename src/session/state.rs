//! Session identity/validity fields and the readiness predicate.

// self
use crate::{
	_prelude::*,
	auth::{SessionKey, UserId},
};

/// Expiry of an activated session.
///
/// [`SessionExpiry::Never`] is the single never-expires sentinel; the remote service encodes
/// it as `expires = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionExpiry {
	/// The session does not expire.
	Never,
	/// The session is valid strictly before this instant.
	At(OffsetDateTime),
}
impl SessionExpiry {
	/// Interprets a wire `expires` value in unix seconds; `0` means [`SessionExpiry::Never`].
	pub fn from_unix_timestamp(secs: i64) -> Result<Self, time::error::ComponentRange> {
		if secs == 0 {
			return Ok(Self::Never);
		}

		OffsetDateTime::from_unix_timestamp(secs).map(Self::At)
	}

	/// Concrete expiry instant, if any.
	pub fn instant(self) -> Option<OffsetDateTime> {
		match self {
			Self::Never => None,
			Self::At(instant) => Some(instant),
		}
	}

	/// Returns `true` once `now` reaches the expiry instant.
	pub fn is_expired_at(self, now: OffsetDateTime) -> bool {
		match self {
			Self::Never => false,
			Self::At(instant) => now >= instant,
		}
	}
}
impl From<Option<OffsetDateTime>> for SessionExpiry {
	fn from(value: Option<OffsetDateTime>) -> Self {
		value.map_or(Self::Never, Self::At)
	}
}

/// Current lifecycle status of a [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
	/// No session has been activated.
	Inactive,
	/// A session is present and unexpired.
	Ready,
	/// A session is present but its expiry has passed.
	Expired,
}

/// Fields committed by a successful activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveSession {
	/// Session key sent as `session_key` on signed calls.
	pub key: SessionKey,
	/// User the session belongs to.
	pub user_id: UserId,
	/// Validity window of the session.
	pub expires_at: SessionExpiry,
}

/// Session identity and validity.
///
/// Key, user, and expiry live in one [`ActiveSession`] value, so they are either all present
/// or all absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
	active: Option<ActiveSession>,
}
impl SessionState {
	/// Active session fields, if the state has been activated.
	pub fn active(&self) -> Option<&ActiveSession> {
		self.active.as_ref()
	}

	/// Session key, if activated.
	pub fn session_key(&self) -> Option<&SessionKey> {
		self.active.as_ref().map(|active| &active.key)
	}

	/// Session user, if activated.
	pub fn user_id(&self) -> Option<&UserId> {
		self.active.as_ref().map(|active| &active.user_id)
	}

	/// Session expiry, if activated.
	pub fn expires_at(&self) -> Option<SessionExpiry> {
		self.active.as_ref().map(|active| active.expires_at)
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, now: OffsetDateTime) -> SessionStatus {
		match self.active.as_ref() {
			None => SessionStatus::Inactive,
			Some(active) if active.expires_at.is_expired_at(now) => SessionStatus::Expired,
			Some(_) => SessionStatus::Ready,
		}
	}

	/// Returns `true` if a session is present and unexpired at `now`.
	pub fn is_ready_at(&self, now: OffsetDateTime) -> bool {
		matches!(self.status_at(now), SessionStatus::Ready)
	}

	/// Convenience helper that checks readiness against the current UTC instant.
	pub fn is_ready(&self) -> bool {
		self.is_ready_at(OffsetDateTime::now_utc())
	}

	pub(crate) fn replace(&mut self, active: ActiveSession) {
		self.active = Some(active);
	}
}
