//! Session activation: token exchange and direct assignment of a previous session.
//!
//! Both operations run under the session's activation guard, resolve everything they need
//! from the remote service first, and only then replace the session fields in one write. A
//! failed remote call therefore leaves the previous session untouched and is reported to the
//! caller instead of being swallowed.

// self
use crate::{
	_prelude::*,
	auth::{SessionKey, UserId},
	error::{MalformedResponseError, RemoteCallError, ValidationError},
	obs::{OperationSpan, SessionOperation},
	remote::{METHOD_GET_LOGGED_IN_USER, METHOD_GET_SESSION, ResponseNode},
	session::{ActiveSession, SessionExpiry, WebSession},
};

const LOGGED_IN_USER_FIELD: &str = "users_getLoggedInUser_response";

impl WebSession {
	/// Exchanges the `auth_token` returned by the login redirect for a session.
	///
	/// Calls `auth.getSession` and commits `uid`, `session_key`, and `expires` together.
	pub async fn activate_with_token(&self, auth_token: &str) -> Result<()> {
		OperationSpan::new(SessionOperation::ActivateWithToken, METHOD_GET_SESSION)
			.observe(self.exchange_token(auth_token))
			.await
	}

	/// Assigns a previously issued session key directly (for example an infinite session).
	///
	/// `expires_at = None` stores [`SessionExpiry::Never`]. Without `user_id`, exactly one
	/// `users.getLoggedInUser` call resolves the owner of `key`; the key itself is trusted.
	///
	/// An empty `key` is rejected with [`ValidationError::EmptySessionKey`] and leaves the
	/// current session in place.
	pub async fn activate_with_previous_session(
		&self,
		key: impl Into<String>,
		user_id: Option<UserId>,
		expires_at: Option<OffsetDateTime>,
	) -> Result<()> {
		let stage = if user_id.is_some() { "assign" } else { METHOD_GET_LOGGED_IN_USER };

		OperationSpan::new(SessionOperation::ActivateWithPreviousSession, stage)
			.observe(self.assign_session(SessionKey::new(key), user_id, expires_at.into()))
			.await
	}

	async fn exchange_token(&self, auth_token: &str) -> Result<()> {
		if auth_token.is_empty() {
			return Err(ValidationError::EmptyAuthToken.into());
		}

		let _exclusive = self.activation_guard.lock().await;
		let params = BTreeMap::from([("auth_token".to_owned(), auth_token.to_owned())]);
		let response = self.fetch(METHOD_GET_SESSION, &params).await?;

		self.commit(parse_session(&response)?);

		Ok(())
	}

	async fn assign_session(
		&self,
		key: SessionKey,
		user_id: Option<UserId>,
		expires_at: SessionExpiry,
	) -> Result<()> {
		if key.is_empty() {
			return Err(ValidationError::EmptySessionKey.into());
		}

		let _exclusive = self.activation_guard.lock().await;
		let user_id = match user_id {
			Some(user_id) => user_id,
			None => self.resolve_logged_in_user(&key).await?,
		};

		self.commit(ActiveSession { key, user_id, expires_at });

		Ok(())
	}

	async fn resolve_logged_in_user(&self, key: &SessionKey) -> Result<UserId> {
		let params = BTreeMap::from([("session_key".to_owned(), key.expose().to_owned())]);
		let response = self.fetch(METHOD_GET_LOGGED_IN_USER, &params).await?;
		let raw = required(&response, METHOD_GET_LOGGED_IN_USER, LOGGED_IN_USER_FIELD)?;

		UserId::new(raw.as_str()).map_err(|_| {
			invalid(METHOD_GET_LOGGED_IN_USER, LOGGED_IN_USER_FIELD, raw.clone()).into()
		})
	}

	async fn fetch(
		&self,
		method: &'static str,
		params: &BTreeMap<String, String>,
	) -> Result<ResponseNode> {
		self.remote
			.call(method, params)
			.await?
			.ok_or_else(|| RemoteCallError::NoResponse { method: method.into() }.into())
	}
}

fn parse_session(response: &ResponseNode) -> Result<ActiveSession, MalformedResponseError> {
	let uid = required(response, METHOD_GET_SESSION, "uid")?;
	let key = required(response, METHOD_GET_SESSION, "session_key")?;
	let expires = required(response, METHOD_GET_SESSION, "expires")?;
	let user_id = UserId::new(&uid).map_err(|_| invalid(METHOD_GET_SESSION, "uid", uid.clone()))?;

	if key.is_empty() {
		return Err(invalid(METHOD_GET_SESSION, "session_key", key));
	}

	let expires_at = expires
		.trim()
		.parse::<i64>()
		.ok()
		.and_then(|secs| SessionExpiry::from_unix_timestamp(secs).ok())
		.ok_or_else(|| invalid(METHOD_GET_SESSION, "expires", expires.clone()))?;

	Ok(ActiveSession { key: SessionKey::new(key), user_id, expires_at })
}

fn required(
	response: &ResponseNode,
	method: &'static str,
	field: &'static str,
) -> Result<String, MalformedResponseError> {
	response.text(field).ok_or(MalformedResponseError::MissingField { method, field })
}

fn invalid(method: &'static str, field: &'static str, value: String) -> MalformedResponseError {
	MalformedResponseError::InvalidField { method, field, value }
}
