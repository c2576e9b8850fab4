//! Remote API collaborator contract.
//!
//! Transport is owned by the caller: implement [`RemoteClient`] on top of any HTTP stack and
//! hand it to a [`WebSession`](crate::session::WebSession). The session only relies on the
//! named-field lookup exposed by [`ResponseNode`].

pub mod stub;

pub use stub::*;

// std
use std::collections::VecDeque;
// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::RemoteCallError};

/// Namespace prepended to method names on signed outbound calls.
pub const METHOD_NAMESPACE: &str = "facebook.";
/// Exchanges an authorization token for a session.
pub const METHOD_GET_SESSION: &str = "auth.getSession";
/// Resolves the user owning the current session key.
pub const METHOD_GET_LOGGED_IN_USER: &str = "users.getLoggedInUser";

/// Future returned by [`RemoteClient::call`].
pub type RemoteFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, RemoteCallError>> + 'a + Send>>;

/// Performs remote API calls on behalf of a session.
///
/// `Err` reports a transport failure; `Ok(None)` reports a call that completed without a
/// usable response node. Timeouts and retries belong to the implementation.
///
/// Sessions pass only the method-specific parameters (`auth_token`, `session_key`). Turning
/// them into a signed request is the implementation's job: add `method` (under
/// [`METHOD_NAMESPACE`]), `api_key`, `v`, and a strictly increasing `call_id`, then sign the
/// whole set with [`compute_signature`](crate::signature::compute_signature) and send it as
/// `sig`. [`WebSession::signed_call_params`](crate::session::WebSession::signed_call_params)
/// performs the same assembly for calls the caller issues itself.
pub trait RemoteClient
where
	Self: Send + Sync,
{
	/// Calls `method` with `params` and returns the parsed response, if any.
	fn call<'a>(
		&'a self,
		method: &'a str,
		params: &'a BTreeMap<String, String>,
	) -> RemoteFuture<'a, Option<ResponseNode>>;
}

/// Parsed response with named-field lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseNode(Value);
impl ResponseNode {
	/// Wraps an already parsed JSON value.
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	/// Parses a JSON response body.
	pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(raw).map(Self)
	}

	/// Returns the underlying JSON value.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Finds the shallowest field named `name`.
	///
	/// Every key of a level is checked before any nested node is entered, so a top-level
	/// `uid` always wins over one buried in a sibling object. Among fields at the same depth
	/// the first one visited wins.
	pub fn at(&self, name: &str) -> Option<&Value> {
		find(&self.0, name)
	}

	/// Text content of the field named `name`.
	///
	/// Strings are returned as-is while numbers and booleans are rendered as text. Nulls,
	/// arrays, and objects have no text content.
	pub fn text(&self, name: &str) -> Option<String> {
		match self.at(name)? {
			Value::String(s) => Some(s.clone()),
			Value::Number(n) => Some(n.to_string()),
			Value::Bool(b) => Some(b.to_string()),
			_ => None,
		}
	}
}
impl From<Value> for ResponseNode {
	fn from(value: Value) -> Self {
		Self(value)
	}
}

fn find<'a>(root: &'a Value, name: &str) -> Option<&'a Value> {
	let mut pending = VecDeque::from([root]);

	while let Some(value) = pending.pop_front() {
		match value {
			Value::Object(map) => {
				if let Some(child) = map.get(name) {
					return Some(child);
				}

				pending.extend(map.values());
			},
			Value::Array(items) => pending.extend(items),
			_ => {},
		}
	}

	None
}
