//! In-process [`RemoteClient`] with canned replies for tests and demos.

// self
use crate::{
	_prelude::*,
	error::RemoteCallError,
	remote::{RemoteClient, RemoteFuture, ResponseNode},
};

/// Transport failure raised by [`StaticRemoteClient::with_failure`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{0}")]
pub struct StubTransportError(pub String);

/// One call observed by [`StaticRemoteClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
	/// Remote method name.
	pub method: String,
	/// Parameters passed alongside the method.
	pub params: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
enum CannedReply {
	Node(ResponseNode),
	Absent,
	Failure(String),
}

/// Remote client that answers each method with a fixed reply and records every call.
///
/// Methods without a configured reply answer with an absent response.
#[derive(Clone, Debug, Default)]
pub struct StaticRemoteClient {
	replies: Arc<RwLock<HashMap<String, CannedReply>>>,
	calls: Arc<Mutex<Vec<RecordedCall>>>,
}
impl StaticRemoteClient {
	/// Answers `method` with `node`.
	pub fn with_response(self, method: impl Into<String>, node: impl Into<ResponseNode>) -> Self {
		self.replies.write().insert(method.into(), CannedReply::Node(node.into()));

		self
	}

	/// Answers `method` with an absent response.
	pub fn with_absent(self, method: impl Into<String>) -> Self {
		self.replies.write().insert(method.into(), CannedReply::Absent);

		self
	}

	/// Fails `method` with a transport error carrying `message`.
	pub fn with_failure(self, method: impl Into<String>, message: impl Into<String>) -> Self {
		self.replies.write().insert(method.into(), CannedReply::Failure(message.into()));

		self
	}

	/// Snapshot of every call received so far.
	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().clone()
	}

	/// Number of calls received for `method`.
	pub fn call_count(&self, method: &str) -> usize {
		self.calls.lock().iter().filter(|call| call.method == method).count()
	}

	fn reply(
		&self,
		method: &str,
		params: &BTreeMap<String, String>,
	) -> Result<Option<ResponseNode>, RemoteCallError> {
		self.calls.lock().push(RecordedCall { method: method.to_owned(), params: params.clone() });

		match self.replies.read().get(method).cloned() {
			Some(CannedReply::Node(node)) => Ok(Some(node)),
			Some(CannedReply::Absent) | None => Ok(None),
			Some(CannedReply::Failure(message)) =>
				Err(RemoteCallError::transport(method, StubTransportError(message))),
		}
	}
}
impl RemoteClient for StaticRemoteClient {
	fn call<'a>(
		&'a self,
		method: &'a str,
		params: &'a BTreeMap<String, String>,
	) -> RemoteFuture<'a, Option<ResponseNode>> {
		let reply = self.reply(method, params);

		Box::pin(async move { reply })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[tokio::test]
	async fn stub_replays_canned_replies_and_records_calls() {
		let client = StaticRemoteClient::default()
			.with_response("a.ok", json!({ "value": "1" }))
			.with_failure("a.fail", "connection reset");
		let params = BTreeMap::from([("k".to_owned(), "v".to_owned())]);
		let node = client
			.call("a.ok", &params)
			.await
			.expect("Canned response should succeed.")
			.expect("Canned response should be present.");

		assert_eq!(node.text("value").as_deref(), Some("1"));
		assert!(
			client.call("a.unknown", &params).await.expect("Unknown methods are absent.").is_none()
		);

		let err = client.call("a.fail", &params).await.expect_err("Canned failure should fail.");

		assert_eq!(err.method(), "a.fail");
		assert_eq!(client.calls().len(), 3);
		assert_eq!(client.call_count("a.ok"), 1);
		assert_eq!(client.calls()[0].params, params);
	}
}
