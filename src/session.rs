//! Session handle tying credentials, redirect URLs, remote activation, and signatures together.

pub mod activation;
pub mod state;

pub use state::*;

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, AppCredentials},
	config::{SessionConfig, WebEndpoints},
	redirect::{InstallOptions, LoginOptions, PermissionOptions, PROTOCOL_VERSION, UrlBuilder},
	remote::{METHOD_NAMESPACE, RemoteClient},
	signature::{self, SIGNATURE_PARAM, SignatureError},
};

/// Prefix of the namespaced signature parameters sent with canvas callbacks.
pub const CALLBACK_SIGNATURE_PREFIX: &str = "fb_sig";

/// Client-side session for one application.
///
/// The handle is `Send + Sync`; share it behind an [`Arc`] when several tasks need it.
/// Activations are serialized, and each one replaces the session fields in a single write,
/// so concurrent readers observe either the previous session or the new one.
pub struct WebSession {
	credentials: AppCredentials,
	urls: UrlBuilder,
	remote: Arc<dyn RemoteClient>,
	state: RwLock<SessionState>,
	activation_guard: AsyncMutex<()>,
	last_call_id: Mutex<i128>,
}
impl WebSession {
	/// Creates an empty (not yet activated) session.
	pub fn new(
		credentials: AppCredentials,
		endpoints: WebEndpoints,
		remote: Arc<dyn RemoteClient>,
	) -> Self {
		let urls = UrlBuilder::new(endpoints, credentials.api_key().clone());

		Self {
			credentials,
			urls,
			remote,
			state: Default::default(),
			activation_guard: AsyncMutex::new(()),
			last_call_id: Mutex::new(0),
		}
	}

	/// Validates `config` and creates an empty session from it.
	pub fn from_config(config: SessionConfig, remote: Arc<dyn RemoteClient>) -> Result<Self> {
		let (credentials, endpoints) = config.into_parts()?;

		Ok(Self::new(credentials, endpoints, remote))
	}

	/// Application credentials.
	pub fn credentials(&self) -> &AppCredentials {
		&self.credentials
	}

	/// Application key.
	pub fn api_key(&self) -> &ApiKey {
		self.credentials.api_key()
	}

	/// Redirect URL builder bound to this application.
	pub fn urls(&self) -> &UrlBuilder {
		&self.urls
	}

	/// Login consent URL.
	pub fn login_url(&self, options: &LoginOptions) -> Result<Url> {
		Ok(self.urls.login_url(options)?)
	}

	/// Extended-permission consent URL.
	pub fn permission_url(&self, options: &PermissionOptions) -> Result<Url> {
		Ok(self.urls.permission_url(options)?)
	}

	/// Application install URL.
	pub fn install_url(&self, options: &InstallOptions) -> Result<Url> {
		Ok(self.urls.install_url(options)?)
	}

	/// Snapshot of the session fields.
	pub fn state(&self) -> SessionState {
		self.state.read().clone()
	}

	/// Returns `true` if a session key is present and unexpired right now.
	pub fn is_ready(&self) -> bool {
		self.state.read().is_ready()
	}

	/// Returns `true` if a session key is present and unexpired at `now`.
	pub fn is_ready_at(&self, now: OffsetDateTime) -> bool {
		self.state.read().is_ready_at(now)
	}

	/// Signs `params` with the application secret.
	pub fn signature<I, K, V>(&self, params: I) -> String
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		signature::compute_signature(params, self.credentials.secret().expose())
	}

	/// Verifies a parameter set carrying a `sig` entry against the application secret.
	pub fn verify<I, K, V>(&self, params: I) -> Result<(), SignatureError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		signature::verify_signature(params, self.credentials.secret().expose())
	}

	/// Verifies `fb_sig`-namespaced callback parameters against the application secret.
	pub fn verify_callback<I, K, V>(&self, params: I) -> Result<(), SignatureError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		signature::verify_prefixed_signature(
			params,
			CALLBACK_SIGNATURE_PREFIX,
			self.credentials.secret().expose(),
		)
	}

	/// Builds the complete, signed parameter set for an outbound call to `method`.
	///
	/// Adds `method` (namespaced), `api_key`, `v`, a per-session increasing `call_id`, and the
	/// `session_key` when one is active, then appends `sig`. Reserved keys supplied by the
	/// caller are overwritten.
	pub fn signed_call_params<I, K, V>(&self, method: &str, params: I) -> BTreeMap<String, String>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut signed: BTreeMap<String, String> =
			params.into_iter().map(|(key, value)| (key.into(), value.into())).collect();
		let method = if method.starts_with(METHOD_NAMESPACE) {
			method.to_owned()
		} else {
			format!("{METHOD_NAMESPACE}{method}")
		};

		signed.remove(SIGNATURE_PARAM);
		signed.insert("method".into(), method);
		signed.insert("api_key".into(), self.api_key().to_string());
		signed.insert("v".into(), PROTOCOL_VERSION.into());
		signed.insert("call_id".into(), self.next_call_id().to_string());

		if let Some(key) = self.state.read().session_key() {
			signed.insert("session_key".into(), key.expose().to_owned());
		}

		let sig = self.signature(&signed);

		signed.insert(SIGNATURE_PARAM.into(), sig);

		signed
	}

	pub(crate) fn commit(&self, active: ActiveSession) {
		self.state.write().replace(active);
	}

	fn next_call_id(&self) -> i128 {
		let now = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000;
		let mut last = self.last_call_id.lock();
		let next = now.max(*last + 1);

		*last = next;

		next
	}
}
impl Debug for WebSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("WebSession")
			.field("credentials", &self.credentials)
			.field("endpoints", self.urls.endpoints())
			.field("state", &*self.state.read())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		auth::{SessionKey, UserId},
		remote::StaticRemoteClient,
	};

	fn session() -> WebSession {
		let credentials =
			AppCredentials::new("app-key", "app-secret").expect("Credential fixture is valid.");
		let endpoints = WebEndpoints::builder().build().expect("Default endpoints should build.");

		WebSession::new(credentials, endpoints, Arc::new(StaticRemoteClient::default()))
	}

	#[test]
	fn signed_call_params_cover_reserved_keys() {
		let session = session();
		let params = session.signed_call_params("users.getInfo", [("uids", "42"), ("sig", "x")]);

		assert_eq!(params.get("method").map(String::as_str), Some("facebook.users.getInfo"));
		assert_eq!(params.get("api_key").map(String::as_str), Some("app-key"));
		assert_eq!(params.get("v").map(String::as_str), Some("1.0"));
		assert!(params.contains_key("call_id"));
		assert!(!params.contains_key("session_key"));
		assert_eq!(session.verify(&params), Ok(()));

		session.commit(ActiveSession {
			key: SessionKey::new("abc"),
			user_id: UserId::new("42").expect("User fixture should be valid."),
			expires_at: SessionExpiry::Never,
		});

		let params =
			session.signed_call_params("facebook.users.getInfo", Vec::<(String, String)>::new());

		assert_eq!(params.get("method").map(String::as_str), Some("facebook.users.getInfo"));
		assert_eq!(params.get("session_key").map(String::as_str), Some("abc"));
		assert_eq!(session.verify(&params), Ok(()));
	}

	#[test]
	fn call_ids_strictly_increase() {
		let session = session();
		let first = session.next_call_id();
		let second = session.next_call_id();

		assert!(second > first);
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let session = session();
		let rendered = format!("{session:?}");

		assert!(!rendered.contains("app-secret"));
		assert!(rendered.contains("app-key"));
	}
}
