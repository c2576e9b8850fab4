//! Immutable application credentials attached to every session.

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, ApplicationSecret},
	error::ConfigError,
};

/// Application key + signing secret pair.
///
/// Both halves are fixed at construction. The secret only ever feeds the signature
/// computation and is redacted from every formatter.
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
	api_key: ApiKey,
	secret: ApplicationSecret,
}
impl AppCredentials {
	/// Validates and pairs an application key with its secret.
	pub fn new(api_key: impl AsRef<str>, secret: impl Into<String>) -> Result<Self, ConfigError> {
		let api_key = ApiKey::new(api_key.as_ref()).map_err(ConfigError::InvalidApiKey)?;
		let secret = ApplicationSecret::new(secret);

		if secret.is_empty() {
			return Err(ConfigError::EmptySecret);
		}

		Ok(Self { api_key, secret })
	}

	/// Public application key sent as `api_key`.
	pub fn api_key(&self) -> &ApiKey {
		&self.api_key
	}

	/// Signing secret. Callers must avoid logging it.
	pub fn secret(&self) -> &ApplicationSecret {
		&self.secret
	}
}
impl Debug for AppCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppCredentials")
			.field("api_key", &self.api_key)
			.field("secret", &self.secret)
			.finish()
	}
}
