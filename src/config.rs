//! Endpoint and credential configuration injected into each session.
//!
//! Nothing here is process-wide: a [`WebEndpoints`] value travels with the session that uses
//! it, so several applications (or test fixtures) can point at different hosts side by side.

/// Builder API for assembling endpoint sets.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::AppCredentials, error::ConfigError};

/// Host used by the legacy web flow when no override is configured.
pub const DEFAULT_WWW_BASE: &str = "http://www.facebook.com";
/// Login consent path.
pub const DEFAULT_LOGIN_PATH: &str = "/login.php";
/// Extended-permission consent path.
pub const DEFAULT_PERMISSION_PATH: &str = "/authorize.php";
/// Application install path.
pub const DEFAULT_INSTALL_PATH: &str = "/install.php";

/// The three redirect endpoints the consent URLs are built on.
///
/// Every constructor, deserialization included, validates the endpoints, so a held value
/// always has an http(s) scheme, a host, and neither query nor fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWebEndpoints")]
pub struct WebEndpoints {
	login: Url,
	permission: Url,
	install: Url,
}
impl WebEndpoints {
	/// Creates a builder seeded with the legacy host and paths.
	pub fn builder() -> WebEndpointsBuilder {
		WebEndpointsBuilder::default()
	}

	/// Validates an explicit endpoint triple.
	pub fn new(login: Url, permission: Url, install: Url) -> Result<Self, ConfigError> {
		let endpoints = Self { login, permission, install };

		endpoints.validate()?;

		Ok(endpoints)
	}

	/// Login consent endpoint.
	pub fn login(&self) -> &Url {
		&self.login
	}

	/// Extended-permission consent endpoint.
	pub fn permission(&self) -> &Url {
		&self.permission
	}

	/// Application install endpoint.
	pub fn install(&self) -> &Url {
		&self.install
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_endpoint("login", &self.login)?;
		validate_endpoint("permission", &self.permission)?;
		validate_endpoint("install", &self.install)?;

		Ok(())
	}
}

#[derive(Deserialize)]
struct RawWebEndpoints {
	login: Url,
	permission: Url,
	install: Url,
}
impl TryFrom<RawWebEndpoints> for WebEndpoints {
	type Error = ConfigError;

	fn try_from(raw: RawWebEndpoints) -> Result<Self, Self::Error> {
		Self::new(raw.login, raw.permission, raw.install)
	}
}

/// Serde-friendly session configuration.
///
/// Load it from any serde format, then call [`SessionConfig::into_parts`] to obtain the
/// validated pieces a [`WebSession`](crate::session::WebSession) needs.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
	/// Public application key.
	pub api_key: String,
	/// Application signing secret.
	pub secret: String,
	/// Endpoint overrides, validated while deserializing; the legacy defaults apply when
	/// omitted.
	#[serde(default)]
	pub endpoints: Option<WebEndpoints>,
}
impl SessionConfig {
	/// Validates the configuration into credentials and endpoints.
	pub fn into_parts(self) -> Result<(AppCredentials, WebEndpoints), ConfigError> {
		let credentials = AppCredentials::new(&self.api_key, self.secret)?;
		let endpoints = match self.endpoints {
			Some(endpoints) => endpoints,
			None => WebEndpoints::builder().build()?,
		};

		Ok((credentials, endpoints))
	}
}
impl Debug for SessionConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionConfig")
			.field("api_key", &self.api_key)
			.field("secret", &"<redacted>")
			.field("endpoints", &self.endpoints)
			.finish()
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
		return Err(ConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() });
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(ConfigError::EndpointHasQuery { endpoint: name, url: url.to_string() });
	}

	Ok(())
}
