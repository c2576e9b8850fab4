// self
use crate::{
	_prelude::*,
	config::{
		DEFAULT_INSTALL_PATH, DEFAULT_LOGIN_PATH, DEFAULT_PERMISSION_PATH, DEFAULT_WWW_BASE,
		WebEndpoints,
	},
	error::ConfigError,
};

/// Builder for [`WebEndpoints`] values.
///
/// Endpoints are assembled as `<base><path>`; the base must not end with a query or
/// fragment, and each path should start with `/`.
#[derive(Clone, Debug)]
pub struct WebEndpointsBuilder {
	/// Scheme + host (and optional port) shared by all endpoints.
	pub base: String,
	/// Path of the login endpoint.
	pub login_path: String,
	/// Path of the permission endpoint.
	pub permission_path: String,
	/// Path of the install endpoint.
	pub install_path: String,
}
impl Default for WebEndpointsBuilder {
	fn default() -> Self {
		Self {
			base: DEFAULT_WWW_BASE.into(),
			login_path: DEFAULT_LOGIN_PATH.into(),
			permission_path: DEFAULT_PERMISSION_PATH.into(),
			install_path: DEFAULT_INSTALL_PATH.into(),
		}
	}
}
impl WebEndpointsBuilder {
	/// Overrides the shared scheme + host.
	pub fn base(mut self, base: impl Into<String>) -> Self {
		self.base = base.into();

		self
	}

	/// Overrides the login path.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Overrides the permission path.
	pub fn permission_path(mut self, path: impl Into<String>) -> Self {
		self.permission_path = path.into();

		self
	}

	/// Overrides the install path.
	pub fn install_path(mut self, path: impl Into<String>) -> Self {
		self.install_path = path.into();

		self
	}

	/// Consumes the builder and validates the resulting endpoints.
	pub fn build(self) -> Result<WebEndpoints, ConfigError> {
		let base = self.base.trim_end_matches('/');
		let login = join("login", base, &self.login_path)?;
		let permission = join("permission", base, &self.permission_path)?;
		let install = join("install", base, &self.install_path)?;

		WebEndpoints::new(login, permission, install)
	}
}

fn join(endpoint: &'static str, base: &str, path: &str) -> Result<Url, ConfigError> {
	let raw = if path.starts_with('/') {
		format!("{base}{path}")
	} else {
		format!("{base}/{path}")
	};

	Url::parse(&raw)
		.map_err(|e| ConfigError::InvalidEndpoint { endpoint, reason: e.to_string() })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_joins_base_and_paths() {
		let endpoints = WebEndpoints::builder()
			.base("https://auth.example.com/")
			.login_path("signin")
			.permission_path("/grant")
			.install_path("/add")
			.build()
			.expect("Endpoint builder should succeed for valid parts.");

		assert_eq!(endpoints.login().as_str(), "https://auth.example.com/signin");
		assert_eq!(endpoints.permission().as_str(), "https://auth.example.com/grant");
		assert_eq!(endpoints.install().as_str(), "https://auth.example.com/add");
	}

	#[test]
	fn builder_rejects_unsupported_schemes_and_garbage() {
		let err = WebEndpoints::builder()
			.base("ftp://auth.example.com")
			.build()
			.expect_err("Non-HTTP schemes must be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { endpoint: "login", .. }));

		let err = WebEndpoints::builder()
			.base("not a url")
			.build()
			.expect_err("Unparsable bases must be rejected.");

		assert!(matches!(err, ConfigError::InvalidEndpoint { endpoint: "login", .. }));
	}
}
