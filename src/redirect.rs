//! Consent redirect URLs (login, extended permission, install).
//!
//! Every URL starts with `v=1.0&api_key=<key>` on its configured endpoint and then appends
//! the optional parameters selected by an explicit options struct, in a fixed order. Values
//! are form-urlencoded before concatenation.

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, PermissionSet},
	config::WebEndpoints,
	error::ValidationError,
};

/// Protocol version sent as `v` on every redirect.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Options for [`UrlBuilder::login_url`]. Every flag defaults to `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginOptions {
	/// Page to redirect to after login.
	pub next: Option<String>,
	/// Use the popup login style (`popup=true`).
	pub popup: bool,
	/// Force a fresh login even when a cookie exists (`skipcookie=true`).
	pub skip_cookie: bool,
	/// Hide the "keep me logged in" checkbox (`hide_checkbox=true`).
	pub hide_checkbox: bool,
	/// Show the profile selector frame (`fbframe=true`).
	pub use_frame: bool,
	/// Redirect inside the canvas (`canvas=true`).
	pub use_canvas: bool,
}
impl LoginOptions {
	/// Sets the post-login redirect target.
	pub fn next(mut self, next: impl Into<String>) -> Self {
		self.next = Some(next.into());

		self
	}

	/// Requests the popup login style.
	pub fn popup(mut self) -> Self {
		self.popup = true;

		self
	}

	/// Forces a fresh login.
	pub fn skip_cookie(mut self) -> Self {
		self.skip_cookie = true;

		self
	}

	/// Hides the persistent-login checkbox.
	pub fn hide_checkbox(mut self) -> Self {
		self.hide_checkbox = true;

		self
	}

	/// Shows the profile selector frame.
	pub fn use_frame(mut self) -> Self {
		self.use_frame = true;

		self
	}

	/// Redirects inside the canvas.
	pub fn use_canvas(mut self) -> Self {
		self.use_canvas = true;

		self
	}
}

/// Options for [`UrlBuilder::permission_url`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionOptions {
	/// Page to redirect to after the grant.
	pub next: Option<String>,
	/// Show the profile selector frame (`fbframe=true`). Defaults to `false`.
	pub frame: bool,
	/// Extended permissions to request (`ext_perm`).
	pub extended_permissions: Option<PermissionSet>,
}
impl PermissionOptions {
	/// Sets the post-grant redirect target.
	pub fn next(mut self, next: impl Into<String>) -> Self {
		self.next = Some(next.into());

		self
	}

	/// Shows the profile selector frame.
	pub fn frame(mut self) -> Self {
		self.frame = true;

		self
	}

	/// Requests the provided extended permissions.
	pub fn extended_permissions(mut self, permissions: PermissionSet) -> Self {
		self.extended_permissions = Some(permissions);

		self
	}
}

/// Options for [`UrlBuilder::install_url`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallOptions {
	/// Page to redirect to after installation.
	pub next: Option<String>,
}
impl InstallOptions {
	/// Sets the post-install redirect target.
	pub fn next(mut self, next: impl Into<String>) -> Self {
		self.next = Some(next.into());

		self
	}
}

/// Builds consent URLs for one application against one endpoint set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlBuilder {
	endpoints: WebEndpoints,
	api_key: ApiKey,
}
impl UrlBuilder {
	/// Pairs an endpoint set with the application key placed in every URL.
	pub fn new(endpoints: WebEndpoints, api_key: ApiKey) -> Self {
		Self { endpoints, api_key }
	}

	/// Endpoint set the builder targets.
	pub fn endpoints(&self) -> &WebEndpoints {
		&self.endpoints
	}

	/// Login consent URL.
	pub fn login_url(&self, options: &LoginOptions) -> Result<Url, ValidationError> {
		let next = validate_next(options.next.as_deref())?;
		let mut url = self.endpoints.login().clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("v", PROTOCOL_VERSION);
		pairs.append_pair("api_key", &self.api_key);

		if options.popup {
			pairs.append_pair("popup", "true");
		}
		if let Some(next) = next {
			pairs.append_pair("next", next);
		}
		if options.skip_cookie {
			pairs.append_pair("skipcookie", "true");
		}
		if options.hide_checkbox {
			pairs.append_pair("hide_checkbox", "true");
		}
		if options.use_frame {
			pairs.append_pair("fbframe", "true");
		}
		if options.use_canvas {
			pairs.append_pair("canvas", "true");
		}

		drop(pairs);

		Ok(url)
	}

	/// Extended-permission consent URL, always rendered as an external popup.
	pub fn permission_url(&self, options: &PermissionOptions) -> Result<Url, ValidationError> {
		let next = validate_next(options.next.as_deref())?;
		let mut url = self.endpoints.permission().clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("v", PROTOCOL_VERSION);
		pairs.append_pair("api_key", &self.api_key);
		pairs.append_pair("display", "popup");
		pairs.append_pair("extern", "1");

		if let Some(next) = next {
			pairs.append_pair("next", next);
		}
		if options.frame {
			pairs.append_pair("fbframe", "true");
		}
		if let Some(permissions) = options.extended_permissions.as_ref() {
			pairs.append_pair("ext_perm", &permissions.joined());
		}

		drop(pairs);

		Ok(url)
	}

	/// Application install URL.
	pub fn install_url(&self, options: &InstallOptions) -> Result<Url, ValidationError> {
		let next = validate_next(options.next.as_deref())?;
		let mut url = self.endpoints.install().clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("v", PROTOCOL_VERSION);
		pairs.append_pair("api_key", &self.api_key);

		if let Some(next) = next {
			pairs.append_pair("next", next);
		}

		drop(pairs);

		Ok(url)
	}
}

fn validate_next(next: Option<&str>) -> Result<Option<&str>, ValidationError> {
	match next {
		Some("") => Err(ValidationError::EmptyRedirectTarget),
		Some(value) if value.chars().any(char::is_control) =>
			Err(ValidationError::InvalidRedirectTarget),
		other => Ok(other),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder() -> UrlBuilder {
		let endpoints =
			WebEndpoints::builder().build().expect("Default endpoints should build successfully.");
		let api_key = ApiKey::new("app-key").expect("Application key fixture should be valid.");

		UrlBuilder::new(endpoints, api_key)
	}

	#[test]
	fn login_flags_follow_fixed_order() {
		let options = LoginOptions::default()
			.use_canvas()
			.use_frame()
			.hide_checkbox()
			.skip_cookie()
			.next("http://app.example.com/cb?x=1")
			.popup();
		let url = builder().login_url(&options).expect("Login URL should build.");

		assert_eq!(
			url.as_str(),
			"http://www.facebook.com/login.php?v=1.0&api_key=app-key&popup=true\
			 &next=http%3A%2F%2Fapp.example.com%2Fcb%3Fx%3D1&skipcookie=true\
			 &hide_checkbox=true&fbframe=true&canvas=true"
		);
	}

	#[test]
	fn permission_url_appends_ext_perm_whenever_supplied() {
		let permissions = PermissionSet::new(["email", "offline_access"])
			.expect("Permission fixture should be valid.");
		let url = builder()
			.permission_url(&PermissionOptions::default().extended_permissions(permissions))
			.expect("Permission URL should build.");

		assert_eq!(
			url.as_str(),
			"http://www.facebook.com/authorize.php?v=1.0&api_key=app-key&display=popup&extern=1\
			 &ext_perm=email%2Coffline_access"
		);

		let url = builder()
			.permission_url(&PermissionOptions::default().frame())
			.expect("Permission URL should build.");

		assert!(url.as_str().ends_with("&extern=1&fbframe=true"));
	}

	#[test]
	fn redirect_targets_are_validated() {
		let builder = builder();

		assert_eq!(
			builder.install_url(&InstallOptions::default().next("")),
			Err(ValidationError::EmptyRedirectTarget)
		);
		assert_eq!(
			builder.login_url(&LoginOptions::default().next("http://x/\n")),
			Err(ValidationError::InvalidRedirectTarget)
		);
	}

	#[test]
	fn options_deserialize_with_defaults() {
		let options: LoginOptions = serde_json::from_str(r#"{"popup":true}"#)
			.expect("Partial login options should deserialize.");

		assert_eq!(options, LoginOptions::default().popup());
		assert!(serde_json::from_str::<LoginOptions>(r#"{"popup":"yes"}"#).is_err());
	}
}
