//! Walks through building consent URLs, activating a session from the returned token, and
//! signing a follow-up call, using the in-process remote stub in place of a real transport.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use legacy_web_auth::{
	auth::PermissionSet,
	config::SessionConfig,
	redirect::{LoginOptions, PermissionOptions},
	remote::{METHOD_GET_SESSION, StaticRemoteClient},
	session::WebSession,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config: SessionConfig =
		serde_json::from_str(r#"{ "api_key": "demo-key", "secret": "demo-secret" }"#)?;
	let expires = OffsetDateTime::now_utc() + Duration::hours(2);
	let remote = StaticRemoteClient::default().with_response(
		METHOD_GET_SESSION,
		json!({
			"uid": "1001",
			"session_key": "demo-session",
			"expires": expires.unix_timestamp()
		}),
	);
	let session = WebSession::from_config(config, Arc::new(remote))?;
	let login = session.login_url(&LoginOptions::default().next("/welcome").popup())?;
	let permissions = PermissionSet::new(["email", "offline_access"])?;
	let grant =
		session.permission_url(&PermissionOptions::default().extended_permissions(permissions))?;

	println!("Send your user to {login}.");
	println!("Ask for extended permissions at {grant}.");

	// Simulate the login callback handing back an `auth_token`.
	session.activate_with_token("demo-auth-token").await?;

	println!("Session ready: {}.", session.is_ready());

	let signed =
		session.signed_call_params("users.getInfo", [("uids", "1001"), ("fields", "name")]);

	for (key, value) in &signed {
		println!("{key}={value}");
	}

	Ok(())
}
