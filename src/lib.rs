//! Session handling for legacy signed-request web authentication: consent redirect URLs,
//! token-to-session activation, readiness tracking, and request/callback signatures.
//!
//! The network transport stays with the caller behind [`remote::RemoteClient`]; everything
//! else needed to drive a session lives in [`session::WebSession`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod obs;
pub mod redirect;
pub mod remote;
pub mod session;
pub mod signature;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use color_eyre as _;
