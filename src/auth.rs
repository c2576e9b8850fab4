//! Application credentials, session identifiers, and extended-permission sets.

pub mod credentials;
pub mod id;
pub mod permission;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use permission::*;
pub use secret::*;
