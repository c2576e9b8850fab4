//! Strongly typed identifiers exchanged with the remote service.
//!
//! Both identifiers are copied verbatim into signed parameter sets, so they must be
//! non-empty and carry no whitespace: a padded value would sign differently from what the
//! remote service echoes back.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($(#[$meta:meta])* $name:ident => $kind:literal) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates `value` as an identifier.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				Self::try_from(value.into())
			}

			/// Identifier text.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				check($kind, &value).map(|_| Self(value))
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (application, user).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (application, user).
		kind: &'static str,
	},
}

def_id! {
	/// Public key identifying the calling application (`api_key`).
	ApiKey => "Application"
}
def_id! {
	/// Identifier of the user an activated session belongs to (`uid`).
	UserId => "User"
}

fn check(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		Err(IdentifierError::Empty { kind })
	} else if value.chars().any(char::is_whitespace) {
		Err(IdentifierError::ContainsWhitespace { kind })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_padding_and_empty_values() {
		assert!(ApiKey::new(" key-123").is_err(), "Leading whitespace must be rejected.");
		assert!(ApiKey::new("key-123 ").is_err(), "Trailing whitespace must be rejected.");

		let key = ApiKey::new("key-123").expect("Key fixture should be considered valid.");

		assert_eq!(key.as_str(), "key-123");
		assert_eq!(format!("{key:?}"), "Application(key-123)");
		assert!(matches!(UserId::new(""), Err(IdentifierError::Empty { kind: "User" })));
	}

	#[test]
	fn long_identifiers_are_accepted() {
		let uid = "1".repeat(512);

		assert_eq!(UserId::new(uid.clone()).map(String::from), Ok(uid));
	}

	#[test]
	fn serde_enforces_validation() {
		let user: UserId =
			serde_json::from_str("\"4242\"").expect("User id should deserialize successfully.");

		assert_eq!(user.as_ref(), "4242");
		assert!(serde_json::from_str::<UserId>("\"42 42\"").is_err());
	}
}
