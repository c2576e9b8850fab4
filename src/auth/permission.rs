//! Extended-permission lists requested through the permission redirect.

// std
use std::collections::HashSet;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating permission names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum PermissionValidationError {
	/// At least one permission must be requested.
	#[error("Permission list cannot be empty.")]
	NoPermissions,
	/// Empty permission entries are not allowed.
	#[error("Permission entries cannot be empty.")]
	Empty,
	/// Permission names are limited to ASCII alphanumerics and underscores.
	#[error("Permission name contains invalid characters: {permission}.")]
	InvalidCharacters {
		/// The offending permission name.
		permission: String,
	},
}

/// Ordered, deduplicated set of extended permission names (`email`, `offline_access`, ...).
///
/// The first occurrence of a name fixes its position, so the rendered `ext_perm` value keeps
/// the order the caller asked for.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PermissionSet(Arc<[String]>);
impl PermissionSet {
	/// Builds a validated permission set from any iterator of names.
	pub fn new<I, S>(permissions: I) -> Result<Self, PermissionValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Ok(Self(normalize(permissions)?))
	}

	/// Number of distinct permissions.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Always `false`; construction rejects empty lists.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the set contains the provided permission.
	pub fn contains(&self, permission: &str) -> bool {
		self.0.iter().any(|candidate| candidate == permission)
	}

	/// Iterator over permission names in request order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|s| s.as_str())
	}

	/// Comma-joined representation used for the `ext_perm` query parameter.
	pub fn joined(&self) -> String {
		self.0.join(",")
	}
}
impl Debug for PermissionSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PermissionSet").field(&self.0).finish()
	}
}
impl Display for PermissionSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.joined())
	}
}

impl FromStr for PermissionSet {
	type Err = PermissionValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s.split(',').map(str::trim))
	}
}
impl Serialize for PermissionSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for permission in self.0.iter() {
			seq.serialize_element(permission)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for PermissionSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		PermissionSet::new(values).map_err(DeError::custom)
	}
}

fn normalize<I, S>(permissions: I) -> Result<Arc<[String]>, PermissionValidationError>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut seen = HashSet::new();
	let mut ordered = Vec::new();

	for permission in permissions {
		let owned: String = permission.into();

		if owned.is_empty() {
			return Err(PermissionValidationError::Empty);
		}
		if !owned.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
			return Err(PermissionValidationError::InvalidCharacters { permission: owned });
		}
		if seen.insert(owned.clone()) {
			ordered.push(owned);
		}
	}

	if ordered.is_empty() {
		return Err(PermissionValidationError::NoPermissions);
	}

	Ok(Arc::from(ordered))
}
