use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a documented entity (a type or trait) whose implementations are indexed.
///
/// Keys are opaque. They are unique inside one [`ProducerMapping`](crate::ProducerMapping)
/// but two mappings may both carry the same key; the registry merges those.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for EntityKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for EntityKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for EntityKey {
	fn from(key: &str) -> Self {
		Self(key.to_owned())
	}
}

impl From<String> for EntityKey {
	fn from(key: String) -> Self {
		Self(key)
	}
}

impl fmt::Display for EntityKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
