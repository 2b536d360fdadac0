use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Pre-rendered documentation for a single implementation.
///
/// The markup is never inspected. It is shared, so cloning a block does not copy it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplBlock(Arc<str>);

impl ImplBlock {
	pub fn new(markup: impl Into<Arc<str>>) -> Self {
		Self(markup.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&str> for ImplBlock {
	fn from(markup: &str) -> Self {
		Self(markup.into())
	}
}

impl From<String> for ImplBlock {
	fn from(markup: String) -> Self {
		Self(markup.into())
	}
}

impl fmt::Display for ImplBlock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Concrete types an [`ImplBlock`] concerns, in generator order.
///
/// Carried for the rendering layer only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicableTypes(Arc<[String]>);

impl ApplicableTypes {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for ApplicableTypes {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ApplicableTypes {
	fn from(types: [S; N]) -> Self {
		types.into_iter().collect()
	}
}

impl From<Vec<String>> for ApplicableTypes {
	fn from(types: Vec<String>) -> Self {
		Self(types.into())
	}
}

/// One implementation listed under an entity: the block plus the types it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImplEntry {
	block: ImplBlock,
	/// Trait label the generator writes next to the block, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	trait_name: Option<String>,
	types: ApplicableTypes,
}

impl ImplEntry {
	pub fn new(block: impl Into<ImplBlock>, types: impl Into<ApplicableTypes>) -> Self {
		Self {
			block: block.into(),
			trait_name: None,
			types: types.into(),
		}
	}

	/// Attaches a trait label. Empty labels are treated as absent.
	pub fn with_trait_name(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		self.trait_name = (!name.is_empty()).then_some(name);
		self
	}

	pub fn block(&self) -> &ImplBlock {
		&self.block
	}

	pub fn trait_name(&self) -> Option<&str> {
		self.trait_name.as_deref()
	}

	pub fn types(&self) -> &ApplicableTypes {
		&self.types
	}
}
