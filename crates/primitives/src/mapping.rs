//! Per-producer mapping from entity keys to their implementation entries.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::{EntityKey, ImplEntry};

type EntryMap = IndexMap<EntityKey, Vec<ImplEntry>, FxBuildHasher>;

/// Everything one producer unit contributes: entity key to ordered entries.
///
/// Immutable once built. Keys iterate in insertion order and each key's entries
/// keep source order, which is also display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProducerMapping {
	entries: EntryMap,
}

impl ProducerMapping {
	pub fn builder() -> MappingBuilder {
		MappingBuilder::default()
	}

	/// Entries listed under `key`, or an empty slice.
	pub fn get(&self, key: &str) -> &[ImplEntry] {
		self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Total number of entries across all keys.
	pub fn entry_count(&self) -> usize {
		self.entries.values().map(Vec::len).sum()
	}

	pub fn keys(&self) -> impl Iterator<Item = &EntityKey> {
		self.entries.keys()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &[ImplEntry])> {
		self.entries.iter().map(|(key, entries)| (key, entries.as_slice()))
	}
}

impl IntoIterator for ProducerMapping {
	type Item = (EntityKey, Vec<ImplEntry>);
	type IntoIter = indexmap::map::IntoIter<EntityKey, Vec<ImplEntry>>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

/// Collects `(key, entries)` pairs. A repeated key replaces the earlier
/// sequence but keeps its original position.
impl<K: Into<EntityKey>> FromIterator<(K, Vec<ImplEntry>)> for ProducerMapping {
	fn from_iter<I: IntoIterator<Item = (K, Vec<ImplEntry>)>>(iter: I) -> Self {
		let mut builder = MappingBuilder::default();
		for (key, entries) in iter {
			builder = builder.set(key, entries);
		}
		builder.build()
	}
}

/// Builder for [`ProducerMapping`].
#[derive(Debug, Default)]
pub struct MappingBuilder {
	entries: EntryMap,
}

impl MappingBuilder {
	/// Appends one entry under `key`, creating the key if needed.
	pub fn push(mut self, key: impl Into<EntityKey>, entry: ImplEntry) -> Self {
		self.entries.entry(key.into()).or_default().push(entry);
		self
	}

	/// Sets the full entry sequence for `key`, discarding any earlier one.
	pub fn set(mut self, key: impl Into<EntityKey>, entries: Vec<ImplEntry>) -> Self {
		self.entries.insert(key.into(), entries);
		self
	}

	pub fn build(self) -> ProducerMapping {
		ProducerMapping { entries: self.entries }
	}
}
