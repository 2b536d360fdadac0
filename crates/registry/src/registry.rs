//! Page-wide store of implementation entries.
//!
//! # Invariants
//!
//! - An entry sequence, once merged, is never reordered or edited. Later merges
//!   only append after it (or, under [`MergePolicy::Replace`], swap it out whole).
//! - [`Registry::create`] drains the pending buffer before the registry is
//!   handed to anyone, so no caller can observe a half-drained registry.

use docimpl_primitives::{EntityKey, ImplEntry, ProducerMapping};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::config::MergePolicy;
use crate::pending::PendingBuffer;

/// Summary of the pending drain performed by [`Registry::create`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
	/// Pending mappings merged.
	pub mappings: usize,
	/// Entries those mappings contributed.
	pub entries: usize,
}

/// Union of every mapping submitted to a page.
#[derive(Debug, Default)]
pub struct Registry {
	store: IndexMap<EntityKey, Vec<ImplEntry>, FxBuildHasher>,
}

impl Registry {
	/// Creates an empty registry with nothing to drain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates the registry and drains `pending` into it in arrival order.
	///
	/// Pending mappings always append, regardless of the page's merge policy.
	pub fn create(pending: PendingBuffer) -> (Self, DrainReport) {
		let mut registry = Self::new();
		let mut report = DrainReport::default();

		for mapping in pending.drain() {
			report.mappings += 1;
			report.entries += mapping.entry_count();
			registry.merge(mapping);
		}

		tracing::debug!(
			mappings = report.mappings,
			entries = report.entries,
			keys = registry.len(),
			"registry created"
		);
		(registry, report)
	}

	/// Appends each key's entries after whatever is already stored for it.
	///
	/// Submitting the same mapping twice stores its entries twice.
	pub fn merge(&mut self, mapping: ProducerMapping) {
		self.merge_with(mapping, MergePolicy::Append);
	}

	/// Replaces the stored entries of every key present in `mapping`.
	///
	/// Keys absent from `mapping` are left alone.
	pub fn replace(&mut self, mapping: ProducerMapping) {
		self.merge_with(mapping, MergePolicy::Replace);
	}

	/// Merges `mapping` key by key, appending or replacing according to `policy`.
	pub fn merge_with(&mut self, mapping: ProducerMapping, policy: MergePolicy) {
		for (key, entries) in mapping {
			match policy {
				MergePolicy::Append => self.store.entry(key).or_default().extend(entries),
				MergePolicy::Replace => {
					self.store.insert(key, entries);
				}
			}
		}
	}

	/// Entries stored under `key`, in arrival order. Unknown keys yield an empty slice.
	pub fn lookup(&self, key: &str) -> &[ImplEntry] {
		let entries = self.store.get(key).map(Vec::as_slice).unwrap_or_default();
		tracing::trace!(key, found = entries.len(), "lookup");
		entries
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.store.contains_key(key)
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.store.len()
	}

	pub fn is_empty(&self) -> bool {
		self.store.is_empty()
	}

	/// Total number of stored entries across all keys.
	pub fn entry_count(&self) -> usize {
		self.store.values().map(Vec::len).sum()
	}

	/// Keys in first-arrival order.
	pub fn keys(&self) -> impl Iterator<Item = &EntityKey> {
		self.store.keys()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &[ImplEntry])> {
		self.store.iter().map(|(key, entries)| (key, entries.as_slice()))
	}
}
