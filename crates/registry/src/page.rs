//! Per-page registration lifecycle.
//!
//! # Role
//!
//! A [`Page`] is the explicit handle producers and the rendering layer share. It
//! starts in [`PageState::NoRegistry`], where submissions wait in a
//! [`PendingBuffer`], and moves once to [`PageState::RegistryReady`] when the
//! page bootstrap calls [`Page::create_registry`]. There is no way back.
//!
//! # Invariants
//!
//! - The pending buffer is drained exactly once, inside the same call that
//!   creates the registry (see `invariants::inv_drain_exactly_once`).
//! - Submissions made before the registry exists are visible after it does
//!   (see `invariants::inv_no_loss_across_pending_window`).
//! - [`Page::lookup`] is total: before the registry exists it returns an empty
//!   slice.

use std::fmt;

use docimpl_primitives::{ImplEntry, ProducerMapping};

use crate::config::PageConfig;
use crate::error::PageError;
use crate::pending::{PendingBuffer, StashOutcome};
use crate::registry::{DrainReport, Registry};

/// Observable lifecycle state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
	NoRegistry,
	RegistryReady,
}

/// Where a submitted mapping went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// Merged straight into the registry.
	Merged,
	/// Held until the registry is created.
	Pending(StashOutcome),
}

type ReadyListener = Box<dyn FnOnce(&Registry)>;

enum Phase {
	NoRegistry(PendingBuffer),
	RegistryReady(Registry),
}

/// Registration state for one page load.
pub struct Page {
	config: PageConfig,
	phase: Phase,
	listeners: Vec<ReadyListener>,
}

impl Default for Page {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Page {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("Page");
		s.field("config", &self.config).field("state", &self.state());
		match &self.phase {
			Phase::NoRegistry(pending) => s.field("pending", &pending.len()),
			Phase::RegistryReady(registry) => s.field("keys", &registry.len()),
		};
		s.field("listeners", &self.listeners.len()).finish()
	}
}

impl Page {
	/// Creates a page with default policies and no registry.
	pub fn new() -> Self {
		Self::with_config(PageConfig::default())
	}

	pub fn with_config(config: PageConfig) -> Self {
		Self {
			config,
			phase: Phase::NoRegistry(PendingBuffer::new(config.pending)),
			listeners: Vec::new(),
		}
	}

	pub fn config(&self) -> &PageConfig {
		&self.config
	}

	pub fn state(&self) -> PageState {
		match self.phase {
			Phase::NoRegistry(_) => PageState::NoRegistry,
			Phase::RegistryReady(_) => PageState::RegistryReady,
		}
	}

	/// Whether the registry exists and [`lookup`](Self::lookup) can see submissions.
	pub fn is_ready(&self) -> bool {
		self.state() == PageState::RegistryReady
	}

	/// Hands a producer's mapping to the registry, or holds it until the
	/// registry exists. Never fails.
	pub fn submit(&mut self, mapping: ProducerMapping) -> SubmitOutcome {
		let keys = mapping.len();
		let entries = mapping.entry_count();

		match &mut self.phase {
			Phase::RegistryReady(registry) => {
				registry.merge_with(mapping, self.config.merge);
				tracing::debug!(keys, entries, policy = ?self.config.merge, "merged submission");
				SubmitOutcome::Merged
			}
			Phase::NoRegistry(pending) => {
				let outcome = pending.stash(mapping);
				match outcome {
					StashOutcome::Queued { depth } => {
						tracing::debug!(keys, entries, pending = depth, "registry absent, submission held");
					}
					StashOutcome::Overwrote { dropped_keys } => {
						tracing::warn!(keys, dropped_keys, "registry absent, pending submission overwritten");
					}
				}
				SubmitOutcome::Pending(outcome)
			}
		}
	}

	/// Creates the registry, draining every held submission into it, then
	/// notifies [`on_ready`](Self::on_ready) listeners against the stored registry.
	///
	/// Fails without side effects if the registry already exists.
	pub fn create_registry(&mut self) -> Result<DrainReport, PageError> {
		let Phase::NoRegistry(pending) = &mut self.phase else {
			tracing::warn!("registry creation requested twice");
			return Err(PageError::RegistryAlreadyCreated);
		};

		let (registry, report) = Registry::create(std::mem::take(pending));
		self.phase = Phase::RegistryReady(registry);

		// The page is ready before any listener runs, so a panicking listener
		// cannot leave an emptied buffer behind in `NoRegistry`.
		let listeners = std::mem::take(&mut self.listeners);
		if let Phase::RegistryReady(registry) = &self.phase {
			for listener in listeners {
				listener(registry);
			}
		}
		Ok(report)
	}

	/// Runs `listener` once the registry exists; immediately if it already does.
	pub fn on_ready(&mut self, listener: impl FnOnce(&Registry) + 'static) {
		match &self.phase {
			Phase::RegistryReady(registry) => listener(registry),
			Phase::NoRegistry(_) => self.listeners.push(Box::new(listener)),
		}
	}

	/// Entries stored under `key`. Empty for unknown keys and before the
	/// registry exists.
	pub fn lookup(&self, key: &str) -> &[ImplEntry] {
		match &self.phase {
			Phase::RegistryReady(registry) => registry.lookup(key),
			Phase::NoRegistry(_) => &[],
		}
	}

	pub fn registry(&self) -> Option<&Registry> {
		match &self.phase {
			Phase::RegistryReady(registry) => Some(registry),
			Phase::NoRegistry(_) => None,
		}
	}

	/// Mutable registry access, for rendering-layer requests such as
	/// [`Registry::replace`].
	pub fn registry_mut(&mut self) -> Option<&mut Registry> {
		match &mut self.phase {
			Phase::RegistryReady(registry) => Some(registry),
			Phase::NoRegistry(_) => None,
		}
	}

	/// Submissions currently held for the registry.
	pub fn pending_len(&self) -> usize {
		match &self.phase {
			Phase::NoRegistry(pending) => pending.len(),
			Phase::RegistryReady(_) => 0,
		}
	}
}

#[cfg(test)]
mod invariants;
