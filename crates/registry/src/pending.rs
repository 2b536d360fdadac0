//! Holding area for mappings submitted before the registry exists.

use docimpl_primitives::ProducerMapping;

use crate::config::PendingPolicy;

/// What [`PendingBuffer::stash`] did with a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashOutcome {
	/// Mapping was added; `depth` mappings are now waiting.
	Queued { depth: usize },
	/// Mapping replaced a waiting one, which is gone for good.
	Overwrote { dropped_keys: usize },
}

/// Mappings waiting for the registry.
///
/// Draining consumes the buffer, so it can happen at most once.
#[derive(Debug, Default)]
pub struct PendingBuffer {
	policy: PendingPolicy,
	slots: Vec<ProducerMapping>,
}

impl PendingBuffer {
	pub fn new(policy: PendingPolicy) -> Self {
		Self {
			policy,
			slots: Vec::new(),
		}
	}

	pub fn policy(&self) -> PendingPolicy {
		self.policy
	}

	pub fn stash(&mut self, mapping: ProducerMapping) -> StashOutcome {
		match self.policy {
			PendingPolicy::Queue => {
				self.slots.push(mapping);
				StashOutcome::Queued {
					depth: self.slots.len(),
				}
			}
			PendingPolicy::LastWriteWins => match self.slots.pop() {
				Some(previous) => {
					self.slots.push(mapping);
					StashOutcome::Overwrote {
						dropped_keys: previous.len(),
					}
				}
				None => {
					self.slots.push(mapping);
					StashOutcome::Queued { depth: 1 }
				}
			},
		}
	}

	/// Number of waiting mappings.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Hands out every waiting mapping in arrival order.
	pub(crate) fn drain(self) -> Vec<ProducerMapping> {
		self.slots
	}
}
