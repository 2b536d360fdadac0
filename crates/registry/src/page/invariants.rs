//! Proof entrypoints for the page lifecycle invariants.

use docimpl_primitives::{ImplEntry, ProducerMapping};

use super::{Page, PageState, SubmitOutcome};
use crate::config::{PageConfig, PendingPolicy};
use crate::error::PageError;

fn mapping(key: &str, block: &str) -> ProducerMapping {
	ProducerMapping::builder().push(key, ImplEntry::new(block, ["T"])).build()
}

/// Invariant: no loss across the pending window.
///
/// Every submission made while the registry is absent MUST be visible through
/// `lookup` once the registry exists, with no entry dropped.
pub(crate) fn inv_no_loss_across_pending_window() {
	let mut page = Page::new();
	for i in 0..5 {
		page.submit(mapping("K", &format!("<{i}>")));
	}
	assert_eq!(page.pending_len(), 5);

	let report = page.create_registry().unwrap();
	assert_eq!(report.mappings, 5);
	assert_eq!(report.entries, 5);

	let blocks: Vec<&str> = page.lookup("K").iter().map(|e| e.block().as_str()).collect();
	assert_eq!(blocks, vec!["<0>", "<1>", "<2>", "<3>", "<4>"]);
}

/// Invariant: the pending buffer drains exactly once.
///
/// A second creation attempt MUST fail and MUST NOT re-apply held submissions.
pub(crate) fn inv_drain_exactly_once() {
	let mut page = Page::new();
	page.submit(mapping("K", "a"));
	page.create_registry().unwrap();

	assert_eq!(page.create_registry(), Err(PageError::RegistryAlreadyCreated));
	assert_eq!(page.state(), PageState::RegistryReady);
	assert_eq!(page.lookup("K").len(), 1);
	assert_eq!(page.pending_len(), 0);
}

/// Invariant: after the transition every submission merges directly.
pub(crate) fn inv_direct_merge_after_ready() {
	let mut page = Page::new();
	page.create_registry().unwrap();

	assert_eq!(page.submit(mapping("K", "a")), SubmitOutcome::Merged);
	assert_eq!(page.pending_len(), 0);
	assert_eq!(page.lookup("K").len(), 1);
}

/// Invariant: lookup is total.
///
/// Unknown keys and lookups before the registry exists MUST yield an empty slice.
pub(crate) fn inv_lookup_is_total() {
	let mut page = Page::new();
	page.submit(mapping("K", "a"));
	assert!(page.lookup("K").is_empty());
	assert!(page.lookup("unknown").is_empty());

	page.create_registry().unwrap();
	page.submit(mapping("J", "b"));
	assert!(page.lookup("unknown").is_empty());
}

/// Invariant: last-write-wins only ever drops pending submissions, never merged ones.
pub(crate) fn inv_last_write_wins_bounded_loss() {
	let mut page = Page::with_config(PageConfig::default().with_pending(PendingPolicy::LastWriteWins));
	page.submit(mapping("K", "dropped"));
	page.submit(mapping("K", "kept"));
	page.create_registry().unwrap();
	page.submit(mapping("K", "direct"));

	let blocks: Vec<&str> = page.lookup("K").iter().map(|e| e.block().as_str()).collect();
	assert_eq!(blocks, vec!["kept", "direct"]);
}

#[test]
fn test_no_loss_across_pending_window() {
	inv_no_loss_across_pending_window();
}

#[test]
fn test_drain_exactly_once() {
	inv_drain_exactly_once();
}

#[test]
fn test_direct_merge_after_ready() {
	inv_direct_merge_after_ready();
}

#[test]
fn test_lookup_is_total() {
	inv_lookup_is_total();
}

#[test]
fn test_last_write_wins_bounded_loss() {
	inv_last_write_wins_bounded_loss();
}
