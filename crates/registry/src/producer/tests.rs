use pretty_assertions::assert_eq;

use super::*;
use crate::page::PageState;
use crate::pending::StashOutcome;

crate::producer!(tuple_impls, order: 0, {
	"Arbitrary" => [
		("<impl-arbitrary-t0-t1>", "Arbitrary", ["(T0, T1)"]),
		("<impl-arbitrary-t0-t1-t2>", "Arbitrary", ["(T0, T1, T2)"]),
	],
});

crate::producer!(late_impls, order: 10, {
	"Arbitrary" => [("<impl-arbitrary-unit>", "", [])],
	"Strategy" => [("<impl-strategy>", "Strategy", ["W", "WA"])],
});

#[test]
fn test_collected_in_run_order() {
	let names: Vec<&str> = collected_producers().iter().map(|def| def.name).collect();
	assert_eq!(names, vec!["tuple_impls", "late_impls"]);
	assert!(collected_producers().iter().all(|def| def.crate_name == "docimpl-registry"));
}

#[test]
fn test_macro_builds_mapping_from_literals() {
	let def = collected_producers()
		.into_iter()
		.find(|def| def.name == "late_impls")
		.unwrap();
	let unit = def.unit();

	assert_eq!(unit.name(), "docimpl-registry::late_impls");
	let arbitrary = unit.mapping().get("Arbitrary");
	assert_eq!(arbitrary.len(), 1);
	assert_eq!(arbitrary[0].trait_name(), None);
	assert!(arbitrary[0].types().is_empty());

	let strategy = unit.mapping().get("Strategy");
	assert_eq!(strategy[0].trait_name(), Some("Strategy"));
	assert_eq!(strategy[0].types().as_slice(), ["W", "WA"]);
}

#[test]
fn test_run_producers_before_registry() {
	let mut page = Page::new();
	assert_eq!(run_producers(&mut page), 2);
	assert_eq!(page.state(), PageState::NoRegistry);
	assert_eq!(page.pending_len(), 2);

	page.create_registry().unwrap();
	let blocks: Vec<&str> = page
		.lookup("Arbitrary")
		.iter()
		.map(|e| e.block().as_str())
		.collect();
	assert_eq!(
		blocks,
		vec!["<impl-arbitrary-t0-t1>", "<impl-arbitrary-t0-t1-t2>", "<impl-arbitrary-unit>"]
	);
}

#[test]
fn test_run_producers_after_registry_matches() {
	let mut early = Page::new();
	run_producers(&mut early);
	early.create_registry().unwrap();

	let mut late = Page::new();
	late.create_registry().unwrap();
	run_producers(&mut late);

	for key in ["Arbitrary", "Strategy"] {
		assert_eq!(early.lookup(key), late.lookup(key));
	}
}

#[test]
fn test_unit_runs_once_and_reports_outcome() {
	let mut page = Page::new();
	let unit = ProducerUnit::new(
		"manual",
		ProducerMapping::builder()
			.push("K", docimpl_primitives::ImplEntry::new("<k>", ["T"]))
			.build(),
	);
	assert_eq!(
		unit.run(&mut page),
		SubmitOutcome::Pending(StashOutcome::Queued { depth: 1 })
	);
}
