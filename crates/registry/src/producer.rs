//! Producer units and their static registration.
//!
//! A producer unit is one generated data source. It builds its mapping from
//! literal data and hands it to the page exactly once.

use docimpl_primitives::ProducerMapping;

use crate::page::{Page, SubmitOutcome};

/// One generated data source and the mapping it contributes.
///
/// Not `Clone`: [`run`](Self::run) consumes the unit, so each one hands off once.
#[derive(Debug)]
pub struct ProducerUnit {
	name: String,
	mapping: ProducerMapping,
}

impl ProducerUnit {
	pub fn new(name: impl Into<String>, mapping: ProducerMapping) -> Self {
		Self {
			name: name.into(),
			mapping,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn mapping(&self) -> &ProducerMapping {
		&self.mapping
	}

	/// Performs the unit's single handoff to `page`.
	pub fn run(self, page: &mut Page) -> SubmitOutcome {
		let outcome = page.submit(self.mapping);
		tracing::debug!(producer = %self.name, ?outcome, "producer ran");
		outcome
	}
}

/// A producer compiled into the binary, collected via `inventory`.
///
/// Use the [`producer!`](crate::producer!) macro rather than building these by hand.
#[derive(Debug)]
pub struct ProducerDef {
	/// Producer name, unique within its crate.
	pub name: &'static str,
	/// Crate that declared the producer.
	pub crate_name: &'static str,
	/// Run position; lower runs first. Ties are broken by name.
	pub order: i16,
	/// Builds the producer's mapping from literal data.
	pub build: fn() -> ProducerMapping,
}

inventory::collect!(ProducerDef);

impl ProducerDef {
	pub const fn new(name: &'static str, crate_name: &'static str, order: i16, build: fn() -> ProducerMapping) -> Self {
		Self {
			name,
			crate_name,
			order,
			build,
		}
	}

	pub fn unit(&self) -> ProducerUnit {
		ProducerUnit::new(format!("{}::{}", self.crate_name, self.name), (self.build)())
	}
}

/// Every collected producer, in run order.
pub fn collected_producers() -> Vec<&'static ProducerDef> {
	let mut producers: Vec<&'static ProducerDef> = inventory::iter::<ProducerDef>.into_iter().collect();
	producers.sort_by(|a, b| {
		a.order
			.cmp(&b.order)
			.then_with(|| a.crate_name.cmp(b.crate_name))
			.then_with(|| a.name.cmp(b.name))
	});
	producers
}

/// Runs every collected producer against `page` and returns how many ran.
///
/// May be called before or after [`Page::create_registry`]; each producer
/// should only be run once per page.
pub fn run_producers(page: &mut Page) -> usize {
	let producers = collected_producers();
	for def in &producers {
		def.unit().run(page);
	}
	tracing::debug!(count = producers.len(), ready = page.is_ready(), "ran static producers");
	producers.len()
}

/// Declares a producer unit and registers it for [`run_producers`].
///
/// ```ignore
/// docimpl_registry::producer!(tuple_impls, order: 0, {
///     "Arbitrary" => [("<details>...</details>", "Arbitrary", ["(T0, T1)"])],
/// });
/// ```
#[macro_export]
macro_rules! producer {
	($name:ident, order: $order:expr, {
		$( $key:literal => [ $( ($block:expr, $trait_name:expr, [$($ty:expr),* $(,)?]) ),* $(,)? ] ),* $(,)?
	}) => {
		#[allow(non_snake_case)]
		fn $name() -> $crate::primitives::ProducerMapping {
			$crate::primitives::ProducerMapping::builder()
				$($(
					.push(
						$key,
						$crate::primitives::ImplEntry::new(
							$block,
							{
								let types: &[&str] = &[$($ty),*];
								types.iter().copied().collect::<$crate::primitives::ApplicableTypes>()
							},
						)
						.with_trait_name($trait_name),
					)
				)*)*
				.build()
		}

		$crate::inventory::submit!($crate::producer::ProducerDef::new(
			stringify!($name),
			env!("CARGO_PKG_NAME"),
			$order,
			$name,
		));
	};
}

#[cfg(test)]
mod tests;
