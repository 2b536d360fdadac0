//! Lazy registration of pre-rendered implementation blocks.
//!
//! Producer units each contribute a [`ProducerMapping`] from entity keys to
//! implementation entries. The page's [`Registry`] may be created before or
//! after any producer runs, so submissions go through a [`Page`] handle:
//!
//! - while the registry is absent, submissions wait in a [`PendingBuffer`];
//! - [`Page::create_registry`] builds the registry and drains them in one step;
//! - later submissions merge directly.
//!
//! Merges append, so every producer's entries survive whichever order the
//! page evaluates them in.
//!
//! ```
//! use docimpl_registry::{Page, primitives::{ImplEntry, ProducerMapping}};
//!
//! let mut page = Page::new();
//! page.submit(ProducerMapping::builder().push("Arbitrary", ImplEntry::new("<impl1>", ["X"])).build());
//! assert!(page.lookup("Arbitrary").is_empty());
//!
//! page.create_registry().unwrap();
//! page.submit(ProducerMapping::builder().push("Arbitrary", ImplEntry::new("<impl2>", ["Y", "Z"])).build());
//! assert_eq!(page.lookup("Arbitrary").len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod page;
pub mod pending;
pub mod producer;
pub mod registry;
pub mod script;

pub use config::{ConfigError, MergePolicy, PageConfig, PendingPolicy};
pub use error::PageError;
pub use page::{Page, PageState, SubmitOutcome};
pub use pending::{PendingBuffer, StashOutcome};
pub use producer::{ProducerDef, ProducerUnit, collected_producers, run_producers};
pub use registry::{DrainReport, Registry};
pub use script::{FragmentFooter, ProducerScript, ScriptError, load_producer_script, parse_producer_script};
pub use docimpl_primitives as primitives;
#[doc(hidden)]
pub use inventory;

pub use docimpl_primitives::{ApplicableTypes, EntityKey, ImplBlock, ImplEntry, ProducerMapping};
