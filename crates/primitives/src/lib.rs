//! Value types shared by producer units and the implementation registry.
//!
//! Everything here is plain data. Markup and type lists are carried verbatim and
//! never interpreted.

/// Entity keys.
pub mod entity;
/// Implementation blocks and the types they apply to.
pub mod entry;
pub mod mapping;

pub use entity::EntityKey;
pub use entry::{ApplicableTypes, ImplBlock, ImplEntry};
pub use mapping::{MappingBuilder, ProducerMapping};
