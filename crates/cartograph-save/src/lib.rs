//! XML save documents for Cartograph regions.
//!
//! A region is stored as one `region` element whose scalar fields are
//! attributes and whose children are `child` elements naming other regions
//! by identifier. Optional fields are only written when set, following the
//! policy table in [`schema`].
//!
//! # Modules
//!
//! - [`schema`] -- Tag names and the attribute presence policy.
//! - [`writer`] -- Region and region-set serialization.
//! - [`reader`] -- Lenient deserialization with forward references.
//! - [`error`] -- [`SaveError`].

pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::SaveError;
pub use reader::{PlayerLookup, read_region, read_regions};
pub use writer::{region_to_string, write_region, write_regions};
