//! Error types for region save documents.
//!
//! Transport failures from `quick-xml` are wrapped unchanged. Missing or
//! malformed *optional* attributes never produce an error; they fall back
//! to defaults in the reader.

use cartograph_world::WorldError;

/// Errors that can occur while writing or reading a region document.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The XML reader or writer failed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be parsed.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Writing to the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A required attribute was missing.
    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        /// The element being read.
        element: &'static str,
        /// The missing attribute.
        attribute: &'static str,
    },

    /// A required attribute held a value that could not be decoded.
    #[error("attribute `{attribute}` has invalid value `{value}`: {reason}")]
    InvalidValue {
        /// The attribute name.
        attribute: &'static str,
        /// The raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An element appeared where another was expected.
    #[error("expected <{expected}>, found <{found}>")]
    UnexpectedElement {
        /// The expected element.
        expected: &'static str,
        /// The element found.
        found: String,
    },

    /// The document ended inside an element.
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// The regions read could not be stored.
    #[error("region store error: {0}")]
    World(#[from] WorldError),
}
