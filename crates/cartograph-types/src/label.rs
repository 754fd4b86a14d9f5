//! Localizable display labels.
//!
//! A [`Label`] is either a message key to be resolved through a
//! [`Localizer`], or a literal name chosen by a player. Nothing here owns
//! translations; the host supplies them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolves message keys to display templates.
pub trait Localizer {
    /// Return the template for `key`, or `None` if the key is unknown.
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// A displayable string template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Label {
    /// A message key, rendered through a [`Localizer`].
    Key(String),
    /// A literal name, rendered as-is.
    Name(String),
}

impl Label {
    /// Build a key label.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Build a literal name label.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Render to display text. Unknown keys render as the key itself.
    pub fn render(&self, localizer: &dyn Localizer) -> String {
        match self {
            Self::Key(key) => localizer.lookup(key).unwrap_or(key.as_str()).to_owned(),
            Self::Name(name) => name.clone(),
        }
    }
}

/// An in-memory [`Localizer`] backed by a sorted map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }

    /// Add or replace a message.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(key.into(), template.into());
    }

    /// Number of messages held.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the catalog holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localizer for MessageCatalog {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
