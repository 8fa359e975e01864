//! Decoded multistatus response types.

use std::collections::BTreeMap;

use serde::Serialize;

/// Property values of one resource, keyed by unqualified element name.
pub type PropertySet = BTreeMap<String, String>;

/// One `<response>` of a multistatus document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    /// Resource path as reported by the server.
    pub href: String,
    /// Properties found under the response's `propstat/prop` elements.
    pub properties: PropertySet,
}

impl ResourceEntry {
    /// Builds an entry from `(name, value)` pairs; a later pair replaces an
    /// earlier one with the same name.
    #[must_use]
    pub fn new<I>(href: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut set = PropertySet::new();
        for (name, value) in properties {
            set.insert(name, value);
        }

        Self {
            href: href.into(),
            properties: set,
        }
    }

    /// Returns the value of a property, if present.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// A decoded multistatus document, responses in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Multistatus {
    pub responses: Vec<ResourceEntry>,
}

impl Multistatus {
    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.responses.iter()
    }
}

impl IntoIterator for Multistatus {
    type Item = ResourceEntry;
    type IntoIter = std::vec::IntoIter<ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Multistatus {
    type Item = &'a ResourceEntry;
    type IntoIter = std::slice::Iter<'a, ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}
