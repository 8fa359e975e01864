//! Result keys relative to the root folder, and the public result shapes.

use std::collections::{BTreeMap, BTreeSet};

use davclnt_rfc::rfc::dav::core::{Multistatus, PropertySet};

/// Normalized path → property values.
pub type PropertyMap = BTreeMap<String, PropertySet>;

/// Normalized path → property names.
pub type PropertyNameMap = BTreeMap<String, BTreeSet<String>>;

/// Strips one leading `root_folder` from `href`.
///
/// The href is returned unchanged if the root folder is empty or is not a
/// prefix of it.
#[must_use]
pub fn normalize_href<'a>(href: &'a str, root_folder: &str) -> &'a str {
    if root_folder.is_empty() {
        return href;
    }
    href.strip_prefix(root_folder).unwrap_or(href)
}

/// Keys each response's properties by its normalized href. A later
/// response with the same key replaces an earlier one.
#[must_use]
pub fn properties_by_path(multistatus: Multistatus, root_folder: &str) -> PropertyMap {
    let mut result = PropertyMap::new();
    for entry in multistatus {
        let key = normalize_href(&entry.href, root_folder).to_owned();
        result.insert(key, entry.properties);
    }
    result
}

/// Like [`properties_by_path`] but keeps only the property names.
#[must_use]
pub fn property_names_by_path(multistatus: Multistatus, root_folder: &str) -> PropertyNameMap {
    properties_by_path(multistatus, root_folder)
        .into_iter()
        .map(|(path, properties)| (path, properties.into_keys().collect()))
        .collect()
}
