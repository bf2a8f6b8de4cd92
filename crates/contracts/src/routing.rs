//! RoutingTable - static tag → destinations table
//!
//! Built once at startup from configuration and shared read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::DestinationRef;

/// One configured route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Tag this entry matches (exact equality)
    pub tag: String,

    /// Destinations in configured order
    #[serde(default, rename = "outputs")]
    pub destinations: Vec<DestinationRef>,
}

impl RouteEntry {
    pub fn new(tag: impl Into<String>, destinations: Vec<DestinationRef>) -> Self {
        Self {
            tag: tag.into(),
            destinations,
        }
    }
}

/// Ordered collection of routes with first-match lookup.
///
/// Duplicate tags are kept as configured; only the first one is ever
/// consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// All entries in configured order
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// First entry whose tag equals `tag`
    pub fn find(&self, tag: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// Whether any entry matches `tag`
    pub fn contains(&self, tag: &str) -> bool {
        self.find(tag).is_some()
    }

    /// Distinct tags in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !tags.contains(&entry.tag.as_str()) {
                tags.push(&entry.tag);
            }
        }
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
