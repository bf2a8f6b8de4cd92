//! Tag router
//!
//! First-match lookup: the first entry whose tag equals the input tag
//! supplies the destinations; later entries with the same tag are ignored.

use contracts::{DestinationRef, RoutingTable};

/// Resolve the ordered destinations for `tag`.
///
/// Returns an empty slice when no entry matches, which cannot happen for
/// an input that passed validation.
pub fn resolve<'a>(table: &'a RoutingTable, tag: &str) -> &'a [DestinationRef] {
    table
        .find(tag)
        .map(|entry| entry.destinations.as_slice())
        .unwrap_or(&[])
}
