//! Input validation
//!
//! Checked in order, stopping at the first failure:
//! 1. tag is non-empty
//! 2. tag has a route
//! 3. payload is non-empty

use contracts::{InputUnit, RoutingTable, ValidationError};

/// Validate an input against the routing table. Pure.
pub fn validate(input: &InputUnit, table: &RoutingTable) -> Result<(), ValidationError> {
    if input.tag.is_empty() {
        return Err(ValidationError::EmptyTag);
    }
    if !table.contains(&input.tag) {
        return Err(ValidationError::UnknownTag {
            tag: input.tag.clone(),
        });
    }
    if input.payload.is_empty() {
        return Err(ValidationError::EmptyPayload);
    }
    Ok(())
}
