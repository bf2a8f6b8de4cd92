//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Data flow
//! - `InputUnit` enters through the HTTP ingress
//! - `RoutingTable` maps its tag to an ordered list of `DestinationRef`
//! - a `DestinationWriter` delivers the payload to each destination

mod config;
mod destination;
mod error;
mod input;
mod outcome;
mod routing;
mod writer;

pub use config::*;
pub use destination::DestinationRef;
pub use error::*;
pub use input::InputUnit;
pub use outcome::DispatchOutcome;
pub use routing::{RouteEntry, RoutingTable};
pub use writer::{DestinationWriter, LocalDestinationWriter};
