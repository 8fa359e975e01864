//! `WebDAV` property-discovery types.
//!
//! This module defines the request and response types exchanged in a
//! PROPFIND round trip.

mod depth;
mod multistatus;
mod propfind;

pub use depth::{Depth, InvalidDepth};
pub use multistatus::{Multistatus, PropertySet, ResourceEntry};
pub use propfind::{PropfindRequest, PropfindType};

/// `DAV:` namespace URI.
pub const DAV_NS: &str = "DAV:";
