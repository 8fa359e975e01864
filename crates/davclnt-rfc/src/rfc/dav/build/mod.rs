//! `WebDAV` XML serialization.

pub mod propfind;

pub use propfind::serialize_propfind;
