//! `WebDAV` (RFC 4918) property discovery.

pub mod build;
pub mod core;
pub mod parse;
