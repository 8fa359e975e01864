//! `WebDAV` wire formats for the `davclnt` client.
//!
//! Encodes PROPFIND request bodies and decodes multistatus responses.

pub mod rfc;
