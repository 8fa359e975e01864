//! Asynchronous `WebDAV` client.
//!
//! Property discovery (`PROPFIND`) is decoded into per-resource property
//! maps keyed by path relative to the configured root folder. The other
//! verbs are thin wrappers around a single authenticated request.

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod request;

pub use crate::client::DavClient;
pub use crate::config::{ClientConfig, ClientConfigBuilder, Credentials};
pub use crate::error::{ClientError, ClientResult};
pub use crate::normalize::{PropertyMap, PropertyNameMap};
pub use davclnt_rfc::rfc::dav::core::{Depth, Multistatus, PropertySet, PropfindRequest, ResourceEntry};
