//! Shared configuration and error types for the `davclnt` workspace.

pub mod config;
pub mod error;

pub use crate::config::{Settings, load_config};
pub use crate::error::{CoreError, CoreResult};
