//! Depth header values.

use std::fmt;

use thiserror::Error;

/// `WebDAV` Depth header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    /// Depth: 0 - The resource itself only.
    Zero,
    /// Depth: 1 - The resource and its immediate children.
    #[default]
    One,
    /// Depth: infinity - The resource and all descendants.
    Infinity,
}

impl Depth {
    /// Returns the header value string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Infinity => "infinity",
        }
    }
}

/// A Depth value other than `0`, `1` or `infinity`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid depth: {0} (expected 0, 1 or infinity)")]
pub struct InvalidDepth(pub String);

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Depth {
    type Err = InvalidDepth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" => Ok(Self::Zero),
            "1" => Ok(Self::One),
            "infinity" => Ok(Self::Infinity),
            _ => Err(InvalidDepth(s.to_owned())),
        }
    }
}
