//! PROPFIND request types.

use super::depth::Depth;

/// A PROPFIND request.
#[derive(Debug, Clone, Default)]
pub struct PropfindRequest {
    /// The type of PROPFIND.
    pub propfind_type: PropfindType,
    /// Value sent in the `Depth` header.
    pub depth: Depth,
}

impl PropfindRequest {
    /// Creates an allprop request.
    #[must_use]
    pub fn allprop() -> Self {
        Self {
            propfind_type: PropfindType::AllProp,
            depth: Depth::default(),
        }
    }

    /// Creates a propname request.
    #[must_use]
    pub fn propname() -> Self {
        Self {
            propfind_type: PropfindType::PropName,
            depth: Depth::default(),
        }
    }

    /// Creates a prop request for the given property names, in order.
    #[must_use]
    pub fn prop<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            propfind_type: PropfindType::Prop(names.into_iter().map(Into::into).collect()),
            depth: Depth::default(),
        }
    }

    /// Overrides the `Depth` header value.
    #[must_use]
    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// Returns whether this is an allprop request.
    #[must_use]
    pub fn is_allprop(&self) -> bool {
        matches!(self.propfind_type, PropfindType::AllProp)
    }

    /// Returns whether this is a propname request.
    #[must_use]
    pub fn is_propname(&self) -> bool {
        matches!(self.propfind_type, PropfindType::PropName)
    }

    /// Returns the requested properties for a prop request.
    #[must_use]
    pub fn requested_properties(&self) -> Option<&[String]> {
        match &self.propfind_type {
            PropfindType::Prop(props) => Some(props),
            _ => None,
        }
    }
}

/// The type of PROPFIND request.
///
/// Property names are local names in the `DAV:` namespace. They are
/// written into the body verbatim.
#[derive(Debug, Clone, Default)]
pub enum PropfindType {
    /// Request all defined properties.
    #[default]
    AllProp,
    /// Request only property names (no values).
    PropName,
    /// Request specific properties.
    Prop(Vec<String>),
}
