//! FieldName - Where a Continuation Is Attached
//!
//! Producers expose their continuation under a named attribute. Most use the
//! conventional `children`, some use `render`, and anything else is carried
//! verbatim as a custom name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The attribute name under which a continuation is attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldName {
    /// `children` - the conventional name.
    #[default]
    Children,
    /// `render`
    Render,
    /// Any other attribute name.
    Custom(String),
}

impl FieldName {
    pub const CHILDREN: &'static str = "children";
    pub const RENDER: &'static str = "render";

    /// Build a custom field name. Known names are normalised to their variants.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldName::Children => Self::CHILDREN,
            FieldName::Render => Self::RENDER,
            FieldName::Custom(name) => name,
        }
    }

    /// True for the closed set of conventional names.
    pub fn is_conventional(&self) -> bool {
        !matches!(self, FieldName::Custom(_))
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        match name.as_str() {
            Self::CHILDREN => FieldName::Children,
            Self::RENDER => FieldName::Render,
            _ => FieldName::Custom(name),
        }
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<FieldName> for String {
    fn from(field: FieldName) -> Self {
        match field {
            FieldName::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
