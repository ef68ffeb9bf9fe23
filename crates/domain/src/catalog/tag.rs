use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Template-conformant value for a single tag field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedFieldValue {
    Richtext(String),
    Bool(bool),
    Double(f64),
    /// Display name of the selected enum value
    Enum(String),
    Timestamp(DateTime<Utc>),
    String(String),
}

impl std::fmt::Display for TypedFieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Richtext(s) | Self::Enum(s) | Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

/// A populated instance of a tag template, attached to one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTag {
    /// Server-assigned name, present once the tag has been created
    pub name: Option<String>,
    /// Resource name of the template the tag conforms to
    pub template: String,
    pub template_display_name: Option<String>,
    pub fields: BTreeMap<String, TypedFieldValue>,
}

impl CatalogTag {
    pub fn new(template: impl Into<String>, fields: BTreeMap<String, TypedFieldValue>) -> Self {
        Self {
            name: None,
            template: template.into(),
            template_display_name: None,
            fields,
        }
    }

    pub fn field(&self, id: &str) -> Option<&TypedFieldValue> {
        self.fields.get(id)
    }
}
