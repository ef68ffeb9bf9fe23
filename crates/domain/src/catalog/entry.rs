use serde::{Deserialize, Serialize};

/// One column of a catalog entry's schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub column: String,
    pub column_type: String,
    pub mode: Option<String>,
    pub description: Option<String>,
}

/// Catalog record describing a governed data asset, resolved from a linked resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Full resource name, the parent of any tag attached to this entry
    pub name: String,
    pub linked_resource: Option<String>,
    pub fully_qualified_name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub entry_type: Option<String>,
    pub columns: Vec<ColumnSchema>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            linked_resource: None,
            fully_qualified_name: None,
            display_name: None,
            description: None,
            entry_type: None,
            columns: Vec::new(),
        }
    }
}
