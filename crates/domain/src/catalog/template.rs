use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primitive kinds a template field can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimitiveType {
    /// Double-precision number, also used for single-precision declarations
    Double,
    /// Plain text
    String,
    Bool,
    Timestamp,
    /// HTML-formatted text
    Richtext,
    /// Anything the service reports that this client does not know
    #[serde(other)]
    Unspecified,
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Bool => "BOOL",
            Self::Timestamp => "TIMESTAMP",
            Self::Richtext => "RICHTEXT",
            Self::Unspecified => "PRIMITIVE_TYPE_UNSPECIFIED",
        };
        write!(f, "{s}")
    }
}

/// Closed set of display names an enum field accepts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnumType {
    pub allowed_values: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permits(&self, display_name: &str) -> bool {
        self.allowed_values.iter().any(|v| v == display_name)
    }
}

/// Declared type of a template field: exactly one primitive or one enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Primitive(PrimitiveType),
    Enum(EnumType),
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Enum(e) => write!(f, "ENUM[{}]", e.allowed_values.join(", ")),
        }
    }
}

/// A field declaration inside a tag template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub field_type: FieldType,
    pub is_required: bool,
    pub order: i32,
}

impl TemplateField {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            display_name: None,
            description: None,
            field_type,
            is_required: false,
            order: 0,
        }
    }

    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::new(FieldType::Primitive(primitive))
    }

    pub fn enumeration(allowed: EnumType) -> Self {
        Self::new(FieldType::Enum(allowed))
    }
}

/// Schema of named, typed fields a tag must conform to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagTemplate {
    pub name: String,
    pub display_name: Option<String>,
    pub is_publicly_readable: bool,
    pub fields: BTreeMap<String, TemplateField>,
}

impl TagTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            is_publicly_readable: false,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, id: impl Into<String>, field: TemplateField) -> Self {
        self.fields.insert(id.into(), field);
        self
    }

    pub fn field(&self, id: &str) -> Option<&TemplateField> {
        self.fields.get(id)
    }

    /// Field ids in the order the template declares them (by `order`, then id)
    pub fn ordered_field_ids(&self) -> Vec<&str> {
        let mut ids: Vec<(&String, &TemplateField)> = self.fields.iter().collect();
        ids.sort_by(|a, b| b.1.order.cmp(&a.1.order).then_with(|| a.0.cmp(b.0)));
        ids.into_iter().map(|(id, _)| id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_type_serialization() {
        let json = serde_json::to_string(&PrimitiveType::Richtext).unwrap();
        assert_eq!(json, "\"RICHTEXT\"");

        let parsed: PrimitiveType = serde_json::from_str("\"BOOL\"").unwrap();
        assert_eq!(parsed, PrimitiveType::Bool);
    }

    #[test]
    fn test_unknown_primitive_type_is_unspecified() {
        let parsed: PrimitiveType = serde_json::from_str("\"PRIMITIVE_TYPE_UNSPECIFIED\"").unwrap();
        assert_eq!(parsed, PrimitiveType::Unspecified);

        let parsed: PrimitiveType = serde_json::from_str("\"GEOGRAPHY\"").unwrap();
        assert_eq!(parsed, PrimitiveType::Unspecified);
    }

    #[test]
    fn test_enum_permits() {
        let e = EnumType::new(["Internal", "Public"]);
        assert!(e.permits("Internal"));
        assert!(!e.permits("internal"));
    }

    #[test]
    fn test_ordered_field_ids() {
        let mut notes = TemplateField::primitive(PrimitiveType::Richtext);
        notes.order = 1;
        let mut owner = TemplateField::primitive(PrimitiveType::String);
        owner.order = 5;

        let template = TagTemplate::new("t")
            .with_field("notes", notes)
            .with_field("business_owner", owner)
            .with_field("has_pii", TemplateField::primitive(PrimitiveType::Bool));

        // Higher order values are displayed first
        assert_eq!(
            template.ordered_field_ids(),
            vec!["business_owner", "notes", "has_pii"]
        );
    }

    #[test]
    fn test_field_type_display() {
        let t = FieldType::Enum(EnumType::new(["A", "B"]));
        assert_eq!(t.to_string(), "ENUM[A, B]");
        assert_eq!(
            FieldType::Primitive(PrimitiveType::Timestamp).to_string(),
            "TIMESTAMP"
        );
    }
}
