use crate::catalog::{FieldType, PrimitiveType};

/// Conversion-strategy key derived from a field's declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Enum,
    Richtext,
    Timestamp,
    Bool,
    Double,
    String,
}

impl FieldKind {
    /// Strategy key for a declaration, `None` when the declared type has no kind
    pub fn of(field_type: &FieldType) -> Option<Self> {
        match field_type {
            FieldType::Enum(_) => Some(Self::Enum),
            FieldType::Primitive(p) => match p {
                PrimitiveType::Richtext => Some(Self::Richtext),
                PrimitiveType::Timestamp => Some(Self::Timestamp),
                PrimitiveType::Bool => Some(Self::Bool),
                PrimitiveType::Double => Some(Self::Double),
                PrimitiveType::String => Some(Self::String),
                PrimitiveType::Unspecified => None,
            },
        }
    }
}
