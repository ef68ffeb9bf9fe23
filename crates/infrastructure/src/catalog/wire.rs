//! JSON shapes of the Data Catalog v1 REST API and their domain conversions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use domain::catalog::{ColumnSchema, EnumType};
use domain::{
    CatalogEntry, CatalogTag, DomainError, FieldType, PrimitiveType, TagTemplate, TemplateField,
    TypedFieldValue,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    pub name: String,
    #[serde(default)]
    pub linked_resource: Option<String>,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDto {
    #[serde(default)]
    pub columns: Vec<ColumnDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDto {
    pub column: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<EntryDto> for CatalogEntry {
    fn from(dto: EntryDto) -> Self {
        let columns = dto
            .schema
            .unwrap_or_default()
            .columns
            .into_iter()
            .map(|c| ColumnSchema {
                column: c.column,
                column_type: c.column_type,
                mode: c.mode,
                description: c.description,
            })
            .collect();

        Self {
            name: dto.name,
            linked_resource: dto.linked_resource,
            fully_qualified_name: dto.fully_qualified_name,
            display_name: dto.display_name,
            description: dto.description,
            entry_type: dto.entry_type,
            columns,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagTemplateDto {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_publicly_readable: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, TemplateFieldDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFieldDto {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldTypeDto,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeDto {
    #[serde(default)]
    pub primitive_type: Option<PrimitiveType>,
    #[serde(default)]
    pub enum_type: Option<EnumTypeDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumTypeDto {
    #[serde(default)]
    pub allowed_values: Vec<EnumValueDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDto {
    pub display_name: String,
}

impl From<FieldTypeDto> for FieldType {
    /// A declaration carrying both kinds resolves RICHTEXT and TIMESTAMP to the
    /// primitive and everything else to the enum.
    fn from(dto: FieldTypeDto) -> Self {
        match (dto.primitive_type, dto.enum_type) {
            (Some(p @ (PrimitiveType::Richtext | PrimitiveType::Timestamp)), _) => {
                FieldType::Primitive(p)
            }
            (_, Some(e)) => FieldType::Enum(EnumType::new(
                e.allowed_values.into_iter().map(|v| v.display_name),
            )),
            (Some(p), None) => FieldType::Primitive(p),
            (None, None) => FieldType::Primitive(PrimitiveType::Unspecified),
        }
    }
}

impl From<TagTemplateDto> for TagTemplate {
    fn from(dto: TagTemplateDto) -> Self {
        let fields = dto
            .fields
            .into_iter()
            .map(|(id, f)| {
                let field = TemplateField {
                    display_name: f.display_name,
                    description: f.description,
                    field_type: f.field_type.into(),
                    is_required: f.is_required,
                    order: f.order,
                };
                (id, field)
            })
            .collect();

        Self {
            name: dto.name,
            display_name: dto.display_name,
            is_publicly_readable: dto.is_publicly_readable,
            fields,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagFieldDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_value: Option<EnumValueDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub richtext_value: Option<String>,
}

impl From<&TypedFieldValue> for TagFieldDto {
    fn from(value: &TypedFieldValue) -> Self {
        let mut dto = Self::default();
        match value {
            TypedFieldValue::Richtext(s) => dto.richtext_value = Some(s.clone()),
            TypedFieldValue::Bool(b) => dto.bool_value = Some(*b),
            TypedFieldValue::Double(d) => dto.double_value = Some(*d),
            TypedFieldValue::Enum(name) => {
                dto.enum_value = Some(EnumValueDto {
                    display_name: name.clone(),
                })
            }
            TypedFieldValue::Timestamp(ts) => dto.timestamp_value = Some(*ts),
            TypedFieldValue::String(s) => dto.string_value = Some(s.clone()),
        }
        dto
    }
}

impl TagFieldDto {
    fn into_value(self) -> Option<TypedFieldValue> {
        if let Some(s) = self.richtext_value {
            Some(TypedFieldValue::Richtext(s))
        } else if let Some(ts) = self.timestamp_value {
            Some(TypedFieldValue::Timestamp(ts))
        } else if let Some(e) = self.enum_value {
            Some(TypedFieldValue::Enum(e.display_name))
        } else if let Some(b) = self.bool_value {
            Some(TypedFieldValue::Bool(b))
        } else if let Some(d) = self.double_value {
            Some(TypedFieldValue::Double(d))
        } else {
            self.string_value.map(TypedFieldValue::String)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_display_name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, TagFieldDto>,
}

impl From<&CatalogTag> for TagDto {
    fn from(tag: &CatalogTag) -> Self {
        Self {
            // Output-only on the service side
            name: None,
            template: tag.template.clone(),
            template_display_name: None,
            fields: tag
                .fields
                .iter()
                .map(|(id, value)| (id.clone(), TagFieldDto::from(value)))
                .collect(),
        }
    }
}

impl From<TagDto> for CatalogTag {
    fn from(dto: TagDto) -> Self {
        let mut fields = BTreeMap::new();
        for (id, field) in dto.fields {
            match field.into_value() {
                Some(value) => {
                    fields.insert(id, value);
                }
                None => warn!("Tag field '{}' returned without a value. Skipping.", id),
            }
        }

        Self {
            name: dto.name,
            template: dto.template,
            template_display_name: dto.template_display_name,
            fields,
        }
    }
}

/// `{"error": {"code": ..., "message": ..., "status": ...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDto {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Map a non-success HTTP response onto the domain error taxonomy
pub fn error_from_response(status: u16, body: &str) -> DomainError {
    let message = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.chars().take(200).collect(),
    };

    match status {
        400 => DomainError::InvalidArgument(message),
        401 | 403 => DomainError::PermissionDenied(message),
        404 => DomainError::NotFound(message),
        409 => DomainError::AlreadyExists(message),
        _ => DomainError::Remote { status, message },
    }
}
