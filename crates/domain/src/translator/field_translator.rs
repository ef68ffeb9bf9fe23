use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use super::converters::{
    BoolConverter, DoubleConverter, EnumConverter, FieldConverter, RichtextConverter,
    StringConverter, TimestampConverter,
};
use super::kind::FieldKind;
use crate::catalog::{CatalogTag, TagTemplate, TypedFieldValue};
use crate::error::Result;

/// Maps caller-supplied raw values onto the typed fields a template declares.
///
/// Dispatch is a lookup from [`FieldKind`] to a registered [`FieldConverter`].
/// Fields the template does not declare, and fields whose declared type has no
/// registered converter, are dropped with a warning. The first conversion
/// error aborts the whole translation.
#[derive(Debug)]
pub struct FieldValueTranslator {
    converters: HashMap<FieldKind, Box<dyn FieldConverter>>,
}

impl FieldValueTranslator {
    /// Translator with a converter for every known kind; enum values pass through
    pub fn new() -> Self {
        Self::with_enum_validation(false)
    }

    pub fn with_enum_validation(validate_enums: bool) -> Self {
        Self::empty()
            .register(FieldKind::Enum, EnumConverter::new(validate_enums))
            .register(FieldKind::Richtext, RichtextConverter)
            .register(FieldKind::Timestamp, TimestampConverter)
            .register(FieldKind::Bool, BoolConverter)
            .register(FieldKind::Double, DoubleConverter)
            .register(FieldKind::String, StringConverter)
    }

    /// Translator with no converters; every field is skipped until one is registered
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Register (or replace) the converter used for `kind`
    pub fn register(mut self, kind: FieldKind, converter: impl FieldConverter + 'static) -> Self {
        self.converters.insert(kind, Box::new(converter));
        self
    }

    pub fn translate(
        &self,
        template: &TagTemplate,
        raw_fields: &Map<String, Value>,
    ) -> Result<BTreeMap<String, TypedFieldValue>> {
        let mut typed = BTreeMap::new();

        for (field_id, raw) in raw_fields {
            let Some(declaration) = template.field(field_id) else {
                warn!(
                    "Field '{}' not found in template '{}'. Skipping.",
                    field_id, template.name
                );
                continue;
            };

            let converter = FieldKind::of(&declaration.field_type)
                .and_then(|kind| self.converters.get(&kind));
            let Some(converter) = converter else {
                warn!(
                    "Unsupported field type for '{}'. Type: {}. Skipping.",
                    field_id, declaration.field_type
                );
                continue;
            };

            debug!(
                "Processing field '{}' with type '{}' and value '{}'",
                field_id, declaration.field_type, raw
            );
            let value = converter.convert(field_id, declaration, raw)?;
            typed.insert(field_id.clone(), value);
        }

        Ok(typed)
    }

    /// Translate `raw_fields` and wrap them in a new tag referencing `template`
    pub fn build_tag(
        &self,
        template: &TagTemplate,
        raw_fields: &Map<String, Value>,
    ) -> Result<CatalogTag> {
        let fields = self.translate(template, raw_fields)?;
        let mut tag = CatalogTag::new(template.name.clone(), fields);
        tag.template_display_name = template.display_name.clone();
        Ok(tag)
    }
}

impl Default for FieldValueTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;
    use crate::catalog::{EnumType, PrimitiveType, TemplateField};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn governance_template() -> TagTemplate {
        TagTemplate::new("projects/p/locations/us/tagTemplates/table_data_governance")
            .with_field("notes", TemplateField::primitive(PrimitiveType::Richtext))
            .with_field("has_pii", TemplateField::primitive(PrimitiveType::Bool))
            .with_field(
                "retention_date",
                TemplateField::primitive(PrimitiveType::Timestamp),
            )
            .with_field(
                "data_classification",
                TemplateField::enumeration(EnumType::new(["Internal", "Public"])),
            )
    }

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_governance_scenario() {
        let input = raw(json!({
            "notes": "hi",
            "has_pii": false,
            "retention_date": "1/1/2027",
            "data_classification": "Internal",
            "unknown_field": "x"
        }));

        let fields = FieldValueTranslator::new()
            .translate(&governance_template(), &input)
            .unwrap();

        assert_eq!(fields.len(), 4);
        assert_eq!(
            fields["notes"],
            TypedFieldValue::Richtext("<p>hi</p>".to_string())
        );
        assert_eq!(fields["has_pii"], TypedFieldValue::Bool(false));
        assert_eq!(
            fields["retention_date"],
            TypedFieldValue::Timestamp(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            fields["data_classification"],
            TypedFieldValue::Enum("Internal".to_string())
        );
        assert!(!fields.contains_key("unknown_field"));
    }

    #[test]
    fn test_unknown_fields_are_dropped_not_errors() {
        // Misspelled relative to a "data_lifecycle" declaration
        let input = raw(json!({ "data_lifecyle": "Dev", "another": 1 }));
        let fields = FieldValueTranslator::new()
            .translate(&governance_template(), &input)
            .unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_unspecified_type_is_skipped() {
        let template = TagTemplate::new("t")
            .with_field("geo", TemplateField::primitive(PrimitiveType::Unspecified))
            .with_field("owner", TemplateField::primitive(PrimitiveType::String));
        let input = raw(json!({ "geo": "POINT(0 0)", "owner": "Bennie Haelen" }));

        let fields = FieldValueTranslator::new().translate(&template, &input).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields["owner"],
            TypedFieldValue::String("Bennie Haelen".to_string())
        );
    }

    #[test]
    fn test_kind_without_converter_is_skipped() {
        let translator = FieldValueTranslator::empty().register(FieldKind::Bool, BoolConverter);
        let input = raw(json!({ "notes": "hi", "has_pii": true }));

        let fields = translator.translate(&governance_template(), &input).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["has_pii"], TypedFieldValue::Bool(true));
    }

    #[test]
    fn test_bad_timestamp_aborts_translation() {
        let input = raw(json!({ "notes": "hi", "retention_date": "13/1/2027" }));
        let result = FieldValueTranslator::new().translate(&governance_template(), &input);
        assert!(matches!(result, Err(DomainError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_enum_validation_opt_in() {
        let input = raw(json!({ "data_classification": "Confidential" }));

        let passthrough = FieldValueTranslator::new()
            .translate(&governance_template(), &input)
            .unwrap();
        assert_eq!(
            passthrough["data_classification"],
            TypedFieldValue::Enum("Confidential".to_string())
        );

        let strict = FieldValueTranslator::with_enum_validation(true)
            .translate(&governance_template(), &input);
        assert!(matches!(strict, Err(DomainError::InvalidEnumValue { .. })));
    }

    #[test]
    fn test_build_tag_references_template() {
        let mut template = governance_template();
        template.display_name = Some("Table Data Governance".to_string());
        let input = raw(json!({ "has_pii": true }));

        let tag = FieldValueTranslator::new()
            .build_tag(&template, &input)
            .unwrap();

        assert_eq!(tag.template, template.name);
        assert_eq!(
            tag.template_display_name.as_deref(),
            Some("Table Data Governance")
        );
        assert_eq!(tag.name, None);
        assert_eq!(tag.field("has_pii"), Some(&TypedFieldValue::Bool(true)));
    }
}
