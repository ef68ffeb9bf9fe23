use chrono::NaiveDate;
use serde_json::Value;
use std::fmt::Debug;

use crate::catalog::{FieldType, TemplateField, TypedFieldValue};
use crate::error::{DomainError, Result};

/// Month/day/year, e.g. `1/1/2027`
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y";

/// Strategy converting one raw value into the typed value of a declared kind
pub trait FieldConverter: Send + Sync + Debug {
    fn convert(
        &self,
        field_id: &str,
        declaration: &TemplateField,
        raw: &Value,
    ) -> Result<TypedFieldValue>;
}

/// Text form of a raw scalar (strings are taken verbatim)
pub fn scalar_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct EnumConverter {
    validate: bool,
}

impl EnumConverter {
    /// `validate` rejects display names the template does not permit
    pub fn new(validate: bool) -> Self {
        Self { validate }
    }
}

impl FieldConverter for EnumConverter {
    fn convert(
        &self,
        field_id: &str,
        declaration: &TemplateField,
        raw: &Value,
    ) -> Result<TypedFieldValue> {
        let display_name = scalar_text(raw);

        if self.validate {
            if let FieldType::Enum(allowed) = &declaration.field_type {
                if !allowed.permits(&display_name) {
                    return Err(DomainError::InvalidEnumValue {
                        field: field_id.to_string(),
                        value: display_name,
                        allowed: allowed.allowed_values.clone(),
                    });
                }
            }
        }

        Ok(TypedFieldValue::Enum(display_name))
    }
}

/// Wraps the value in a paragraph, even when it already carries markup
#[derive(Debug, Default)]
pub struct RichtextConverter;

impl FieldConverter for RichtextConverter {
    fn convert(&self, _: &str, _: &TemplateField, raw: &Value) -> Result<TypedFieldValue> {
        Ok(TypedFieldValue::Richtext(format!(
            "<p>{}</p>",
            scalar_text(raw)
        )))
    }
}

#[derive(Debug, Default)]
pub struct TimestampConverter;

/// Digits only: 1-2 for month, 1-2 for day, exactly 4 for year.
/// chrono alone would accept signs, padding and short years.
fn has_month_day_year_shape(text: &str) -> bool {
    let segments: Vec<&str> = text.split('/').collect();
    let [month, day, year] = segments.as_slice() else {
        return false;
    };

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    digits(*month, 1, 2) && digits(*day, 1, 2) && digits(*year, 4, 4)
}

impl FieldConverter for TimestampConverter {
    fn convert(&self, field_id: &str, _: &TemplateField, raw: &Value) -> Result<TypedFieldValue> {
        let text = raw.as_str().ok_or_else(|| DomainError::InvalidTimestamp {
            field: field_id.to_string(),
            value: raw.to_string(),
            reason: "value is not a string".to_string(),
        })?;

        let invalid = |reason: String| DomainError::InvalidTimestamp {
            field: field_id.to_string(),
            value: text.to_string(),
            reason,
        };

        if !has_month_day_year_shape(text) {
            return Err(invalid(
                "expected M/D/YYYY with one or two digit month and day and a four digit year"
                    .to_string(),
            ));
        }

        let date =
            NaiveDate::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|e| invalid(e.to_string()))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| invalid("date has no midnight".to_string()))?;

        Ok(TypedFieldValue::Timestamp(midnight.and_utc()))
    }
}

#[derive(Debug, Default)]
pub struct BoolConverter;

impl BoolConverter {
    fn parse_text(text: &str) -> Option<bool> {
        match text.replace('\u{200b}', "").trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "1.0" => Some(true),
            "false" | "no" | "n" | "0" | "0.0" | "nan" => Some(false),
            _ => None,
        }
    }
}

impl FieldConverter for BoolConverter {
    fn convert(&self, field_id: &str, _: &TemplateField, raw: &Value) -> Result<TypedFieldValue> {
        let value = match raw {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => Self::parse_text(s),
            Value::Null => Some(false),
            _ => None,
        };

        value
            .map(TypedFieldValue::Bool)
            .ok_or_else(|| DomainError::InvalidBoolean {
                field: field_id.to_string(),
                value: raw.to_string(),
            })
    }
}

/// Used for both single- and double-precision declarations
#[derive(Debug, Default)]
pub struct DoubleConverter;

impl FieldConverter for DoubleConverter {
    fn convert(&self, field_id: &str, _: &TemplateField, raw: &Value) -> Result<TypedFieldValue> {
        let value = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };

        // NaN and infinities have no JSON encoding
        value
            .filter(|f| f.is_finite())
            .map(TypedFieldValue::Double)
            .ok_or_else(|| DomainError::InvalidNumber {
                field: field_id.to_string(),
                value: raw.to_string(),
            })
    }
}

#[derive(Debug, Default)]
pub struct StringConverter;

impl FieldConverter for StringConverter {
    fn convert(&self, _: &str, _: &TemplateField, raw: &Value) -> Result<TypedFieldValue> {
        Ok(TypedFieldValue::String(scalar_text(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EnumType, PrimitiveType};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn decl(p: PrimitiveType) -> TemplateField {
        TemplateField::primitive(p)
    }

    #[test]
    fn test_richtext_wraps_plain_text() {
        let out = RichtextConverter
            .convert("notes", &decl(PrimitiveType::Richtext), &json!("hi"))
            .unwrap();
        assert_eq!(out, TypedFieldValue::Richtext("<p>hi</p>".to_string()));
    }

    #[test]
    fn test_richtext_double_wraps_markup() {
        let out = RichtextConverter
            .convert(
                "notes",
                &decl(PrimitiveType::Richtext),
                &json!("<p>this is a set of notes</p>"),
            )
            .unwrap();
        assert_eq!(
            out,
            TypedFieldValue::Richtext("<p><p>this is a set of notes</p></p>".to_string())
        );
    }

    #[test]
    fn test_timestamp_month_day_year() {
        let out = TimestampConverter
            .convert("retention_date", &decl(PrimitiveType::Timestamp), &json!("1/1/2027"))
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(out, TypedFieldValue::Timestamp(expected));
    }

    #[test]
    fn test_timestamp_zero_padded() {
        let out = TimestampConverter
            .convert("d", &decl(PrimitiveType::Timestamp), &json!("12/31/2030"))
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2030, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(out, TypedFieldValue::Timestamp(expected));
    }

    #[test]
    fn test_timestamp_invalid_month() {
        let err = TimestampConverter
            .convert("retention_date", &decl(PrimitiveType::Timestamp), &json!("13/1/2027"))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimestamp { ref field, .. } if field == "retention_date"));
    }

    #[test]
    fn test_timestamp_rejects_iso_format() {
        let result =
            TimestampConverter.convert("d", &decl(PrimitiveType::Timestamp), &json!("2027-01-01"));
        assert!(matches!(result, Err(DomainError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_timestamp_rejects_alternate_shapes() {
        let d = decl(PrimitiveType::Timestamp);
        for text in [
            "1/1/27",
            "1/1/+2027",
            " 1/1/2027",
            "1/ 1/2027",
            "1/1/2027 ",
            "001/1/2027",
            "1/1/20270",
            "1/1",
            "1/1/2027/1",
        ] {
            let result = TimestampConverter.convert("retention_date", &d, &json!(text));
            assert!(
                matches!(result, Err(DomainError::InvalidTimestamp { .. })),
                "'{text}' should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_timestamp_rejects_non_string() {
        let result =
            TimestampConverter.convert("d", &decl(PrimitiveType::Timestamp), &json!(20270101));
        assert!(matches!(result, Err(DomainError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_bool_native_and_numeric() {
        let d = decl(PrimitiveType::Bool);
        for (raw, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!(false), false),
            (json!(0), false),
        ] {
            assert_eq!(
                BoolConverter.convert("has_pii", &d, &raw).unwrap(),
                TypedFieldValue::Bool(expected),
                "raw value {raw}"
            );
        }
    }

    #[test]
    fn test_bool_text_mapping() {
        let d = decl(PrimitiveType::Bool);
        assert_eq!(
            BoolConverter.convert("f", &d, &json!("True")).unwrap(),
            TypedFieldValue::Bool(true)
        );
        assert_eq!(
            BoolConverter.convert("f", &d, &json!(" no ")).unwrap(),
            TypedFieldValue::Bool(false)
        );
        assert!(matches!(
            BoolConverter.convert("f", &d, &json!("maybe")),
            Err(DomainError::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn test_double_from_integer_and_string() {
        let d = decl(PrimitiveType::Double);
        assert_eq!(
            DoubleConverter.convert("n", &d, &json!(3)).unwrap(),
            TypedFieldValue::Double(3.0)
        );
        assert_eq!(
            DoubleConverter.convert("n", &d, &json!("3")).unwrap(),
            TypedFieldValue::Double(3.0)
        );
    }

    #[test]
    fn test_double_rejects_text() {
        let err = DoubleConverter
            .convert("n", &decl(PrimitiveType::Double), &json!("three"))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidNumber {
                field: "n".to_string(),
                value: "\"three\"".to_string()
            }
        );
    }

    #[test]
    fn test_double_rejects_non_finite() {
        let d = decl(PrimitiveType::Double);
        for text in ["NaN", "inf", "-infinity"] {
            assert!(
                matches!(
                    DoubleConverter.convert("n", &d, &json!(text)),
                    Err(DomainError::InvalidNumber { .. })
                ),
                "'{text}' should be rejected"
            );
        }
    }

    #[test]
    fn test_string_text_forms() {
        let d = decl(PrimitiveType::String);
        assert_eq!(
            StringConverter.convert("s", &d, &json!("Bennie")).unwrap(),
            TypedFieldValue::String("Bennie".to_string())
        );
        assert_eq!(
            StringConverter.convert("s", &d, &json!(42)).unwrap(),
            TypedFieldValue::String("42".to_string())
        );
    }

    #[test]
    fn test_enum_passthrough_without_validation() {
        let d = TemplateField::enumeration(EnumType::new(["Internal", "Public"]));
        assert_eq!(
            EnumConverter::new(false)
                .convert("c", &d, &json!("Secret"))
                .unwrap(),
            TypedFieldValue::Enum("Secret".to_string())
        );
    }

    #[test]
    fn test_enum_validation() {
        let d = TemplateField::enumeration(EnumType::new(["Internal", "Public"]));
        let converter = EnumConverter::new(true);

        assert_eq!(
            converter.convert("c", &d, &json!("Public")).unwrap(),
            TypedFieldValue::Enum("Public".to_string())
        );
        assert!(matches!(
            converter.convert("c", &d, &json!("Secret")),
            Err(DomainError::InvalidEnumValue { .. })
        ));
    }
}
