mod converters;
mod field_translator;
mod kind;

pub use converters::{
    BoolConverter, DoubleConverter, EnumConverter, FieldConverter, RichtextConverter,
    StringConverter, TIMESTAMP_FORMAT, TimestampConverter, scalar_text,
};
pub use field_translator::FieldValueTranslator;
pub use kind::FieldKind;
