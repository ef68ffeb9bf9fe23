//! Application layer - Tagging workflows over the metadata catalog

pub mod tag;

pub use tag::TagManager;
