//! Command-line front end for attaching governance tags to catalog entries

pub mod cli;
pub mod commands;
pub mod fields;

pub use cli::{Args, Command};
