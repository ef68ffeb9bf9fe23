use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Attach governance tags to catalog entries", long_about = None)]
pub struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// JSON file with field values (overrides [fields] from the config)
    #[arg(long)]
    pub fields: Option<String>,

    /// Single field value as key=value; the value is read as JSON when it parses
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Override target project
    #[arg(long)]
    pub project: Option<String>,

    /// Override target dataset
    #[arg(long)]
    pub dataset: Option<String>,

    /// Override target table
    #[arg(long)]
    pub table: Option<String>,

    /// Override tag template id
    #[arg(long)]
    pub template_id: Option<String>,

    /// Reject enum values the template does not permit before submitting
    #[arg(long)]
    pub validate_enums: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Resolve the target table's catalog entry
    Lookup,
    /// Show the tag template and its fields
    Template,
    /// Build the tag without submitting it
    Preview,
    /// Create the tag on the target table
    Apply,
}
