use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Service domain used by BigQuery-linked catalog entries
pub const BIGQUERY_SERVICE_DOMAIN: &str = "bigquery.googleapis.com";

/// Value object for a linked-resource identifier
///
/// Shape: `//<service-domain>/projects/<project>/datasets/<dataset>/tables/<table>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedResource(String);

impl LinkedResource {
    /// Build the identifier of a table living in `service_domain`
    pub fn table(service_domain: &str, project: &str, dataset: &str, table: &str) -> Result<Self> {
        for (label, segment) in [
            ("service domain", service_domain),
            ("project", project),
            ("dataset", dataset),
            ("table", table),
        ] {
            validate_segment(label, segment)?;
        }

        Ok(Self(format!(
            "//{service_domain}/projects/{project}/datasets/{dataset}/tables/{table}"
        )))
    }

    /// Build the identifier of a BigQuery table
    pub fn bigquery_table(project: &str, dataset: &str, table: &str) -> Result<Self> {
        Self::table(BIGQUERY_SERVICE_DOMAIN, project, dataset, table)
    }

    /// Accept an already-assembled identifier
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let rest = raw.strip_prefix("//").ok_or_else(|| {
            DomainError::InvalidResourceName(format!(
                "Linked resource '{raw}' must start with '//'"
            ))
        })?;

        if rest.is_empty() || rest.starts_with('/') {
            return Err(DomainError::InvalidResourceName(format!(
                "Linked resource '{raw}' is missing a service domain"
            )));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LinkedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value object for a tag template resource name
///
/// Shape: `projects/<project>/locations/<location>/tagTemplates/<template-id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateName {
    project: String,
    location: String,
    template_id: String,
}

impl TemplateName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Result<Self> {
        let name = Self {
            project: project.into(),
            location: location.into(),
            template_id: template_id.into(),
        };

        validate_segment("project", &name.project)?;
        validate_segment("location", &name.location)?;
        validate_segment("template id", &name.template_id)?;

        Ok(name)
    }

    /// Parse a full `projects/.../locations/.../tagTemplates/...` name
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split('/').collect();
        match parts.as_slice() {
            ["projects", project, "locations", location, "tagTemplates", template_id] => {
                Self::new(*project, *location, *template_id)
            }
            _ => Err(DomainError::InvalidResourceName(format!(
                "Tag template name '{raw}' must look like \
                 projects/<project>/locations/<location>/tagTemplates/<id>"
            ))),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/tagTemplates/{}",
            self.project, self.location, self.template_id
        )
    }
}

fn validate_segment(label: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(DomainError::InvalidResourceName(format!(
            "{label} cannot be empty"
        )));
    }
    if segment.contains('/') {
        return Err(DomainError::InvalidResourceName(format!(
            "{label} '{segment}' must not contain '/'"
        )));
    }
    Ok(())
}
