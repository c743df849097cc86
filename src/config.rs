//! Fetch definition files
//!
//! A fetch definition bundles the first request of a run with its
//! pagination settings, so a complete fetch can be described in one
//! YAML or JSON document and replayed from the command line.

use crate::error::{Error, Result};
use crate::pagination::PaginationConfig;
use crate::request::RequestDescriptor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

// ============================================================================
// Fetch Definition
// ============================================================================

/// Complete description of a paginated fetch, loaded from YAML or JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchDefinition {
    /// The request that opens the run
    pub request: RequestDescriptor,

    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl FetchDefinition {
    /// Load a definition from a file path
    ///
    /// Files ending in `.json` are parsed as JSON; everything else is
    /// treated as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a definition from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let definition: Self = serde_yaml::from_str(yaml)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Parse a definition from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Check that the definition can actually be executed
    pub fn validate(&self) -> Result<()> {
        if self.request.url.is_empty() {
            return Err(Error::config("Request url cannot be empty"));
        }
        Url::parse(&self.request.url)?;
        Ok(())
    }
}
