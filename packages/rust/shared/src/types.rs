//! Core domain types: the upstream template index and per-template manifests.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{BackstageifyError, Result};

// ---------------------------------------------------------------------------
// TemplateDescriptor
// ---------------------------------------------------------------------------

/// One entry of the upstream template index (`templates.json`).
///
/// Fields are taken verbatim from the index; unknown upstream fields are
/// ignored. A missing expected field fails the decode of the whole index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Human-readable template title.
    pub title: String,
    /// Short description shown in the gallery.
    pub description: String,
    /// Source repository URL (e.g. `https://github.com/Azure/todo-python-mongo`).
    pub source: String,
    /// Template website or documentation URL.
    pub website: String,
    /// Gallery author attribution.
    pub author: String,
    /// Ordered gallery tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Preview image path, relative to the gallery's static assets.
    pub preview: String,
}

impl TemplateDescriptor {
    /// The `org/repo` slug, i.e. the source URL without its GitHub prefix.
    pub fn project_slug(&self) -> &str {
        self.source
            .strip_prefix("https://github.com/")
            .unwrap_or(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// A template's `azure.yaml` manifest.
///
/// The structure is opaque pass-through beyond `name` and
/// `metadata.template`; the full mapping is embedded unchanged into the
/// generated Template entity. Backed by [`serde_yaml::Mapping`], which
/// preserves key insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(pub serde_yaml::Mapping);

impl Manifest {
    /// Parse a manifest from raw YAML text.
    pub fn parse(text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| BackstageifyError::decode(format!("azure.yaml: {e}")))
    }

    /// The manifest's `name` field.
    pub fn name(&self) -> Result<&str> {
        self.str_at(&["name"])
    }

    /// The manifest's `metadata.template` field (the azd template id).
    pub fn template_id(&self) -> Result<&str> {
        self.str_at(&["metadata", "template"])
    }

    /// The full manifest as a YAML value, for embedding into an entity.
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.0.clone())
    }

    fn str_at(&self, path: &[&str]) -> Result<&str> {
        self.value_at(path)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                BackstageifyError::manifest(format!(
                    "missing or non-string `{}`",
                    path.join(".")
                ))
            })
    }

    fn value_at(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.as_mapping()?.get(*key)?;
        }
        Some(current)
    }
}
