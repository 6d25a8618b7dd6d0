//! Backstage catalog entity model.
//!
//! Typed per-kind structs, serialized with `serde_yaml`. Field declaration
//! order is the emission order, matching the descriptor format at
//! <https://backstage.io/docs/features/software-catalog/descriptor-format>.

use serde::Serialize;
use serde_yaml::Value;

/// `apiVersion` for Group and User entities.
pub const CATALOG_API_VERSION: &str = "backstage.io/v1alpha1";

/// `apiVersion` for scaffolder Template entities.
pub const SCAFFOLDER_API_VERSION: &str = "scaffolder.backstage.io/v1beta3";

// ---------------------------------------------------------------------------
// CatalogEntity
// ---------------------------------------------------------------------------

/// Any entity the generator can emit.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CatalogEntity {
    Group(GroupEntity),
    User(UserEntity),
    Template(TemplateEntity),
}

impl CatalogEntity {
    /// The entity's `metadata.name`.
    pub fn name(&self) -> &str {
        match self {
            Self::Group(e) => &e.metadata.name,
            Self::User(e) => &e.metadata.name,
            Self::Template(e) => &e.metadata.name,
        }
    }

    /// The entity's `kind`.
    pub fn kind(&self) -> &str {
        match self {
            Self::Group(e) => &e.kind,
            Self::User(e) => &e.kind,
            Self::Template(e) => &e.kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Shared `metadata` mapping. Optional fields are omitted when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<TemplateAnnotations>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<EntityLink>,
}

impl EntityMetadata {
    /// Minimal metadata carrying only a name (Group/User entities).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Fixed annotation set attached to generated Template entities.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateAnnotations {
    #[serde(rename = "github.com/project-slug")]
    pub project_slug: String,
    #[serde(rename = "awesome.azd/template")]
    pub template: String,
    #[serde(rename = "awesome.azd/author")]
    pub author: String,
}

/// A `metadata.links` entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntityLink {
    pub url: String,
    pub title: String,
    pub icon: String,
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// The service group all generated entities belong to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntity {
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMetadata,
    pub spec: GroupSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSpec {
    #[serde(rename = "type")]
    pub group_type: String,
    pub children: Vec<String>,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The service user account owning the generated entities.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMetadata,
    pub spec: UserSpec,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSpec {
    pub member_of: Vec<String>,
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A scaffolder Template entity generated from one gallery template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntity {
    pub api_version: String,
    pub kind: String,
    pub metadata: EntityMetadata,
    pub spec: TemplateSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSpec {
    pub owner: String,
    #[serde(rename = "type")]
    pub template_type: String,
    pub parameters: Vec<ParameterPage>,
    pub steps: Vec<TemplateStep>,
    /// The full `azure.yaml` manifest, embedded pass-through.
    pub azure: Value,
}

/// One page of the scaffolder's parameter form.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterPage {
    pub title: String,
    pub required: Vec<String>,
    pub properties: ParameterProperties,
}

/// The fixed property set of the deployment form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterProperties {
    pub name: ParameterProperty,
    pub subscription_id: ParameterProperty,
    pub location: ParameterProperty,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterProperty {
    pub title: String,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One scaffolder step. The generated step is descriptive only.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateStep {
    pub id: String,
    pub name: String,
    pub action: String,
    pub input: StepInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepInput {
    pub message: String,
}
