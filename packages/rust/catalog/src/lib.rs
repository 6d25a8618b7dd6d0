//! Backstage catalog generation: entity model, sanitizers, assembly, and
//! the multi-document YAML writer.

pub mod builder;
pub mod entity;
pub mod sanitize;
pub mod writer;

pub use builder::{build_entities, group_entity, template_entity, user_entity};
pub use entity::{CatalogEntity, EntityLink, EntityMetadata, TemplateAnnotations};
pub use sanitize::{clean_tag, normalize_entity_name};
pub use writer::{CatalogWriter, WriteResult, render_stream};
