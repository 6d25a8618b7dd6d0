//! Entity assembly: (descriptor, manifest) pairs into catalog entities.

use backstageify_shared::{Manifest, Result, TemplateDescriptor};

use crate::entity::{
    CATALOG_API_VERSION, CatalogEntity, EntityLink, EntityMetadata, GroupEntity, GroupSpec,
    ParameterPage, ParameterProperties, ParameterProperty, SCAFFOLDER_API_VERSION, StepInput,
    TemplateAnnotations, TemplateEntity, TemplateSpec, TemplateStep, UserEntity, UserSpec,
};
use crate::sanitize::{clean_tag, normalize_entity_name};

/// Base URL of the gallery's static assets, where preview images live.
const PREVIEW_BASE_URL: &str = "https://github.com/Azure/awesome-azd/website/static";

/// The group entity all generated templates are owned by.
pub fn group_entity(namespace: &str) -> CatalogEntity {
    CatalogEntity::Group(GroupEntity {
        api_version: CATALOG_API_VERSION.into(),
        kind: "Group".into(),
        metadata: EntityMetadata::named(namespace),
        spec: GroupSpec {
            group_type: "product-area".into(),
            children: vec![],
        },
    })
}

/// The service user account, a member of the group.
pub fn user_entity(namespace: &str) -> CatalogEntity {
    CatalogEntity::User(UserEntity {
        api_version: CATALOG_API_VERSION.into(),
        kind: "User".into(),
        metadata: EntityMetadata::named(namespace),
        spec: UserSpec {
            member_of: vec![namespace.into()],
        },
    })
}

/// Build the Template entity for one (descriptor, manifest) pair.
///
/// `metadata.name` is taken verbatim from the manifest's `name` field; tags
/// are passed through [`clean_tag`]. Fails when the manifest lacks `name`
/// or `metadata.template`.
pub fn template_entity(
    namespace: &str,
    descriptor: &TemplateDescriptor,
    manifest: &Manifest,
) -> Result<CatalogEntity> {
    let name = manifest.name()?;
    let template_id = manifest.template_id()?;

    let preview = descriptor.preview.strip_prefix("./").unwrap_or(&descriptor.preview);

    let metadata = EntityMetadata {
        name: name.into(),
        namespace: Some(namespace.into()),
        title: Some(descriptor.title.clone()),
        description: Some(descriptor.description.clone()),
        annotations: Some(TemplateAnnotations {
            project_slug: descriptor.project_slug().into(),
            template: template_id.into(),
            author: descriptor.author.clone(),
        }),
        tags: descriptor.tags.iter().map(|t| clean_tag(t)).collect(),
        links: vec![
            EntityLink {
                url: descriptor.website.clone(),
                title: "Website".into(),
                icon: "help".into(),
            },
            EntityLink {
                url: descriptor.source.clone(),
                title: "Source".into(),
                icon: "github".into(),
            },
            EntityLink {
                url: format!("{PREVIEW_BASE_URL}/{preview}"),
                title: "Preview".into(),
                icon: "docs".into(),
            },
        ],
    };

    let spec = TemplateSpec {
        owner: namespace.into(),
        template_type: "website".into(),
        parameters: vec![deployment_parameters()],
        steps: vec![create_workspace_step(template_id)],
        azure: manifest.to_value(),
    };

    Ok(CatalogEntity::Template(TemplateEntity {
        api_version: SCAFFOLDER_API_VERSION.into(),
        kind: "Template".into(),
        metadata,
        spec,
    }))
}

/// Build the full entity set for a run: Group, User, then one Template per
/// pair, in input order.
pub fn build_entities(
    namespace: &str,
    pairs: &[(TemplateDescriptor, Manifest)],
) -> Result<Vec<CatalogEntity>> {
    let ns = normalize_entity_name(namespace);

    let mut entities = Vec::with_capacity(pairs.len() + 2);
    entities.push(group_entity(&ns));
    entities.push(user_entity(&ns));

    for (descriptor, manifest) in pairs {
        entities.push(template_entity(&ns, descriptor, manifest)?);
    }

    Ok(entities)
}

/// The fixed one-page deployment form every Template carries.
fn deployment_parameters() -> ParameterPage {
    ParameterPage {
        title: "Provide deployment details".into(),
        required: vec!["name".into(), "subscriptionId".into(), "location".into()],
        properties: ParameterProperties {
            name: ParameterProperty {
                title: "Name".into(),
                value_type: "string".into(),
                description: Some("Unique name of the azd environment".into()),
            },
            subscription_id: ParameterProperty {
                title: "Subscription".into(),
                value_type: "string".into(),
                description: Some("Azure subscription to deploy into".into()),
            },
            location: ParameterProperty {
                title: "Location".into(),
                value_type: "string".into(),
                description: Some("Azure region to deploy into".into()),
            },
        },
    }
}

/// The descriptive workspace-creation step. Never an actual outbound call;
/// the real scaffolding happens through `azd init` on the developer's side.
fn create_workspace_step(template_id: &str) -> TemplateStep {
    TemplateStep {
        id: "create-workspace".into(),
        name: "Create workspace".into(),
        action: "debug:log".into(),
        input: StepInput {
            message: format!(
                "Run `azd init --template {template_id}` to create a workspace from this template."
            ),
        },
    }
}
