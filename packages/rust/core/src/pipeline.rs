//! End-to-end `generate` pipeline: index → manifests → entities → catalog.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument, warn};
use url::Url;

use backstageify_catalog::builder::{group_entity, template_entity, user_entity};
use backstageify_catalog::sanitize::normalize_entity_name;
use backstageify_catalog::writer::CatalogWriter;
use backstageify_catalog::CatalogEntity;
use backstageify_fetcher::{Fetcher, FetchOptions, azure_yaml_url};
use backstageify_shared::{Result, TemplateDescriptor};

/// Configuration for the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Template index URL.
    pub index_url: Url,
    /// Catalog output file path.
    pub output_path: PathBuf,
    /// Namespace/owner for generated entities (normalized before use).
    pub namespace: String,
    /// HTTP timeout per request, in seconds.
    pub timeout_secs: u64,
    /// Skip templates whose manifest fails to fetch or assemble, instead of
    /// aborting the run.
    pub keep_going: bool,
    /// Stage a newly created catalog file with git.
    pub stage_new_files: bool,
}

/// Result of the `generate` pipeline.
#[derive(Debug)]
pub struct GenerateResult {
    /// Where the catalog was written.
    pub output_path: PathBuf,
    /// Total entities emitted, fixed entities included.
    pub entity_count: usize,
    /// Templates turned into entities.
    pub templates_processed: usize,
    /// Templates skipped under `keep_going`.
    pub templates_skipped: usize,
    /// Whether the catalog file was newly created.
    pub created: bool,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each template's manifest fetch.
    fn template_fetched(&self, title: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &GenerateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn template_fetched(&self, _title: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &GenerateResult) {}
}

/// Run the full `generate` pipeline.
///
/// 1. Fetch the template index
/// 2. Fetch each template's `azure.yaml`, one at a time
/// 3. Assemble Group + User + Template entities
/// 4. Write the catalog file (staging it with git when newly created)
#[instrument(skip_all, fields(index_url = %config.index_url, out = %config.output_path.display()))]
pub async fn generate(
    config: &GenerateConfig,
    progress: &dyn ProgressReporter,
) -> Result<GenerateResult> {
    let start = Instant::now();

    // --- Phase 1: Index ---
    progress.phase("Fetching template index");
    let fetcher = Fetcher::new(&FetchOptions {
        timeout_secs: config.timeout_secs,
    })?;
    let descriptors = fetcher.fetch_index(&config.index_url).await?;

    info!(count = descriptors.len(), "template index fetched");

    // --- Phase 2 + 3: Manifests and entities ---
    let namespace = normalize_entity_name(&config.namespace);
    let mut entities = vec![group_entity(&namespace), user_entity(&namespace)];
    let mut skipped = 0usize;
    let total = descriptors.len();

    for (i, descriptor) in descriptors.iter().enumerate() {
        progress.template_fetched(&descriptor.title, i + 1, total);

        match process_template(&fetcher, &namespace, descriptor).await {
            Ok(entity) => entities.push(entity),
            Err(e) if config.keep_going => {
                warn!(template = %descriptor.title, error = %e, "skipping template");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    // --- Phase 4: Write ---
    progress.phase("Writing catalog");
    let writer = CatalogWriter::new().stage_new_files(config.stage_new_files);
    let write = writer.write(&config.output_path, &entities)?;

    let result = GenerateResult {
        output_path: write.path,
        entity_count: entities.len(),
        templates_processed: total - skipped,
        templates_skipped: skipped,
        created: write.created,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        entity_count = result.entity_count,
        templates_processed = result.templates_processed,
        templates_skipped = result.templates_skipped,
        elapsed_ms = result.elapsed.as_millis(),
        "generate pipeline complete"
    );

    Ok(result)
}

/// Fetch one template's manifest and assemble its entity.
async fn process_template(
    fetcher: &Fetcher,
    namespace: &str,
    descriptor: &TemplateDescriptor,
) -> Result<CatalogEntity> {
    let manifest_url = azure_yaml_url(&descriptor.source);
    let manifest = fetcher.fetch_manifest(&manifest_url).await?;
    template_entity(namespace, descriptor, &manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MANIFEST_TODO: &str = "\
name: todo-python-mongo
metadata:
  template: todo-python-mongo@0.0.1-beta
services:
  web:
    language: py
";

    const MANIFEST_CHAT: &str = "\
name: chat-openai
metadata:
  template: chat-openai@0.1.0
";

    fn descriptor_json(title: &str, source: String) -> serde_json::Value {
        json!({
            "title": title,
            "description": format!("{title} description"),
            "source": source,
            "website": "https://example.com",
            "author": "Azure Dev",
            "tags": ["Python", "AI_ML"],
            "preview": "./templates/images/preview.png",
        })
    }

    async fn mount_index(server: &MockServer, entries: &[serde_json::Value]) {
        Mock::given(method("GET"))
            .and(path("/templates.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(serde_json::to_string(entries).unwrap()),
            )
            .mount(server)
            .await;
    }

    async fn mount_manifest(server: &MockServer, repo: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/org/{repo}/main/azure.yaml")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    fn test_config(server: &MockServer, out_name: &str) -> GenerateConfig {
        let dir = std::env::temp_dir().join(format!("backstageify-core-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        GenerateConfig {
            index_url: Url::parse(&format!("{}/templates.json", server.uri())).unwrap(),
            output_path: dir.join(out_name),
            namespace: "awesome-azd".into(),
            timeout_secs: 5,
            keep_going: false,
            stage_new_files: false,
        }
    }

    fn parse_stream(path: &std::path::Path) -> Vec<serde_yaml::Value> {
        let content = std::fs::read_to_string(path).expect("read catalog");
        serde_yaml::Deserializer::from_str(&content)
            .map(|doc| serde_yaml::Value::deserialize(doc).expect("parse document"))
            .collect()
    }

    #[tokio::test]
    async fn generates_group_user_and_one_template_per_pair() {
        let server = MockServer::start().await;
        mount_index(
            &server,
            &[
                descriptor_json("ToDo", format!("{}/org/todo-python-mongo", server.uri())),
                descriptor_json("Chat", format!("{}/org/chat-openai", server.uri())),
            ],
        )
        .await;
        mount_manifest(&server, "todo-python-mongo", MANIFEST_TODO).await;
        mount_manifest(&server, "chat-openai", MANIFEST_CHAT).await;

        let config = test_config(&server, "catalog-e2e.yaml");
        let _ = std::fs::remove_file(&config.output_path);

        let result = generate(&config, &SilentProgress).await.expect("generate");
        assert_eq!(result.entity_count, 4);
        assert_eq!(result.templates_processed, 2);
        assert_eq!(result.templates_skipped, 0);
        assert!(result.created);

        let docs = parse_stream(&config.output_path);
        let kinds: Vec<&str> = docs.iter().filter_map(|d| d["kind"].as_str()).collect();
        assert_eq!(kinds, vec!["Group", "User", "Template", "Template"]);

        // Template names come verbatim from the manifests.
        assert_eq!(docs[2]["metadata"]["name"], "todo-python-mongo");
        assert_eq!(docs[3]["metadata"]["name"], "chat-openai");

        // spec.azure is the manifest, embedded pass-through.
        let expected: serde_yaml::Value = serde_yaml::from_str(MANIFEST_TODO).unwrap();
        assert_eq!(docs[2]["spec"]["azure"], expected);

        // Tags were sanitized on the way through.
        assert_eq!(docs[2]["metadata"]["tags"][1], "ai-ml");

        let _ = std::fs::remove_file(&config.output_path);
    }

    #[tokio::test]
    async fn identical_upstream_data_yields_byte_identical_output() {
        let server = MockServer::start().await;
        mount_index(
            &server,
            &[descriptor_json(
                "ToDo",
                format!("{}/org/todo-python-mongo", server.uri()),
            )],
        )
        .await;
        mount_manifest(&server, "todo-python-mongo", MANIFEST_TODO).await;

        let config = test_config(&server, "catalog-idempotent.yaml");
        let _ = std::fs::remove_file(&config.output_path);

        let first = generate(&config, &SilentProgress).await.expect("first run");
        let first_bytes = std::fs::read(&config.output_path).expect("read first");

        let second = generate(&config, &SilentProgress).await.expect("second run");
        let second_bytes = std::fs::read(&config.output_path).expect("read second");

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first_bytes, second_bytes);

        let _ = std::fs::remove_file(&config.output_path);
    }

    #[tokio::test]
    async fn manifest_failure_aborts_by_default() {
        let server = MockServer::start().await;
        mount_index(
            &server,
            &[descriptor_json(
                "Broken",
                format!("{}/org/broken-template", server.uri()),
            )],
        )
        .await;
        // No manifest mounted: the fetch gets a 404.

        let config = test_config(&server, "catalog-abort.yaml");
        let _ = std::fs::remove_file(&config.output_path);

        let err = generate(&config, &SilentProgress).await.unwrap_err();
        assert!(err.to_string().contains("network error"));

        // Fail whole: nothing was written.
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn keep_going_skips_failed_templates() {
        let server = MockServer::start().await;
        mount_index(
            &server,
            &[
                descriptor_json("ToDo", format!("{}/org/todo-python-mongo", server.uri())),
                descriptor_json("Broken", format!("{}/org/broken-template", server.uri())),
            ],
        )
        .await;
        mount_manifest(&server, "todo-python-mongo", MANIFEST_TODO).await;

        let mut config = test_config(&server, "catalog-keep-going.yaml");
        config.keep_going = true;
        let _ = std::fs::remove_file(&config.output_path);

        let result = generate(&config, &SilentProgress).await.expect("generate");
        assert_eq!(result.entity_count, 3);
        assert_eq!(result.templates_processed, 1);
        assert_eq!(result.templates_skipped, 1);

        let docs = parse_stream(&config.output_path);
        assert_eq!(docs.len(), 3);

        let _ = std::fs::remove_file(&config.output_path);
    }
}
