//! HTTP fetching for the template index and per-template manifests.
//!
//! One blocking-style await per request: the gallery is small and the
//! upstream is GitHub raw content, so fetches are issued strictly one at a
//! time with no batching or retries.

mod resolve;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use backstageify_shared::{BackstageifyError, Manifest, Result, TemplateDescriptor};

pub use resolve::azure_yaml_url;

/// User-Agent string for all requests.
const USER_AGENT: &str = concat!("backstageify/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects to follow per request.
const MAX_REDIRECTS: usize = 5;

// ---------------------------------------------------------------------------
// Fetch options
// ---------------------------------------------------------------------------

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Timeout for each request, in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// HTTP fetcher for the index JSON and `azure.yaml` manifests.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher with the given options.
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| {
                BackstageifyError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// Fetch and decode the template index.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch_index(&self, url: &Url) -> Result<Vec<TemplateDescriptor>> {
        let body = self.fetch_text(url.as_str()).await?;

        let descriptors: Vec<TemplateDescriptor> = serde_json::from_str(&body)
            .map_err(|e| BackstageifyError::decode(format!("template index: {e}")))?;

        debug!(count = descriptors.len(), "template index decoded");
        Ok(descriptors)
    }

    /// Fetch and parse a manifest from an already-resolved `azure.yaml` URL.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch_manifest(&self, url: &str) -> Result<Manifest> {
        let body = self.fetch_text(url).await?;
        Manifest::parse(&body)
    }

    /// GET a URL and return its body, treating non-2xx as an error.
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BackstageifyError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackstageifyError::Network(format!("{url}: HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| BackstageifyError::Network(format!("{url}: body read failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX_JSON: &str = r#"[
        {
            "title": "ToDo Application",
            "description": "A sample app",
            "source": "https://github.com/Azure/todo-python-mongo",
            "website": "https://example.com",
            "author": "Azure Dev",
            "tags": ["python", "mongo"],
            "preview": "./templates/images/todo.png"
        }
    ]"#;

    const MANIFEST_YAML: &str = "\
name: todo-python-mongo
metadata:
  template: todo-python-mongo@0.0.1-beta
";

    #[tokio::test]
    async fn fetch_index_decodes_descriptors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/templates.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_JSON))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&FetchOptions::default()).unwrap();
        let url = Url::parse(&format!("{}/templates.json", server.uri())).unwrap();
        let descriptors = fetcher.fetch_index(&url).await.unwrap();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].title, "ToDo Application");
    }

    #[tokio::test]
    async fn fetch_index_rejects_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/templates.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&FetchOptions::default()).unwrap();
        let url = Url::parse(&format!("{}/templates.json", server.uri())).unwrap();
        let err = fetcher.fetch_index(&url).await.unwrap_err();

        assert!(err.to_string().contains("decode error"));
    }

    #[tokio::test]
    async fn fetch_manifest_parses_yaml() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Azure/todo-python-mongo/main/azure.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MANIFEST_YAML))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&FetchOptions::default()).unwrap();
        let url = format!("{}/Azure/todo-python-mongo/main/azure.yaml", server.uri());
        let manifest = fetcher.fetch_manifest(&url).await.unwrap();

        assert_eq!(manifest.name().unwrap(), "todo-python-mongo");
    }

    #[tokio::test]
    async fn non_2xx_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/azure.yaml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&FetchOptions::default()).unwrap();
        let url = format!("{}/azure.yaml", server.uri());
        let err = fetcher.fetch_manifest(&url).await.unwrap_err();

        assert!(matches!(err, BackstageifyError::Network(_)));
        assert!(err.to_string().contains("404"));
    }
}
