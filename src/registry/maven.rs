//! Maven Central registry client
//!
//! Search goes through the select API (`q=...&rows=1&wt=json`); downloads
//! go straight to the repository path for the coordinate. All calls carry
//! bounded connect/read timeouts; ureq is blocking, so calls run on the
//! blocking pool.

use crate::config::RegistryConfig;
use crate::error::{DepotError, DepotResult};
use crate::project::Coordinate;
use crate::registry::ArtifactRegistry;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use ureq::Agent;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchDocs,
}

#[derive(Debug, Deserialize)]
struct SearchDocs {
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    g: String,
    a: String,
    v: String,
}

/// Registry client for Maven Central (or a compatible mirror)
pub struct MavenRegistry {
    agent: Agent,
    search_url: String,
    download_url: String,
}

impl MavenRegistry {
    /// Create a client from registry configuration
    pub fn new(config: &RegistryConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
            .timeout_global(Some(Duration::from_secs(config.read_timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            search_url: config.search_url.clone(),
            download_url: config.download_url.trim_end_matches('/').to_string(),
        }
    }

    /// Repository URL of an artifact
    fn artifact_url(&self, coordinate: &Coordinate, ext: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.download_url,
            coordinate.group_id.replace('.', "/"),
            coordinate.artifact_id,
            coordinate.version,
            coordinate.file_name(ext)
        )
    }
}

/// Parse the select API response into ranked coordinates
fn parse_search_response(body: &str) -> DepotResult<Vec<Coordinate>> {
    let parsed: SearchResponse = serde_json::from_str(body)?;
    Ok(parsed
        .response
        .docs
        .into_iter()
        .map(|doc| Coordinate::new(doc.g, doc.a, doc.v))
        .collect())
}

#[async_trait]
impl ArtifactRegistry for MavenRegistry {
    async fn search(&self, query: &str) -> DepotResult<Vec<Coordinate>> {
        debug!("Searching registry for: {}", query);
        let agent = self.agent.clone();
        let url = self.search_url.clone();
        let query = query.to_string();

        let body = tokio::task::spawn_blocking(move || -> DepotResult<String> {
            let mut response = agent
                .get(&url)
                .query("q", &query)
                .query("rows", "1")
                .query("wt", "json")
                .call()
                .map_err(|e| DepotError::registry(e.to_string()))?;

            if !response.status().is_success() {
                return Err(DepotError::RegistryStatus {
                    url,
                    status: response.status().as_u16(),
                });
            }
            response
                .body_mut()
                .read_to_string()
                .map_err(|e| DepotError::registry(e.to_string()))
        })
        .await
        .map_err(|e| DepotError::Internal(format!("registry search task failed: {}", e)))??;

        parse_search_response(&body)
    }

    async fn fetch(
        &self,
        coordinate: &Coordinate,
        ext: &str,
        dest_dir: &Path,
    ) -> DepotResult<PathBuf> {
        let url = self.artifact_url(coordinate, ext);
        let target = dest_dir.join(coordinate.file_name(ext));
        info!("Downloading {} to {}", coordinate, target.display());

        let agent = self.agent.clone();
        let task_target = target.clone();
        tokio::task::spawn_blocking(move || -> DepotResult<()> {
            let mut response = agent
                .get(&url)
                .call()
                .map_err(|e| DepotError::registry(e.to_string()))?;

            if !response.status().is_success() {
                return Err(DepotError::RegistryStatus {
                    url,
                    status: response.status().as_u16(),
                });
            }

            let mut file = std::fs::File::create(&task_target)
                .map_err(|e| DepotError::io(format!("creating {}", task_target.display()), e))?;
            let mut reader = response.body_mut().as_reader();
            std::io::copy(&mut reader, &mut file)
                .map_err(|e| DepotError::io(format!("writing {}", task_target.display()), e))?;
            Ok(())
        })
        .await
        .map_err(|e| DepotError::Internal(format!("registry fetch task failed: {}", e)))??;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_url_uses_repository_layout() {
        let registry = MavenRegistry::new(&RegistryConfig::default());
        let coordinate = Coordinate::new("org.postgresql", "postgresql", "42.5.0");

        assert_eq!(
            registry.artifact_url(&coordinate, "jar"),
            "https://repo1.maven.org/maven2/org/postgresql/postgresql/42.5.0/postgresql-42.5.0.jar"
        );
    }

    #[test]
    fn parses_search_docs_in_rank_order() {
        let body = r#"{
            "responseHeader": {"status": 0},
            "response": {
                "numFound": 2,
                "docs": [
                    {"id": "a", "g": "com.example", "a": "exampledb", "v": "3.1.4"},
                    {"id": "b", "g": "org.other", "a": "exampledb", "v": "1.0.0"}
                ]
            }
        }"#;

        let docs = parse_search_response(body).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0], Coordinate::new("com.example", "exampledb", "3.1.4"));
    }

    #[test]
    fn malformed_search_body_is_an_error() {
        assert!(parse_search_response("not json").is_err());
        assert!(parse_search_response(r#"{"response": 4}"#).is_err());
    }
}
