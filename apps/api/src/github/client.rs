//! GitHub REST v3 client behind the `RepositorySource` seam.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::github::url::RepoRef;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Invalid GitHub repository URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("GITHUB_TOKEN contains characters not allowed in an HTTP header")]
    InvalidToken,
}

impl GitHubError {
    /// Upstream HTTP status, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            GitHubError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Repository metadata from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Narrow seam over the source-hosting API.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, GitHubError>;

    /// Language names, most bytes first.
    async fn fetch_languages(&self, repo: &RepoRef) -> Result<Vec<String>, GitHubError>;

    /// Raw README text, untruncated.
    async fn fetch_readme(&self, repo: &RepoRef) -> Result<String, GitHubError>;
}

/// Orders a language → bytes map by bytes descending, ties by name.
pub fn order_languages(languages: HashMap<String, u64>) -> Vec<String> {
    let mut pairs: Vec<(String, u64)> = languages.into_iter().collect();
    pairs.sort_by(|(a_name, a_bytes), (b_name, b_bytes)| {
        b_bytes.cmp(a_bytes).then_with(|| a_name.cmp(b_name))
    });
    pairs.into_iter().map(|(name, _)| name).collect()
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    /// `token` is sent as a bearer token when present; otherwise requests are anonymous.
    pub fn new(
        api_url: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| GitHubError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_endpoint(&self, repo: &RepoRef, suffix: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_url, repo.owner, repo.repo, suffix)
    }

    async fn get_text(&self, url: &str, accept: &'static str) -> Result<String, GitHubError> {
        let response = self.client.get(url).header(ACCEPT, accept).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or(body);
            return Err(GitHubError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!("GET {url} -> {} bytes", body.len());
        Ok(body)
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, GitHubError> {
        let body = self
            .get_text(&self.repo_endpoint(repo, ""), JSON_MEDIA_TYPE)
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_languages(&self, repo: &RepoRef) -> Result<Vec<String>, GitHubError> {
        let body = self
            .get_text(&self.repo_endpoint(repo, "/languages"), JSON_MEDIA_TYPE)
            .await?;
        let languages: HashMap<String, u64> = serde_json::from_str(&body)?;
        Ok(order_languages(languages))
    }

    async fn fetch_readme(&self, repo: &RepoRef) -> Result<String, GitHubError> {
        self.get_text(&self.repo_endpoint(repo, "/readme"), RAW_MEDIA_TYPE)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_languages_ordered_by_bytes_then_name() {
        let languages = HashMap::from([
            ("Shell".to_string(), 120),
            ("Rust".to_string(), 90_000),
            ("Makefile".to_string(), 120),
            ("TypeScript".to_string(), 4_000),
        ]);
        assert_eq!(
            order_languages(languages),
            vec!["Rust", "TypeScript", "Makefile", "Shell"]
        );
    }

    #[test]
    fn test_metadata_tolerates_null_description() {
        let metadata: RepoMetadata = serde_json::from_value(json!({
            "name": "widgets",
            "description": null,
            "stargazers_count": 42,
            "language": "Rust",
            "html_url": "https://github.com/acme/widgets",
            "forks_count": 3
        }))
        .unwrap();

        assert_eq!(metadata.description, "");
        assert_eq!(metadata.stars, 42);
        assert_eq!(metadata.language.as_deref(), Some("Rust"));
    }

    #[test]
    fn test_endpoints_and_status() {
        let client = GitHubClient::new(
            "https://api.github.com/".to_string(),
            Some("ghp_example".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let repo = RepoRef {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
        };
        assert_eq!(
            client.repo_endpoint(&repo, "/readme"),
            "https://api.github.com/repos/acme/widgets/readme"
        );

        let err = GitHubError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(GitHubError::InvalidUrl("x".into()).status(), None);
    }

    // ── GitHubClient against a local server ────────────────────────────────

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};

    use crate::errors::AppError;
    use crate::github::analyzer::analyze_repository;
    use crate::test_support::{serve_locally, StubGenerator};

    fn header(headers: &HeaderMap, name: &str) -> String {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    fn fake_github() -> Router {
        Router::new()
            .route(
                "/repos/acme/widgets",
                get(|headers: HeaderMap| async move {
                    assert_eq!(header(&headers, "accept"), JSON_MEDIA_TYPE);
                    assert!(header(&headers, "user-agent").starts_with("resumai-api/"));
                    assert_eq!(header(&headers, "authorization"), "Bearer ghp_local");
                    Json(json!({
                        "name": "widgets",
                        "description": "Composable widgets",
                        "stargazers_count": 7,
                        "language": "Rust",
                        "html_url": "https://github.com/acme/widgets"
                    }))
                }),
            )
            .route(
                "/repos/acme/widgets/languages",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "languages unavailable") }),
            )
            .route(
                "/repos/acme/widgets/readme",
                get(|headers: HeaderMap| async move {
                    if header(&headers, "accept") != RAW_MEDIA_TYPE {
                        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, String::new());
                    }
                    (StatusCode::OK, "# widgets\nSmall reusable UI parts.".to_string())
                }),
            )
            .route(
                "/repos/acme/gadgets/languages",
                get(|| async { Json(json!({"Shell": 10, "Go": 5000, "C": 10})) }),
            )
            .route(
                "/repos/acme/missing",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({
                            "message": "Not Found",
                            "documentation_url": "https://docs.github.com/rest"
                        })),
                    )
                }),
            )
    }

    async fn local_client() -> GitHubClient {
        let base = serve_locally(fake_github()).await;
        GitHubClient::new(base, Some("ghp_local".to_string()), Duration::from_secs(5)).unwrap()
    }

    fn repo(name: &str) -> RepoRef {
        RepoRef {
            owner: "acme".to_string(),
            repo: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_not_found_becomes_status_error() {
        let client = local_client().await;

        let err = client.fetch_metadata(&repo("missing")).await.unwrap_err();
        match err {
            GitHubError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_metadata_languages_and_readme() {
        let client = local_client().await;

        let metadata = client.fetch_metadata(&repo("widgets")).await.unwrap();
        assert_eq!(metadata.stars, 7);

        let readme = client.fetch_readme(&repo("widgets")).await.unwrap();
        assert!(readme.contains("Small reusable UI parts."));

        let languages = client.fetch_languages(&repo("gadgets")).await.unwrap();
        assert_eq!(languages, vec!["Go", "C", "Shell"]);

        let err = client.fetch_languages(&repo("widgets")).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_analysis_over_http_degrades_and_aborts() {
        let client = local_client().await;
        let generator = StubGenerator::replying("• Shipped widgets");

        let analysis = analyze_repository(&client, &generator, "https://github.com/acme/widgets")
            .await
            .unwrap();
        assert!(analysis.technologies.is_empty());
        assert!(analysis.readme.starts_with("# widgets"));
        assert_eq!(analysis.url, "https://github.com/acme/widgets");

        let err = analyze_repository(&client, &generator, "https://github.com/acme/missing")
            .await
            .unwrap_err();
        match err {
            AppError::RepositoryFetch { status, message } => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
