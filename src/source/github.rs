use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{ContentSource, RepoEntry, RepositoryId};
use crate::config::Config;
use crate::error::DocError;
use crate::http::{HttpClient, HttpClientConfig, HttpRequest, HttpResponse};
use crate::Result;

const GITHUB_JSON: &str = "application/vnd.github+json";
const GITHUB_RAW: &str = "application/vnd.github.raw";

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    item_type: String,
}

/// Reads repositories through the GitHub REST API: one recursive git-tree
/// call for the listing and one raw contents call per file.
pub struct GitHubSource {
    http: HttpClient,
    api_url: String,
    branch: String,
    token: Option<String>,
}

impl GitHubSource {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(HttpClientConfig::from(&config.http))?,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            branch: config.branch.clone(),
            token: config.github_token.clone(),
        })
    }

    fn tree_url(&self, repo: &RepositoryId) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}",
            self.api_url, repo.owner, repo.repo, self.branch
        )
    }

    fn contents_url(&self, repo: &RepositoryId, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            repo.owner,
            repo.repo,
            path.trim_start_matches('/')
        )
    }

    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse> {
        let request = request.bearer(self.token.as_deref());
        self.http
            .send(&request)
            .await
            .map_err(|e| DocError::content_source(e.to_string()))
    }
}

#[async_trait]
impl ContentSource for GitHubSource {
    async fn list_files(&self, repo: &RepositoryId) -> Result<Vec<RepoEntry>> {
        let request = HttpRequest::get(self.tree_url(repo))
            .header("Accept", GITHUB_JSON)
            .query("recursive", "1");
        let response = self.fetch(request).await?;
        if !response.is_success() {
            return Err(classify_status(&response, &format!("repository {}", repo)));
        }

        let entries = parse_tree(&response.body)?;
        debug!("{}: {} tree entries", repo, entries.len());
        Ok(entries)
    }

    async fn read_file(&self, repo: &RepositoryId, path: &str) -> Result<String> {
        let request = HttpRequest::get(self.contents_url(repo, path))
            .header("Accept", GITHUB_RAW)
            .query("ref", self.branch.as_str());
        let response = self.fetch(request).await?;
        if !response.is_success() {
            return Err(classify_status(&response, path));
        }
        Ok(response.body)
    }
}

/// Git tree JSON to listing entries; `blob` items are files and `tree`
/// items directories, anything else (submodules) is dropped.
fn parse_tree(body: &str) -> Result<Vec<RepoEntry>> {
    let tree: TreeResponse = serde_json::from_str(body)
        .map_err(|e| DocError::content_source(format!("Malformed tree response: {}", e)))?;
    if tree.truncated {
        warn!("Repository tree listing was truncated by the API");
    }

    Ok(tree
        .tree
        .into_iter()
        .filter_map(|item| match item.item_type.as_str() {
            "blob" => Some(RepoEntry::file(item.path)),
            "tree" => Some(RepoEntry::dir(item.path)),
            _ => None,
        })
        .collect())
}

fn classify_status(response: &HttpResponse, subject: &str) -> DocError {
    let exhausted = response.header("x-ratelimit-remaining") == Some("0");
    match response.status {
        StatusCode::NOT_FOUND => DocError::not_found(format!("{} not found", subject)),
        StatusCode::TOO_MANY_REQUESTS => {
            DocError::rate_limited("GitHub API rate limit exceeded")
        }
        StatusCode::FORBIDDEN if exhausted => {
            DocError::rate_limited("GitHub API rate limit exceeded")
        }
        status => DocError::content_source(format!(
            "GitHub API returned {} for {}",
            status, subject
        )),
    }
}
