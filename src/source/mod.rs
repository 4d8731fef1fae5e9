//! Where repository files come from.

pub mod github;
pub mod local;

use std::fmt;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::DocError;
use crate::Result;

pub use github::GitHubSource;
pub use local::LocalSource;

static RE_GITHUB_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/.]+)").unwrap());
static RE_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_-]+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId {
    pub owner: String,
    pub repo: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Accepts a GitHub URL (`https://github.com/owner/repo[.git][/...]`)
    /// or the `owner/repo` shorthand.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        RE_GITHUB_URL
            .captures(input)
            .or_else(|| RE_SHORTHAND.captures(input))
            .map(|caps| Self::new(&caps[1], &caps[2]))
            .ok_or_else(|| {
                DocError::input(
                    "Invalid GitHub URL format. Please use https://github.com/username/repository",
                )
            })
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One listing entry. Paths are relative to the repository root and use
/// `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl RepoEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Full recursive listing. Fails with a not-found or rate-limited
    /// content source error.
    async fn list_files(&self, repo: &RepositoryId) -> Result<Vec<RepoEntry>>;

    async fn read_file(&self, repo: &RepositoryId, path: &str) -> Result<String>;
}
