use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::{DirEntry, WalkDir};

use super::{ContentSource, RepoEntry, RepositoryId};
use crate::error::DocError;
use crate::Result;

const SKIPPED_DIRS: [&str; 2] = [".git", "node_modules"];

/// A checkout on disk. The repository identifier is only used for the
/// output record; every call reads below `root`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name of the root directory, used as the repository name.
    pub fn name(&self) -> String {
        self.root
            .canonicalize()
            .ok()
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "local".to_string())
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && SKIPPED_DIRS
            .iter()
            .any(|dir| entry.file_name().to_str() == Some(*dir))
}

#[async_trait]
impl ContentSource for LocalSource {
    async fn list_files(&self, _repo: &RepositoryId) -> Result<Vec<RepoEntry>> {
        if !self.root.is_dir() {
            return Err(DocError::not_found(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped(e));

        for entry in walker {
            let entry = entry.map_err(|e| DocError::content_source(e.to_string()))?;
            let Some(path) = self.relative_path(entry.path()) else {
                continue;
            };
            if entry.file_type().is_dir() {
                entries.push(RepoEntry::dir(path));
            } else if entry.file_type().is_file() {
                entries.push(RepoEntry::file(path));
            }
        }
        Ok(entries)
    }

    async fn read_file(&self, _repo: &RepositoryId, path: &str) -> Result<String> {
        let full = self.root.join(path.trim_start_matches('/'));
        tokio::fs::read_to_string(&full).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DocError::not_found(format!("{} not found", path)),
            _ => DocError::content_source(format!("{}: {}", path, e)),
        })
    }
}
