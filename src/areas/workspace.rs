//! Working directory
//!
//! Every path handed to or returned from the workspace is relative to the
//! repository root and uses plain components (no `.`/`..`). The `.twig`
//! directory is never listed, read or written through here.

use crate::artifacts::objects::blob::Blob;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Name of the repository directory inside the workspace
pub const REPOSITORY_DIR: &str = ".twig";

const IGNORED_PATHS: [&str; 1] = [REPOSITORY_DIR];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalize a user supplied path to a workspace-relative one.
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(self.path.as_ref())
                .with_context(|| format!("{} is outside the repository", path.display()))?
        } else {
            path
        };

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        anyhow::bail!("{} is outside the repository", path.display());
                    }
                }
                Component::Normal(name) => {
                    // commit records are line based and UTF-8
                    if name.to_str().is_none_or(|name| name.contains('\n')) {
                        return Err(
                            RepositoryError::UnsupportedFileName(path.to_path_buf()).into()
                        );
                    }
                    normalized.push(name);
                }
                Component::RootDir | Component::Prefix(_) => {
                    anyhow::bail!("{} is outside the repository", path.display());
                }
            }
        }

        if normalized.as_os_str().is_empty() || Self::is_ignored(&normalized) {
            anyhow::bail!("{} is not a workspace file", path.display());
        }

        Ok(normalized)
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Write `content` to `file_path`, creating parent directories.
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directories of {}", file_path.display())
            })?;
        }
        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path).with_context(|| {
                format!("Failed to remove existing directory: {}", file_path.display())
            })?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write to file: {}", file_path.display()))
    }

    /// Delete `file_path` if present, then prune parent directories left empty.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {}", file_path.display()))?;
        }

        let mut parent = file_path.parent();
        while let Some(dir) = parent
            && !dir.as_os_str().is_empty()
        {
            let full_dir = self.path.join(dir);
            if !full_dir.is_dir() || full_dir.read_dir()?.next().is_some() {
                break;
            }
            std::fs::remove_dir(&full_dir)
                .with_context(|| format!("Failed to remove directory: {}", dir.display()))?;
            parent = dir.parent();
        }

        Ok(())
    }

    /// Every file in the workspace, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !IGNORED_PATHS.contains(&entry.file_name().to_string_lossy().as_ref()))
        {
            let entry = entry.context("Unable to walk the workspace")?;
            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .with_context(|| format!("{} is outside the workspace", entry.path().display()))?;
                files.push(relative.to_path_buf());
            }
        }
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }
}
