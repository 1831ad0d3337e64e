//! Branch references
//!
//! - `.twig/HEAD` holds `ref: refs/heads/<current>`
//! - `.twig/refs/heads/<name>` holds the 40-hex id of the branch head
//!
//! Every ref write goes through a temp file + rename.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::write_atomic;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (`.twig`)
    path: Box<Path>,
}

impl Refs {
    /// Branch named by HEAD
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let symref_regex = regex::Regex::new(SYMREF_REGEX)
            .with_context(|| format!("invalid symref regex: {SYMREF_REGEX}"))?;
        let captures = symref_regex
            .captures(content.trim())
            .with_context(|| format!("HEAD is not a symbolic ref: {}", content.trim()))?;

        BranchName::try_parse_sym_ref(&captures[1])
    }

    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        write_atomic(
            &self.head_path(),
            format!("ref: {}\n", branch_name.to_sym_ref()).as_bytes(),
        )?;
        tracing::debug!(branch = %branch_name, "HEAD moved");

        Ok(())
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Head of `branch_name`, failing `BranchNotFound` when it does not exist
    pub fn branch_head(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        self.read_branch(branch_name)?
            .ok_or_else(|| RepositoryError::BranchNotFound(branch_name.to_string()).into())
    }

    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        write_atomic(
            &self.branch_path(branch_name),
            format!("{oid}\n").as_bytes(),
        )?;
        tracing::debug!(branch = %branch_name, oid = %oid, "branch updated");

        Ok(())
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(RepositoryError::BranchAlreadyExists(branch_name.to_string()).into());
        }

        self.update_branch(branch_name, oid)
    }

    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self.branch_head(branch_name)?;
        let branch_path = self.branch_path(branch_name);

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %branch_name, "branch deleted");

        Ok(oid)
    }

    /// All branches, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path().join(branch_name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
