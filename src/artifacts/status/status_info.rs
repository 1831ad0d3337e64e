use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub current_branch: BranchName,
    pub branches: Vec<BranchName>,
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let repository = self.repository;
        let index = repository.index();
        let head = repository.head_commit()?;
        let head_snapshot = head.snapshot();
        let inspector = Inspector::new(repository);

        let workspace_files = repository.workspace().list_files()?;

        let untracked_files = workspace_files
            .iter()
            .filter(|path| inspector.is_untracked(path, head_snapshot, index))
            .cloned()
            .collect::<FileSet>();

        let candidates = head_snapshot
            .keys()
            .chain(index.additions().keys())
            .collect::<BTreeSet<_>>();
        let mut workspace_changeset = ChangeSet::new();
        for path in candidates {
            if let Some(change) = inspector.check_against_workspace(path, head_snapshot, index)? {
                workspace_changeset.insert(path.to_path_buf(), change);
            }
        }

        Ok(StatusInfo {
            current_branch: repository.current_branch().clone(),
            branches: repository.refs().list_branches()?,
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }
}

impl StatusInfo {
    pub fn render(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(writer, "{}", format!("*{branch}").green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in &self.staged_files {
            writeln!(writer, "{}", path.display().to_string().green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in &self.removed_files {
            writeln!(writer, "{}", path.display().to_string().red())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(
                writer,
                "{}",
                format!("{} {change}", path.display()).red()
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in &self.untracked_files {
            writeln!(writer, "{}", path.display().to_string().red())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
