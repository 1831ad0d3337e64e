use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Planned working-directory update.
///
/// `tracked` is the snapshot of the current HEAD: a file on disk that is not
/// part of it is untracked, and a plan touching an untracked file is refused
/// as a whole.
pub struct Migration<'r> {
    repository: &'r Repository,
    tracked: &'r Snapshot,
    writes: BTreeMap<PathBuf, ObjectId>,
    deletes: BTreeSet<PathBuf>,
}

impl<'r> Migration<'r> {
    pub fn new(
        repository: &'r Repository,
        tracked: &'r Snapshot,
        writes: BTreeMap<PathBuf, ObjectId>,
        deletes: BTreeSet<PathBuf>,
    ) -> Self {
        Migration {
            repository,
            tracked,
            writes,
            deletes,
        }
    }

    /// Plan to turn the working directory of `tracked` into `target`:
    /// every target file is written, every tracked file missing from the
    /// target is deleted.
    pub fn between(repository: &'r Repository, tracked: &'r Snapshot, target: &Snapshot) -> Self {
        let deletes = tracked
            .keys()
            .filter(|path| !target.contains_key(*path))
            .cloned()
            .collect();

        Self::new(repository, tracked, target.clone(), deletes)
    }

    pub fn writes(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.writes
    }

    pub fn deletes(&self) -> &BTreeSet<PathBuf> {
        &self.deletes
    }

    /// Fail with every untracked file the plan would overwrite or delete.
    pub fn check_untracked(&self) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        let paths = self
            .writes
            .keys()
            .chain(self.deletes.iter())
            .filter(|path| !self.tracked.contains_key(*path) && workspace.exists(path))
            .cloned()
            .collect::<BTreeSet<_>>();

        if paths.is_empty() {
            Ok(())
        } else {
            Err(RepositoryError::UntrackedFileConflict {
                paths: paths.into_iter().collect(),
            }
            .into())
        }
    }

    pub fn apply_changes(&self) -> anyhow::Result<()> {
        self.check_untracked()?;

        tracing::debug!(
            writes = self.writes.len(),
            deletes = self.deletes.len(),
            "applying migration"
        );

        let workspace = self.repository.workspace();
        for path in &self.deletes {
            workspace.remove_file(path)?;
        }
        for (path, oid) in &self.writes {
            let blob = self.repository.database().parse_object_as_blob(oid)?;
            workspace.write_file(path, blob.content())?;
        }

        Ok(())
    }
}
