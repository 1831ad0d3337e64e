use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Blob id the working copy of `path` would get, `None` if absent
    pub fn workspace_oid(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        let workspace = self.repository.workspace();
        if !workspace.exists(path) {
            return Ok(None);
        }

        Ok(Some(workspace.parse_blob(path)?.object_id()?))
    }

    /// Whether a working file is neither staged for addition nor tracked by HEAD.
    ///
    /// A file staged for removal that is back on disk counts as untracked.
    pub fn is_untracked(&self, path: &Path, head: &Snapshot, index: &Index) -> bool {
        !index.is_staged_for_addition(path)
            && (!head.contains_key(path) || index.is_staged_for_removal(path))
    }

    /// Unstaged change of a file that is staged for addition or tracked by HEAD
    pub fn check_against_workspace(
        &self,
        path: &Path,
        head: &Snapshot,
        index: &Index,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        let workspace_oid = self.workspace_oid(path)?;

        let expected = match index.staged_blob(path) {
            Some(staged) => staged,
            None if index.is_staged_for_removal(path) => return Ok(None),
            None => match head.get(path) {
                Some(tracked) => tracked,
                None => return Ok(None),
            },
        };

        Ok(match workspace_oid {
            None => Some(WorkspaceChangeType::Deleted),
            Some(oid) if &oid != expected => Some(WorkspaceChangeType::Modified),
            Some(_) => None,
        })
    }
}
