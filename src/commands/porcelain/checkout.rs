use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    /// Restore `file` as recorded by `revision`, or by HEAD when no revision is given.
    ///
    /// The staging area is left untouched.
    pub fn checkout_file(&self, revision: Option<&str>, file: &str) -> anyhow::Result<()> {
        let commit_oid = match revision {
            Some(revision) => Revision::try_parse(revision)?.resolve(self)?,
            None => self.head_oid()?,
        };
        let commit = self.database().parse_object_as_commit(&commit_oid)?;

        let path = self.workspace().relative_path(Path::new(file))?;
        let blob_oid = commit
            .tracked_blob(&path)
            .ok_or_else(|| RepositoryError::FileNotInCommit(path.clone()))?;
        let blob = self.database().parse_object_as_blob(blob_oid)?;

        self.workspace().write_file(&path, blob.content())?;
        tracing::debug!(path = %path.display(), commit = %commit_oid, "restored file");

        Ok(())
    }

    /// Switch to `branch`, replacing the working directory with its head snapshot.
    pub fn checkout_branch(&mut self, branch: &str) -> anyhow::Result<()> {
        let branch_name = self.existing_branch(branch)?;
        if &branch_name == self.current_branch() {
            return Err(RepositoryError::CheckoutCurrentBranch.into());
        }

        let target_oid = self.refs().branch_head(&branch_name)?;
        self.materialize(&target_oid)?;
        self.set_current_branch(branch_name)?;

        eprintln!("Switched to branch '{}'", self.current_branch());

        Ok(())
    }

    /// Replace the working directory of HEAD with the snapshot of `target_oid`
    /// and clear the staging area. HEAD itself does not move.
    pub(crate) fn materialize(&mut self, target_oid: &ObjectId) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let target = self.database().parse_object_as_commit(target_oid)?;

        Migration::between(self, head.snapshot(), target.snapshot()).apply_changes()?;

        let index = self.index_mut();
        index.clear();
        index.write_updates()
    }
}
