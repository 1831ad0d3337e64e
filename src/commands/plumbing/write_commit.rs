use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, load_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Record the staging area as a child of HEAD and advance the current branch.
    ///
    /// `merged_parents` follow HEAD in the parent list; a commit with merged
    /// parents may have an empty staging area.
    pub fn write_commit(
        &mut self,
        message: &str,
        merged_parents: Vec<ObjectId>,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }
        if merged_parents.is_empty() && self.index().is_empty() {
            return Err(RepositoryError::EmptyCommit.into());
        }

        let head_oid = self.head_oid()?;
        let head = self.database().parse_object_as_commit(&head_oid)?;
        let snapshot = head.derive_snapshot(self.index().additions(), self.index().removals());

        let mut parents = vec![head_oid];
        parents.extend(merged_parents);

        let commit = Commit::new(
            parents,
            load_timestamp_from_env(),
            message.to_string(),
            snapshot,
        );
        let commit_id = self.database().store(&commit)?;
        self.refs().update_branch(self.current_branch(), &commit_id)?;

        let index = self.index_mut();
        index.clear();
        index.write_updates()?;

        tracing::info!(oid = %commit_id, branch = %self.current_branch(), "created commit");

        Ok((commit_id, commit))
    }
}
