use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create `branch` pointing at the current head. HEAD does not move.
    pub fn branch(&self, branch: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch.to_string())?;
        let head_oid = self.head_oid()?;

        self.refs().create_branch(&branch_name, &head_oid)
    }

    /// Delete the `branch` pointer; its commits stay in the store.
    pub fn rm_branch(&self, branch: &str) -> anyhow::Result<()> {
        let branch_name = self.existing_branch(branch)?;
        if &branch_name == self.current_branch() {
            return Err(RepositoryError::RemoveCurrentBranch.into());
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
