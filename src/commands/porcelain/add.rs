use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    pub fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(Path::new(file))?;
        if !self.workspace().exists(&path) {
            return Err(RepositoryError::FileNotFound(path).into());
        }

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id()?;
        let head = self.head_commit()?;

        if head.tracked_blob(&path) == Some(&blob_id) {
            // back to the committed content: nothing left to stage
            tracing::debug!(path = %path.display(), "matches HEAD, unstaging");
            self.index_mut().unstage(&path);
        } else {
            self.database().store(&blob)?;
            tracing::debug!(path = %path.display(), oid = %blob_id, "staged for addition");
            self.index_mut().stage_addition(path, blob_id);
        }

        self.index_mut().write_updates()
    }
}
