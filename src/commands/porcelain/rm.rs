use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    pub fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(Path::new(file))?;
        let head = self.head_commit()?;
        let is_tracked = head.tracked_blob(&path).is_some();

        if is_tracked {
            self.workspace().remove_file(&path)?;
            tracing::debug!(path = %path.display(), "staged for removal");
            self.index_mut().stage_removal(path);
        } else if self.index().is_staged_for_addition(&path) {
            self.index_mut().unstage(&path);
        } else {
            return Err(RepositoryError::NothingToRemove(path).into());
        }

        self.index_mut().write_updates()
    }
}
