use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create `.twig` under `path` with the root commit on `master`.
    pub fn init(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to access {}", path.display()))?;

        if Self::repository_dir(&path).exists() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        let mut repository = Self::assemble(path, writer, BranchName::default_branch());

        fs::create_dir_all(repository.database().objects_path())
            .context("Failed to create .twig/objects directory")?;
        fs::create_dir_all(repository.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;
        fs::create_dir_all(repository.index().path())
            .context("Failed to create .twig/index directory")?;

        let root_oid = repository.database().store(&Commit::root())?;
        repository
            .refs()
            .create_branch(repository.current_branch(), &root_oid)?;
        repository
            .refs()
            .set_current_branch(repository.current_branch())
            .context("Failed to create initial HEAD reference")?;
        repository.index_mut().write_updates()?;

        writeln!(
            repository.writer(),
            "Initialized empty twig repository in {}",
            repository.path().display()
        )?;

        Ok(repository)
    }
}
