use crate::areas::database::{CommitCache, Database};
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Handle over one repository: the object store, the staging area, the refs
/// and the working directory, plus the current branch read from HEAD.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Index,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    current_branch: BranchName,
}

impl Repository {
    /// Open the repository rooted at `path`.
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to access {}", path.display()))?;

        if !Self::repository_dir(&path).is_dir() {
            return Err(RepositoryError::NotARepository.into());
        }

        let refs = Refs::new(Self::repository_dir(&path).into_boxed_path());
        let current_branch = refs.current_branch()?;

        let mut repository = Self::assemble(path, writer, current_branch);
        repository.index.rehydrate()?;

        Ok(repository)
    }

    pub(crate) fn assemble(
        path: PathBuf,
        writer: Box<dyn std::io::Write>,
        current_branch: BranchName,
    ) -> Self {
        let repository_dir = Self::repository_dir(&path);

        Repository {
            index: Index::new(repository_dir.join("index").into_boxed_path()),
            database: Database::new(repository_dir.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(repository_dir.into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            current_branch,
        }
    }

    pub(crate) fn repository_dir(root: &Path) -> PathBuf {
        root.join(REPOSITORY_DIR)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn commit_cache(&self) -> CommitCache<'_> {
        CommitCache::new(&self.database)
    }

    pub fn status_inspector(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current_branch
    }

    /// Switch HEAD to `branch_name`, on disk and in this handle.
    pub fn set_current_branch(&mut self, branch_name: BranchName) -> anyhow::Result<()> {
        self.refs.set_current_branch(&branch_name)?;
        self.current_branch = branch_name;

        Ok(())
    }

    /// Look up an existing branch; a name that cannot be a branch is simply not found.
    pub fn existing_branch(&self, branch: &str) -> anyhow::Result<BranchName> {
        BranchName::try_parse(branch.to_string())
            .ok()
            .filter(|branch_name| self.refs.branch_exists(branch_name))
            .ok_or_else(|| RepositoryError::BranchNotFound(branch.to_string()).into())
    }

    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        self.refs.branch_head(&self.current_branch)
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.parse_object_as_commit(&self.head_oid()?)
    }
}
