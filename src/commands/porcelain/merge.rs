use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::resolution::{Resolution, conflict_content};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;

/// How a successful merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The current branch was an ancestor of the other one and now points at it
    FastForward,
    /// A two-parent merge commit was recorded
    Merged { commit: ObjectId, conflicted: bool },
}

impl Repository {
    /// Merge the head of `branch` into the current branch.
    pub fn merge(&mut self, branch: &str) -> anyhow::Result<MergeOutcome> {
        if !self.index().is_empty() {
            return Err(RepositoryError::UncommittedChanges.into());
        }
        let other_branch = self.existing_branch(branch)?;
        if &other_branch == self.current_branch() {
            return Err(RepositoryError::MergeWithSelf.into());
        }

        let head_oid = self.head_oid()?;
        let other_oid = self.refs().branch_head(&other_branch)?;

        let split_oid = {
            let commit_cache = self.commit_cache();
            SplitPointFinder::new(&commit_cache).find(&head_oid, &other_oid)?
        }
        .with_context(|| {
            format!(
                "no common ancestor between {} and {}",
                self.current_branch(),
                other_branch
            )
        })?;
        tracing::debug!(head = %head_oid, other = %other_oid, split = %split_oid, "split point found");

        if split_oid == other_oid {
            return Err(RepositoryError::AlreadyUpToDate.into());
        }
        if split_oid == head_oid {
            self.materialize(&other_oid)?;
            self.refs().update_branch(self.current_branch(), &other_oid)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;

            return Ok(MergeOutcome::FastForward);
        }

        let database = self.database();
        let split = database.parse_object_as_commit(&split_oid)?;
        let head = database.parse_object_as_commit(&head_oid)?;
        let other = database.parse_object_as_commit(&other_oid)?;

        let paths = split
            .snapshot()
            .keys()
            .chain(head.snapshot().keys())
            .chain(other.snapshot().keys())
            .collect::<BTreeSet<_>>();

        let mut writes = BTreeMap::<PathBuf, ObjectId>::new();
        let mut deletes = BTreeSet::<PathBuf>::new();
        let mut conflict_blobs = Vec::new();

        for path in paths {
            let resolution = Resolution::classify(
                split.tracked_blob(path),
                head.tracked_blob(path),
                other.tracked_blob(path),
            );
            if resolution.is_conflict() {
                tracing::debug!(path = %path.display(), "conflict");
            } else {
                tracing::trace!(path = %path.display(), ?resolution, "classified");
            }

            match resolution {
                Resolution::TakeOther(oid) | Resolution::AddedInOther(oid) => {
                    writes.insert(path.clone(), oid);
                }
                Resolution::DeletedInOther => {
                    deletes.insert(path.clone());
                }
                Resolution::Conflict {
                    head: head_blob,
                    other: other_blob,
                } => {
                    let blob = Blob::new(conflict_content(
                        &self.blob_content(head_blob.as_ref())?,
                        &self.blob_content(other_blob.as_ref())?,
                    ));
                    writes.insert(path.clone(), blob.object_id()?);
                    conflict_blobs.push(blob);
                }
                Resolution::Unchanged
                | Resolution::KeepHead
                | Resolution::Converged
                | Resolution::AddedInHead
                | Resolution::DeletedInHead => {}
            }
        }

        let conflicted = !conflict_blobs.is_empty();
        {
            let migration = Migration::new(self, head.snapshot(), writes, deletes);
            migration.check_untracked()?;

            for blob in &conflict_blobs {
                self.database().store(blob)?;
            }
            migration.apply_changes()?;

            let (writes, deletes) = (migration.writes().clone(), migration.deletes().clone());
            let index = self.index_mut();
            for (path, oid) in writes {
                index.stage_addition(path, oid);
            }
            for path in deletes {
                index.stage_removal(path);
            }
        }

        let message = format!("Merged {} into {}.", other_branch, self.current_branch());
        let (commit_oid, _) = self.write_commit(&message, vec![other_oid])?;

        if conflicted {
            tracing::info!(conflicts = conflict_blobs.len(), "merge left conflicts");
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_oid,
            conflicted,
        })
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => Ok(self.database().parse_object_as_blob(oid)?.content().clone()),
            None => Ok(Bytes::new()),
        }
    }
}
