use crate::areas::database::{CommitStore, Database};
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// First-parent history starting at a commit, newest first.
pub struct RevList<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
}

impl<'d> RevList<'d> {
    pub fn new(database: &'d Database, start: ObjectId) -> Self {
        RevList {
            database,
            current_commit_oid: Some(start),
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Every commit reachable from `start` (itself included), breadth first.
///
/// Parents are enqueued in order, so the first-parent line is reached before
/// merged-in lines at the same depth. Each commit is yielded once, and the
/// walk can be started over with `restart`.
pub struct Ancestors<'s, S: CommitStore> {
    store: &'s S,
    start: ObjectId,
    queue: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'s, S: CommitStore> Ancestors<'s, S> {
    pub fn new(store: &'s S, start: ObjectId) -> Self {
        let mut ancestors = Ancestors {
            store,
            start,
            queue: VecDeque::new(),
            seen: HashSet::new(),
        };
        ancestors.restart();

        ancestors
    }

    pub fn restart(&mut self) {
        self.queue.clear();
        self.seen.clear();
        self.queue.push_back(self.start.clone());
        self.seen.insert(self.start.clone());
    }
}

impl<S: CommitStore> Iterator for Ancestors<'_, S> {
    type Item = anyhow::Result<SlimCommit>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.queue.pop_front()?;

        let commit = match self.store.slim_commit(&oid) {
            Ok(commit) => commit,
            Err(error) => {
                self.queue.clear();
                return Some(Err(error));
            }
        };

        for parent in &commit.parents {
            if self.seen.insert(parent.clone()) {
                self.queue.push_back(parent.clone());
            }
        }

        Some(Ok(commit))
    }
}
