//! Split point search
//!
//! The split point of two commits is a *best common ancestor*: a commit
//! reachable from both that is not a proper ancestor of another common
//! ancestor. In criss-cross histories several such commits exist; the one
//! reached first by a breadth-first walk from the current head is chosen, and
//! since the walk enqueues first parents first, the current branch's own line
//! of history wins ties.
//!
//! ## Algorithm
//!
//! 1. Walk everything reachable from the other head, marking it `TARGET`.
//! 2. Walk from the current head, marking `SOURCE`; commits carrying both
//!    marks are common ancestors and get `RESULT`, in walk order.
//! 3. Mark every proper ancestor of a `RESULT` commit `STALE`.
//! 4. The first `RESULT` commit that is not `STALE` is the split point.

use crate::areas::database::CommitStore;
use crate::artifacts::log::rev_list::Ancestors;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b0000;
        const SOURCE = 0b0001;
        const TARGET = 0b0010;
        const BOTH = Self::SOURCE.bits() | Self::TARGET.bits();
        const STALE = 0b0100; // proper ancestor of a common ancestor
        const RESULT = 0b1000; // common ancestor
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

pub struct SplitPointFinder<'s, S: CommitStore> {
    store: &'s S,
}

impl<'s, S: CommitStore> SplitPointFinder<'s, S> {
    pub fn new(store: &'s S) -> Self {
        SplitPointFinder { store }
    }

    /// Split point of `head` (the current branch) and `other`.
    ///
    /// `None` only when the histories share no commit at all.
    pub fn find(&self, head: &ObjectId, other: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();

        for commit in Ancestors::new(self.store, other.clone()) {
            states.insert(commit?.oid, VisitState::TARGET);
        }

        let mut common_ancestors = Vec::new();
        for commit in Ancestors::new(self.store, head.clone()) {
            let commit = commit?;
            let state = states.entry(commit.oid.clone()).or_insert(VisitState::NONE);
            *state |= VisitState::SOURCE;

            if state.contains(VisitState::BOTH) {
                *state |= VisitState::RESULT;
                common_ancestors.push(commit);
            }
        }

        self.mark_stale(&common_ancestors, &mut states)?;

        tracing::debug!(
            head = %head,
            other = %other,
            candidates = ?common_ancestors
                .iter()
                .map(|commit| (commit.oid.to_short_oid(), states[&commit.oid]))
                .collect::<Vec<_>>(),
            "split point candidates"
        );

        Ok(common_ancestors
            .into_iter()
            .map(|commit| commit.oid)
            .find(|oid| !states[oid].contains(VisitState::STALE)))
    }

    /// Mark every proper ancestor of the common ancestors as stale.
    fn mark_stale(
        &self,
        common_ancestors: &[SlimCommit],
        states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<()> {
        let mut queue = common_ancestors
            .iter()
            .flat_map(|commit| commit.parents.iter().cloned())
            .collect::<VecDeque<_>>();
        let mut seen = queue.iter().cloned().collect::<HashSet<_>>();

        while let Some(oid) = queue.pop_front() {
            *states.entry(oid.clone()).or_insert(VisitState::NONE) |= VisitState::STALE;

            for parent in self.store.slim_commit(&oid)?.parents {
                if seen.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(())
    }
}
