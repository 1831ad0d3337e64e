//! Per-path merge classification
//!
//! Every path in the union of the split point, head and other snapshots gets
//! exactly one `Resolution`. The rules are tried in declaration order, so an
//! earlier rule shadows a later one when both would match.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Same content at split, head and other
    Unchanged,
    /// Only other changed the file
    TakeOther(ObjectId),
    /// Only head changed the file
    KeepHead,
    /// Both sides ended with the same content
    Converged,
    /// Absent at split and head
    AddedInOther(ObjectId),
    /// Absent at split and other
    AddedInHead,
    /// Other deleted it, head left it alone
    DeletedInOther,
    /// Head deleted it, other left it alone
    DeletedInHead,
    /// Both sides diverged; `None` marks a deleted side
    Conflict {
        head: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl Resolution {
    pub fn classify(
        split: Option<&ObjectId>,
        head: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        match (split, head, other) {
            (s, h, o) if h == s && o == s => Resolution::Unchanged,
            (Some(s), Some(h), Some(o)) if h == s => Resolution::TakeOther(o.clone()),
            (Some(s), Some(_), Some(o)) if o == s => Resolution::KeepHead,
            (_, h, o) if h == o => Resolution::Converged,
            (None, None, Some(o)) => Resolution::AddedInOther(o.clone()),
            (None, Some(_), None) => Resolution::AddedInHead,
            (Some(s), Some(h), None) if h == s => Resolution::DeletedInOther,
            (Some(s), None, Some(o)) if o == s => Resolution::DeletedInHead,
            (_, h, o) => Resolution::Conflict {
                head: h.cloned(),
                other: o.cloned(),
            },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Resolution::Conflict { .. })
    }
}

/// Conflict-marked file body; a deleted side contributes empty text.
pub fn conflict_content(head: &[u8], other: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + head.len()
            + CONFLICT_SEPARATOR.len()
            + other.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(head);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(other);
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    Bytes::from(content)
}
