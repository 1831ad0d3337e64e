//! Commit object
//!
//! A commit is an immutable snapshot of the tracked files together with its
//! message, timestamp and parent links. The snapshot is stored inline as a
//! path → blob id table, so a commit is self-contained.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>          (0 for the root, 1 normally, 2 for merges)
//! timestamp <seconds> <timezone>
//! file <blob-sha> <path>       (one line per tracked file, sorted by path)
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Environment variable overriding the commit timestamp
pub const COMMIT_DATE_ENV_VAR: &str = "TWIG_COMMIT_DATE";

pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Tracked files of a commit: path → blob id
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Read the commit timestamp from `TWIG_COMMIT_DATE`, falling back to the local clock.
///
/// Accepts RFC 2822 dates and `%Y-%m-%d %H:%M:%S %z`.
pub fn load_timestamp_from_env() -> DateTime<FixedOffset> {
    std::env::var(COMMIT_DATE_ENV_VAR)
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}

fn epoch() -> DateTime<FixedOffset> {
    DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset()
}

/// Slim representation of a commit used by graph walks.
///
/// Owns its data so it can be handed out of a cache.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ids (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    message: String,
    snapshot: Snapshot,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        message: String,
        snapshot: Snapshot,
    ) -> Self {
        Commit {
            parents,
            timestamp,
            message,
            snapshot,
        }
    }

    /// The commit every repository starts from
    pub fn root() -> Self {
        Commit::new(
            Vec::new(),
            epoch(),
            ROOT_COMMIT_MESSAGE.to_string(),
            Snapshot::new(),
        )
    }

    /// Derive a child snapshot: `additions` are upserted, `removals` are dropped.
    pub fn derive_snapshot(
        &self,
        additions: &BTreeMap<PathBuf, ObjectId>,
        removals: &BTreeSet<PathBuf>,
    ) -> Snapshot {
        let mut snapshot = self.snapshot.clone();
        snapshot.extend(
            additions
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );
        snapshot.retain(|path, _| !removals.contains(path));

        snapshot
    }

    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn tracked_blob(&self, path: &Path) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        }
    }

    fn body(&self) -> String {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in &self.snapshot {
            lines.push(format!("file {} {}", oid.as_ref(), path.to_string_lossy()));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, timezone) = value
        .split_once(' ')
        .context("Invalid commit object: malformed timestamp")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: timestamp is not a number")?;

    let offset = DateTime::parse_from_str(
        &format!("1970-01-01 00:00:00 {timezone}"),
        "%Y-%m-%d %H:%M:%S %z",
    )
    .context("Invalid commit object: invalid timezone")?
    .offset()
    .to_owned();

    let datetime = DateTime::from_timestamp(seconds, 0)
        .context("Invalid commit object: timestamp out of range")?;

    Ok(datetime.with_timezone(&offset))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(with_header(self.object_type(), self.body().as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.split('\n');

        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing timestamp line")?;
        }

        let timestamp = next_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = parse_timestamp(timestamp)?;

        let mut snapshot = Snapshot::new();
        loop {
            let line = lines
                .next()
                .context("Invalid commit object: missing message separator")?;
            if line.is_empty() {
                break;
            }

            let (oid, path) = line
                .strip_prefix("file ")
                .and_then(|entry| entry.split_once(' '))
                .context("Invalid commit object: invalid file line")?;
            snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parents, timestamp, message, snapshot))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
