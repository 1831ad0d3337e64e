//! Staging area
//!
//! Holds the delta the next commit applies on top of HEAD's snapshot:
//!
//! - `additions`: path → blob id to upsert
//! - `removals`: paths to drop
//!
//! The two sets never share a path. Both are persisted under `.twig/index/`
//! and rewritten only when something changed.

use crate::artifacts::core::write_atomic;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::path::{Path, PathBuf};

const ADDITIONS_FILE: &str = "add";
const REMOVALS_FILE: &str = "remove";

#[derive(Debug, Clone)]
pub struct Index {
    /// Directory holding the staging files (`.twig/index`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, ObjectId>,
    removals: BTreeSet<PathBuf>,
    /// Set when the in-memory sets differ from disk
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load both staging files; missing files mean empty sets.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions = Self::read_entries(&self.path.join(ADDITIONS_FILE), true)?
            .into_iter()
            .filter_map(|entry| entry.oid.map(|oid| (entry.path, oid)))
            .collect();
        self.removals = Self::read_entries(&self.path.join(REMOVALS_FILE), false)?
            .into_iter()
            .map(|entry| entry.path)
            .collect();
        self.changed = false;

        Ok(())
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let additions = self
            .additions
            .iter()
            .map(|(path, oid)| IndexEntry::new(path.clone(), Some(oid.clone())))
            .collect::<Vec<_>>();
        let removals = self
            .removals
            .iter()
            .map(|path| IndexEntry::new(path.clone(), None))
            .collect::<Vec<_>>();

        Self::write_entries(&self.path.join(ADDITIONS_FILE), &additions)?;
        Self::write_entries(&self.path.join(REMOVALS_FILE), &removals)?;
        self.changed = false;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "staging area written"
        );

        Ok(())
    }

    /// Stage `oid` as the next content of `path`, cancelling a pending removal.
    pub fn stage_addition(&mut self, path: PathBuf, oid: ObjectId) {
        self.removals.remove(&path);
        self.additions.insert(path, oid);
        self.changed = true;
    }

    /// Stage the removal of `path`, cancelling a pending addition.
    pub fn stage_removal(&mut self, path: PathBuf) {
        self.additions.remove(&path);
        self.removals.insert(path);
        self.changed = true;
    }

    /// Forget everything staged for `path`.
    pub fn unstage(&mut self, path: &Path) {
        let removed_addition = self.additions.remove(path).is_some();
        let removed_removal = self.removals.remove(path);
        self.changed |= removed_addition || removed_removal;
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }
        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn staged_blob(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    fn read_entries(file_path: &Path, with_oid: bool) -> anyhow::Result<Vec<IndexEntry>> {
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read(file_path)
            .with_context(|| format!("Unable to read staging file {}", file_path.display()))?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = Checksum::new(Cursor::new(content));
        let header = IndexHeader::parse(&reader.read(HEADER_SIZE)?)?;

        let entries = (0..header.entries_count)
            .map(|_| IndexEntry::read_from(&mut reader, with_oid))
            .collect::<anyhow::Result<Vec<_>>>()?;
        reader
            .verify()
            .with_context(|| format!("Corrupted staging file {}", file_path.display()))?;

        Ok(entries)
    }

    fn write_entries(file_path: &Path, entries: &[IndexEntry]) -> anyhow::Result<()> {
        let mut writer = Checksum::new(Vec::new());

        writer.write(&IndexHeader::for_entries(entries.len() as u32).serialize()?)?;
        for entry in entries {
            entry.write_to(&mut writer)?;
        }
        writer.write_checksum()?;

        write_atomic(file_path, &writer.into_inner())
    }
}
