//! Object store
//!
//! Every object lives in `.twig/objects/<2 hex>/<38 hex>`, zlib-compressed.
//! Objects are immutable: a store of an existing id is a no-op, so writes are
//! idempotent, and each write is a temp file renamed into place.

use crate::artifacts::core::write_atomic;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::Path;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Persist `object` unless an object with the same id already exists.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::digest(&object_content);
        if self.contains(&object_id) {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let compressed = Self::compress(object_content)?;
        write_atomic(&self.path.join(object_id.to_path()), &compressed)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Raw (decompressed) bytes of an object, header included
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(RepositoryError::ObjectNotFound(object_id.to_string()).into());
        }

        let object_content = std::fs::read(&object_path).with_context(|| {
            format!("Unable to read object file {}", object_path.display())
        })?;

        Self::decompress(object_content.into())
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader),
            actual => Err(Self::kind_mismatch(object_id, ObjectType::Blob, actual)),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader),
            actual => Err(Self::kind_mismatch(object_id, ObjectType::Commit, actual)),
        }
    }

    /// The commit stored under `object_id`, or `None` for any other kind
    pub fn parse_object_if_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader).map(Some),
            _ => Ok(None),
        }
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    /// Find all objects whose id starts with `prefix`.
    ///
    /// Prefixes of two or more characters only scan their fan-out directory.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();

        if prefix.len() < 2 {
            return Ok(self
                .list_objects()?
                .into_iter()
                .filter(|oid| oid.as_ref().starts_with(&prefix))
                .collect());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let mut matches = self
            .list_fan_out_dir(dir_name)?
            .into_iter()
            .filter(|oid| oid.as_ref()[2..].starts_with(file_prefix))
            .collect::<Vec<_>>();
        matches.sort();

        Ok(matches)
    }

    /// Every stored object id, sorted
    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut objects = Vec::new();
        if !self.path.is_dir() {
            return Ok(objects);
        }

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to read directory {}", self.path.display()))?
        {
            let dir_name = entry?.file_name().to_string_lossy().to_string();
            if dir_name.len() == 2 && dir_name.chars().all(|c| c.is_ascii_hexdigit()) {
                objects.extend(self.list_fan_out_dir(&dir_name)?);
            }
        }
        objects.sort();

        Ok(objects)
    }

    fn list_fan_out_dir(&self, dir_name: &str) -> anyhow::Result<Vec<ObjectId>> {
        let dir_path = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut objects = Vec::new();
        for entry in std::fs::read_dir(&dir_path)
            .with_context(|| format!("Unable to read directory {}", dir_path.display()))?
        {
            let file_name = entry?.file_name();
            // temp files of interrupted writes are skipped here
            if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{}", file_name.to_string_lossy()))
            {
                objects.push(oid);
            }
        }

        Ok(objects)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn kind_mismatch(object_id: &ObjectId, expected: ObjectType, actual: ObjectType) -> anyhow::Error {
        RepositoryError::ObjectKindMismatch {
            oid: object_id.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
        .into()
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }
}

/// Parent links and timestamps of commits, loaded once per walk
pub trait CommitStore {
    fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit>;
}

/// Memoizing `CommitStore` over the object database
pub struct CommitCache<'d> {
    database: &'d Database,
    commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl<'d> CommitCache<'d> {
    pub fn new(database: &'d Database) -> Self {
        CommitCache {
            database,
            commits: RefCell::new(HashMap::new()),
        }
    }
}

impl CommitStore for CommitCache<'_> {
    fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        if let Some(commit) = self.commits.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let commit = self
            .database
            .parse_object_as_commit(oid)
            .map_err(|error| {
                if matches!(
                    error.downcast_ref::<RepositoryError>(),
                    Some(RepositoryError::ObjectNotFound(_))
                ) {
                    RepositoryError::CommitNotFound(oid.to_string()).into()
                } else {
                    error
                }
            })?
            .to_slim(oid.clone());
        self.commits.borrow_mut().insert(oid.clone(), commit.clone());

        Ok(commit)
    }
}
