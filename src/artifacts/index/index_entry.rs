//! Staging file record
//!
//! One record per staged path: a 2-byte path length, the path itself and,
//! for staged additions, the 20-byte blob id. Removal records carry no id.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use derive_new::new;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Maximum path length supported in staging records
const MAX_PATH_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Staged blob (additions only)
    pub oid: Option<ObjectId>,
}

impl IndexEntry {
    pub fn write_to<W: Write>(&self, writer: &mut Checksum<W>) -> anyhow::Result<()> {
        let path = self.path_str()?;
        if path.len() > MAX_PATH_SIZE {
            return Err(anyhow!("Path too long for staging file: {path}"));
        }

        let mut bytes = Vec::with_capacity(2 + path.len() + OBJECT_ID_LENGTH / 2);
        bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        bytes.write_all(path.as_bytes())?;
        if let Some(oid) = &self.oid {
            oid.write_h40_to(&mut bytes)?;
        }

        writer.write(&bytes)
    }

    pub fn read_from<R: Read>(reader: &mut Checksum<R>, with_oid: bool) -> anyhow::Result<Self> {
        let path_len = byteorder::NetworkEndian::read_u16(&reader.read(2)?) as usize;
        let path = String::from_utf8(reader.read(path_len)?.to_vec())
            .map_err(|_| anyhow!("Invalid path in staging file"))?;

        let oid = if with_oid {
            let raw = reader.read(OBJECT_ID_LENGTH / 2)?;
            Some(ObjectId::read_h40_from(&mut raw.as_ref())?)
        } else {
            None
        };

        Ok(IndexEntry::new(PathBuf::from(path), oid))
    }

    fn path_str(&self) -> anyhow::Result<String> {
        let parts = self
            .path
            .components()
            .map(|component| {
                component
                    .as_os_str()
                    .to_str()
                    .ok_or_else(|| anyhow!("Non UTF-8 path: {}", self.path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(parts.join("/"))
    }
}
