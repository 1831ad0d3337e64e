//! Core utilities and shared types
//!
//! - `PagerWriter`: `std::io::Write` adapter over the minus pager
//! - `write_atomic`: temp file + rename, used for objects, refs and the index

use anyhow::Context;
use derive_new::new;
use fake::rand;
use minus::Pager;
use std::io::{self, Write};
use std::path::Path;

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so `log` and
/// `global-log` write through this adapter when their output is paged.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Replace the file at `path` with `content` in one step.
///
/// The bytes go to a sibling temp file which is then renamed over `path`, so
/// readers observe either the old or the new content. Parent directories are
/// created on demand.
pub fn write_atomic(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("Invalid file path {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Unable to create directory {}", parent.display()))?;

    let temp_path = parent.join(format!("tmp-{}", rand::random::<u32>()));
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Unable to open temp file {}", temp_path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Unable to write temp file {}", temp_path.display()))?;
    drop(file);

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Unable to rename temp file to {}", path.display()))?;

    Ok(())
}
