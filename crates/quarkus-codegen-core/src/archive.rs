//! Zip archive output.
//!
//! [`ArchiveWriter`] wraps a [`zip::ZipWriter`] and enforces the two rules a
//! project archive depends on:
//! - entries are written strictly one after another (each `write_entry` call
//!   opens, fills and flushes exactly one entry; the `&mut` receiver rules out
//!   interleaving)
//! - every path is written at most once per run
//!
//! Timestamps are pinned to the zip epoch so identical input produces
//! byte-identical archives.

use std::collections::BTreeSet;
use std::io::{Seek, Write};

use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{CodegenError, Result};

/// Unix mode for regular files.
const FILE_MODE: u32 = 0o644;

/// Unix mode for scripts such as `mvnw`.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// One file of the generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Forward-slash path relative to the project root.
    pub path: String,
    pub content: Vec<u8>,
    /// Unix permissions; `None` means a regular `0o644` file.
    pub unix_mode: Option<u32>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            unix_mode: None,
        }
    }

    /// An entry extracted with the executable bit set.
    pub fn executable(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            unix_mode: Some(EXECUTABLE_MODE),
            ..Self::new(path, content)
        }
    }
}

/// Sequential, duplicate-checked writer over any seekable sink.
pub struct ArchiveWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    written: BTreeSet<String>,
    order: Vec<String>,
    /// Entry whose trailer is written by the next `start_file` or `finish`.
    open: Option<String>,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            zip: ZipWriter::new(sink),
            written: BTreeSet::new(),
            order: Vec::new(),
            open: None,
        }
    }

    /// Paths written so far, in write order.
    pub fn paths(&self) -> &[String] {
        &self.order
    }

    pub fn write(&mut self, entry: &ArchiveEntry) -> Result<()> {
        write_entry(self, &entry.path, &entry.content, entry.unix_mode)
    }

    /// Close the last entry and write the central directory.
    ///
    /// A failure is reported against the last entry when one is still open.
    pub fn finish(mut self) -> Result<W> {
        let open = self.open.take();
        self.zip.finish().map_err(|e| CodegenError::IoFailure {
            path: open.unwrap_or_else(|| "<central directory>".into()),
            source: into_io(e),
        })
    }
}

/// Open a new entry at `path`, write `content` and flush it to the sink.
///
/// The compressed data reaches the sink before this returns, so a failed write
/// names the entry whose bytes were lost. Starting a new entry closes the
/// previous one; a failure there is reported against the previous path. Any
/// sink failure is fatal for the run: the archive is incomplete and must be
/// discarded by the caller.
pub fn write_entry<W: Write + Seek>(
    archive: &mut ArchiveWriter<W>,
    path: &str,
    content: &[u8],
    unix_mode: Option<u32>,
) -> Result<()> {
    if !archive.written.insert(path.to_string()) {
        return Err(CodegenError::DuplicateEntry(path.to_string()));
    }

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(unix_mode.unwrap_or(FILE_MODE));

    let io_failure = |source: std::io::Error| CodegenError::IoFailure {
        path: path.to_string(),
        source,
    };

    let closing = archive.open.take();
    archive
        .zip
        .start_file(path, options)
        .map_err(|e| CodegenError::IoFailure {
            path: closing.unwrap_or_else(|| path.to_string()),
            source: into_io(e),
        })?;
    archive.open = Some(path.to_string());
    archive.zip.write_all(content).map_err(io_failure)?;
    archive.zip.flush().map_err(io_failure)?;
    archive.order.push(path.to_string());

    tracing::debug!(path, bytes = content.len(), "wrote archive entry");
    Ok(())
}

fn into_io(err: ZipError) -> std::io::Error {
    match err {
        ZipError::Io(e) => e,
        other => std::io::Error::other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn read_back(bytes: Vec<u8>, path: &str) -> (Vec<u8>, Option<u32>) {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = zip.by_name(path).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        (content, file.unix_mode())
    }

    #[test]
    fn test_entries_read_back_identical() {
        let mut archive = ArchiveWriter::new(Cursor::new(Vec::new()));
        archive
            .write(&ArchiveEntry::new("README.md", "# Hello\n"))
            .unwrap();
        archive
            .write(&ArchiveEntry::executable("mvnw", "#!/bin/sh\n"))
            .unwrap();
        assert_eq!(archive.paths(), ["README.md", "mvnw"]);

        let bytes = archive.finish().unwrap().into_inner();
        let (readme, readme_mode) = read_back(bytes.clone(), "README.md");
        assert_eq!(readme, b"# Hello\n");
        assert_eq!(readme_mode.map(|m| m & 0o777), Some(FILE_MODE));

        let (mvnw, mvnw_mode) = read_back(bytes, "mvnw");
        assert_eq!(mvnw, b"#!/bin/sh\n");
        assert_eq!(mvnw_mode.map(|m| m & 0o777), Some(EXECUTABLE_MODE));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let mut archive = ArchiveWriter::new(Cursor::new(Vec::new()));
        write_entry(&mut archive, ".gitignore", b"target/\n", None).unwrap();
        let err = write_entry(&mut archive, ".gitignore", b"again", None).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateEntry(p) if p == ".gitignore"));
        assert_eq!(archive.paths().len(), 1);
    }

    #[test]
    fn test_identical_input_identical_bytes() {
        let build = || {
            let mut archive = ArchiveWriter::new(Cursor::new(Vec::new()));
            archive.write(&ArchiveEntry::new("a.txt", "a")).unwrap();
            archive.write(&ArchiveEntry::new("b/c.txt", "c")).unwrap();
            archive.finish().unwrap().into_inner()
        };
        assert_eq!(build(), build());
    }

    /// A sink that accepts a fixed number of bytes, then reports a full disk.
    struct FullDisk {
        inner: Cursor<Vec<u8>>,
        remaining: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            self.inner.write(&buf[..n])
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FullDisk {
        fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn full_disk(remaining: usize) -> FullDisk {
        FullDisk {
            inner: Cursor::new(Vec::new()),
            remaining,
        }
    }

    /// Bytes that deflate barely compresses.
    fn noise(len: usize) -> Vec<u8> {
        let mut state: u32 = 0x2545_f491;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect()
    }

    #[test]
    fn test_sink_failure_is_io_failure() {
        let mut archive = ArchiveWriter::new(full_disk(8));
        let payload = vec![b'x'; 64 * 1024];
        let result = archive
            .write(&ArchiveEntry::new("big.bin", payload.clone()))
            .and_then(|_| archive.write(&ArchiveEntry::new("next.bin", payload)));
        assert!(matches!(
            result,
            Err(CodegenError::IoFailure { path, .. }) if path == "big.bin"
        ));
    }

    #[test]
    fn test_lost_data_names_its_own_entry() {
        // Room for the first local header, not for its data.
        let mut archive = ArchiveWriter::new(full_disk(60));
        let err = archive
            .write(&ArchiveEntry::executable("mvnw", noise(4000)))
            .unwrap_err();
        assert!(matches!(err, CodegenError::IoFailure { path, .. } if path == "mvnw"));
        assert!(archive.paths().is_empty());
    }
}
