//! Record sink module
//!
//! Materializes records as files below an output root:
//!
//! ```text
//! <root>/<environment>/<topic>/<partition>/<offset>.json5
//! ```
//!
//! Each file starts with a `//` comment line holding the record metadata,
//! followed by the value bytes exactly as they appeared in the export.

use std::ffi::OsString;
use std::fs::{DirBuilder, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::UnpackError;
use crate::export::{ExportHeader, Record};

/// Extension of the record files.
pub const RECORD_FILE_EXTENSION: &str = "json5";

/// What happened to a record handed to a [`RecordSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record file was written to the given path.
    Written(PathBuf),
    /// The record file could not be opened or written; the run continues.
    Skipped(PathBuf),
}

/// Destination for tokenized records.
pub trait RecordSink {
    /// Stores one record of the export described by `header`.
    ///
    /// Failing to prepare the location of a record is an error; failing to
    /// store the record itself is reported as [`WriteOutcome::Skipped`].
    fn write(&mut self, header: &ExportHeader, record: &Record)
        -> Result<WriteOutcome, UnpackError>;
}

/// Whether a record carries enough information to derive its file path.
#[must_use]
pub fn is_writable(header: &ExportHeader, record: &Record) -> bool {
    !header.environment.is_empty()
        && !header.topic.is_empty()
        && !record.partition.is_empty()
        && !record.offset.is_empty()
}

/// The metadata comment line that opens every record file.
///
/// Field bytes are copied as they appear in the export.
#[must_use]
pub fn metadata_line(header: &ExportHeader, record: &Record) -> Vec<u8> {
    let fields = [
        ("// environment=[", header.environment.as_slice()),
        ("], topic=[", header.topic.as_slice()),
        ("], partition=[", record.partition.as_slice()),
        ("], offset=[", record.offset.as_slice()),
        ("], timestamp=[", record.timestamp.as_slice()),
        ("], key=[", record.key.as_slice()),
    ];
    let mut line = Vec::new();
    for (label, value) in fields {
        line.extend_from_slice(label.as_bytes());
        line.extend_from_slice(value);
    }
    line.extend_from_slice(b"]\n");
    line
}

/// Writes each record to its own file below `root`.
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    /// Creates a sink rooted at `root`. The root itself must already exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file a record is written to.
    #[must_use]
    pub fn record_path(&self, header: &ExportHeader, record: &Record) -> PathBuf {
        self.root
            .join(path_component(header.environment.as_slice()))
            .join(path_component(header.topic.as_slice()))
            .join(path_component(record.partition.as_slice()))
            .join(record_file_name(record))
    }

    /// Creates every missing directory between the root and `path`.
    fn ensure_dirs(&self, path: &Path) -> Result<(), UnpackError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        let Ok(relative) = parent.strip_prefix(&self.root) else {
            return Ok(());
        };
        let mut dir = self.root.clone();
        for component in relative.components() {
            dir.push(component);
            if !dir.is_dir() {
                dir_builder()
                    .create(&dir)
                    .map_err(|source| UnpackError::CreateDirectory {
                        path: dir.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

impl RecordSink for FileSink {
    fn write(
        &mut self,
        header: &ExportHeader,
        record: &Record,
    ) -> Result<WriteOutcome, UnpackError> {
        let path = self.record_path(header, record);
        self.ensure_dirs(&path)?;

        let result = File::create(&path).and_then(|mut file| {
            file.write_all(&metadata_line(header, record))?;
            file.write_all(&record.value)
        });

        match result {
            Ok(()) => Ok(WriteOutcome::Written(path)),
            Err(e) => {
                tracing::debug!("Could not write record file {}: {}", path.display(), e);
                Ok(WriteOutcome::Skipped(path))
            }
        }
    }
}

#[cfg(unix)]
fn dir_builder() -> DirBuilder {
    use std::os::unix::fs::DirBuilderExt;

    let mut builder = DirBuilder::new();
    builder.mode(0o775);
    builder
}

#[cfg(not(unix))]
fn dir_builder() -> DirBuilder {
    DirBuilder::new()
}

fn record_file_name(record: &Record) -> OsString {
    let mut file_name = path_component(&record.offset);
    file_name.push(".");
    file_name.push(RECORD_FILE_EXTENSION);
    file_name
}

/// Turns raw field bytes into a path component without re-encoding them.
#[cfg(unix)]
fn path_component(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;

    std::ffi::OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn path_component(bytes: &[u8]) -> OsString {
    OsString::from(crate::text::display_bytes(bytes).into_owned())
}
