//! Export unpacking driver.
//!
//! Streams an export through the header reader and the tokenizer and hands
//! complete records to a [`RecordSink`].
//!
//! # Example
//!
//! ```no_run
//! use export_unpack::sink::FileSink;
//! use export_unpack::unpacker::Unpacker;
//! use std::path::Path;
//!
//! let mut unpacker = Unpacker::new(FileSink::new("."), std::io::stdout());
//! unpacker.unpack_path(Path::new("orders.export")).unwrap();
//! println!("{}", unpacker.stats());
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::UnpackError;
use crate::export::{
    tokenize, ExportHeader, ExportReader, HeaderField, RawLine, MIN_RECORD_LINE_LEN,
};
use crate::sink::{is_writable, RecordSink, WriteOutcome};
use crate::text::display_bytes;

/// Counters collected across all inputs of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnpackStats {
    /// Number of input streams processed
    pub inputs: u64,
    /// Number of lines after the header
    pub data_lines: u64,
    /// Data lines dropped for being shorter than [`MIN_RECORD_LINE_LEN`]
    pub short_lines: u64,
    /// Records written to the sink
    pub records_written: u64,
    /// Records lacking environment, topic, partition or offset
    pub records_incomplete: u64,
    /// Records whose file could not be written
    pub files_not_written: u64,
    /// Warnings printed
    pub warnings: u64,
}

impl fmt::Display for UnpackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unpack Report")?;
        writeln!(f, "=============")?;
        writeln!(f, "  Inputs:             {:>10}", self.inputs)?;
        writeln!(f, "  Data lines:         {:>10}", self.data_lines)?;
        writeln!(f, "  Short lines:        {:>10}", self.short_lines)?;
        writeln!(f, "  Records written:    {:>10}", self.records_written)?;
        writeln!(f, "  Incomplete records: {:>10}", self.records_incomplete)?;
        writeln!(f, "  Files not written:  {:>10}", self.files_not_written)?;
        write!(f, "  Warnings:           {:>10}", self.warnings)
    }
}

/// Unpacks export streams into a sink, printing warnings to `out`.
///
/// Each input is processed to completion before the next one starts; the
/// header of one input never applies to another.
pub struct Unpacker<S, W> {
    sink: S,
    out: W,
    stats: UnpackStats,
}

impl<S: RecordSink, W: Write> Unpacker<S, W> {
    pub fn new(sink: S, out: W) -> Self {
        Self {
            sink,
            out,
            stats: UnpackStats::default(),
        }
    }

    pub fn stats(&self) -> &UnpackStats {
        &self.stats
    }

    /// Consumes the unpacker, returning its sink and warning writer.
    pub fn into_parts(self) -> (S, W) {
        (self.sink, self.out)
    }

    /// Opens `path` and unpacks it.
    pub fn unpack_path(&mut self, path: &Path) -> Result<(), UnpackError> {
        let file = File::open(path).map_err(|source| UnpackError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Unpacking {}", path.display());
        self.unpack(BufReader::new(file))
    }

    /// Unpacks one export stream.
    ///
    /// Fails on unreadable input, on a malformed header and when the output
    /// tree cannot be created. Problems with individual records are printed
    /// as warnings and never stop the stream.
    pub fn unpack<R: BufRead>(&mut self, input: R) -> Result<(), UnpackError> {
        self.stats.inputs += 1;

        let mut reader = ExportReader::new(input);
        let mut header = ExportHeader::default();

        for field in HeaderField::ALL {
            let Some(line) = reader.read_next() else {
                // Fewer than five lines: nothing to unpack.
                return Ok(());
            };
            header.read_field(field, &line?.bytes)?;
        }
        tracing::debug!(
            "Export header: environment=[{}], topic=[{}], searchValue=[{}], timeFrom=[{}], timeTo=[{}]",
            display_bytes(&header.environment),
            display_bytes(&header.topic),
            display_bytes(&header.search_value),
            display_bytes(&header.time_from),
            display_bytes(&header.time_to),
        );

        for line in reader {
            let line = line?;
            self.stats.data_lines += 1;
            if line.bytes.len() < MIN_RECORD_LINE_LEN {
                self.stats.short_lines += 1;
                continue;
            }
            self.unpack_record(&header, &line)?;
        }

        Ok(())
    }

    fn unpack_record(
        &mut self,
        header: &ExportHeader,
        line: &RawLine,
    ) -> Result<(), UnpackError> {
        let tokenized = tokenize(&line.bytes);
        let record = &tokenized.record;
        let raw = display_bytes(&line.bytes);

        for diagnostic in &tokenized.diagnostics {
            self.warn(format_args!(
                "{} in line {}: environment=[{}], topic=[{}], {}, line=[{}]",
                diagnostic,
                line.number,
                display_bytes(&header.environment),
                display_bytes(&header.topic),
                record,
                raw.trim_end_matches(['\r', '\n']),
            ))?;
        }

        tracing::debug!(
            "line={}: environment=[{}], topic=[{}], {}",
            line.number,
            display_bytes(&header.environment),
            display_bytes(&header.topic),
            record,
        );

        if !is_writable(header, record) {
            self.stats.records_incomplete += 1;
            return self.warn(format_args!(
                "Encountered incomplete data while parsing line {}. Cannot unpack record into file. \
                 environment=[{}], topic=[{}], {}",
                line.number,
                display_bytes(&header.environment),
                display_bytes(&header.topic),
                record,
            ));
        }

        match self.sink.write(header, record)? {
            WriteOutcome::Written(_) => self.stats.records_written += 1,
            WriteOutcome::Skipped(_) => self.stats.files_not_written += 1,
        }
        Ok(())
    }

    fn warn(&mut self, message: fmt::Arguments<'_>) -> Result<(), UnpackError> {
        self.stats.warnings += 1;
        writeln!(self.out, "Warning: {}", message)?;
        Ok(())
    }
}
