//! Record types produced by the tokenizer.

use std::fmt;

use crate::text::display_bytes;

/// Names the five record fields.
///
/// Only partition, offset and timestamp are reported as empty in
/// diagnostics; key and value may legitimately be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Partition,
    Offset,
    Timestamp,
    Key,
    Value,
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldName::Partition => "partition",
            FieldName::Offset => "offset",
            FieldName::Timestamp => "timestamp",
            FieldName::Key => "key",
            FieldName::Value => "value",
        };
        f.write_str(name)
    }
}

/// Half-open byte range `[start, end)` into the line being tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub start: usize,
    pub end: usize,
}

impl FieldSpan {
    /// Creates a span, collapsing it to empty when `start > end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end,
        }
    }

    /// The bytes covered by this span, or nothing if it lies outside `line`.
    #[must_use]
    pub fn slice<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        line.get(self.start..self.end).unwrap_or_default()
    }
}

/// One parsed data line of an export.
///
/// Fields are raw bytes as found in the line, minus any single quotes that
/// only served as delimiters. Nothing is trimmed or unescaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub partition: Vec<u8>,
    pub offset: Vec<u8>,
    pub timestamp: Vec<u8>,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Record {
    /// The bytes of the given field.
    #[must_use]
    pub fn field(&self, name: FieldName) -> &[u8] {
        match name {
            FieldName::Partition => &self.partition,
            FieldName::Offset => &self.offset,
            FieldName::Timestamp => &self.timestamp,
            FieldName::Key => &self.key,
            FieldName::Value => &self.value,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "partition=[{}], offset=[{}], timestamp=[{}], key=[{}], value=[{}]",
            display_bytes(&self.partition),
            display_bytes(&self.offset),
            display_bytes(&self.timestamp),
            display_bytes(&self.key),
            display_bytes(&self.value),
        )
    }
}
