//! Export metadata header.
//!
//! The first five lines of every export carry a fixed label followed by the
//! value, e.g. `environment: production`. Labels are padded to equal width
//! by the exporting tool and must match exactly.

use std::fmt;

use crate::error::UnpackError;
use crate::text::{extract_between, CR, LF};

/// One of the five labeled header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Environment,
    Topic,
    SearchValue,
    TimeFrom,
    TimeTo,
}

impl HeaderField {
    /// All header fields in file order.
    pub const ALL: [HeaderField; 5] = [
        HeaderField::Environment,
        HeaderField::Topic,
        HeaderField::SearchValue,
        HeaderField::TimeFrom,
        HeaderField::TimeTo,
    ];

    /// 1-based line number this field is expected on.
    #[must_use]
    pub fn line_number(self) -> u64 {
        match self {
            HeaderField::Environment => 1,
            HeaderField::Topic => 2,
            HeaderField::SearchValue => 3,
            HeaderField::TimeFrom => 4,
            HeaderField::TimeTo => 5,
        }
    }

    /// The label preceding the value, including its padding and separator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HeaderField::Environment => "environment: ",
            HeaderField::Topic => "topic      : ",
            HeaderField::SearchValue => "searchValue: ",
            HeaderField::TimeFrom => "timeFrom   : ",
            HeaderField::TimeTo => "timeTo     : ",
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeaderField::Environment => "environment",
            HeaderField::Topic => "topic",
            HeaderField::SearchValue => "search_value",
            HeaderField::TimeFrom => "time_from",
            HeaderField::TimeTo => "time_to",
        };
        f.write_str(name)
    }
}

/// Metadata of one export file.
///
/// Only `environment` and `topic` influence where records are written; the
/// search filter and time range are kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportHeader {
    pub environment: Vec<u8>,
    pub topic: Vec<u8>,
    pub search_value: Vec<u8>,
    pub time_from: Vec<u8>,
    pub time_to: Vec<u8>,
}

impl ExportHeader {
    /// Reads the value of `field` from its header line.
    ///
    /// `line` must still carry its `\n` terminator; a header line without
    /// one, or without the label of `field`, is rejected.
    pub fn read_field(&mut self, field: HeaderField, line: &[u8]) -> Result<(), UnpackError> {
        let value = extract_between(line, field.label().as_bytes(), &[LF]).map_err(|source| {
            UnpackError::MissingHeaderField {
                field,
                line_number: field.line_number(),
                source,
            }
        })?;
        let value = value.strip_suffix(&[CR]).unwrap_or(value);

        *self.field_mut(field) = value.to_vec();
        Ok(())
    }

    fn field_mut(&mut self, field: HeaderField) -> &mut Vec<u8> {
        match field {
            HeaderField::Environment => &mut self.environment,
            HeaderField::Topic => &mut self.topic,
            HeaderField::SearchValue => &mut self.search_value,
            HeaderField::TimeFrom => &mut self.time_from,
            HeaderField::TimeTo => &mut self.time_to,
        }
    }
}
