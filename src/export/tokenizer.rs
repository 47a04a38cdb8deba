//! Record line tokenizer.
//!
//! A data line has the shape `partition,offset,timestamp,key,value` where
//! `key` and `value` may each be wrapped in single quotes that are not part
//! of the content. Quotes inside the content are not escaped, so the
//! boundaries of quoted fields are guessed:
//!
//! - a quoted key ends at the first `',` after its opening quote, so a key
//!   may contain commas but not the sequence `',`
//! - a quoted value ends at the last `'` of the line
//!
//! The second rule truncates values whose content contains a quote but whose
//! closing quote is missing, e.g. `'{"name":"pam's blog"}` yields
//! `{"name":"pam`. Consumers rely on this exact behavior, so it is kept and
//! reported through [`Diagnostic::UnexpectedClosingQuote`] when the cut is
//! obviously suspicious.
//!
//! All positions refer to the original line. A delimiter that is not found
//! makes its field extend to the end of the line (terminator excluded) and
//! leaves every following field empty.

use std::fmt;

use super::record::{FieldName, FieldSpan, Record};
use crate::text::{find_from, logical_len};

/// Shortest raw line, terminator included, that is handed to [`tokenize`].
///
/// `1,2,3,,\n` is the smallest line with all delimiters present.
pub const MIN_RECORD_LINE_LEN: usize = 8;

const COMMA: &[u8] = b",";
const QUOTE: u8 = b'\'';
const QUOTE_COMMA: &[u8] = b"',";

/// Bytes allowed between a value's closing quote and the end of the line
/// before the quote position is reported.
const MAX_TRAILING_AFTER_CLOSING_QUOTE: usize = 2;

/// A non-fatal problem found while tokenizing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field that should carry data is empty.
    EmptyField(FieldName),
    /// The closing quote of a quoted value sits well before the end of the
    /// line, so the value was probably truncated at a quote in its content.
    UnexpectedClosingQuote { trailing: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyField(field) => {
                write!(f, "Encountered unexpected empty field '{}'", field)
            }
            Diagnostic::UnexpectedClosingQuote { trailing } => write!(
                f,
                "Encountered unexpected position of token ' while parsing field value \
                 ({} bytes follow the closing quote)",
                trailing
            ),
        }
    }
}

/// Result of tokenizing one line: the record plus anything worth a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub record: Record,
    pub diagnostics: Vec<Diagnostic>,
}

/// Span of a field and the position where the next field starts.
struct Split {
    span: FieldSpan,
    next: usize,
}

/// Splits one data line into its record fields.
///
/// Never fails: malformed lines produce partially filled records and
/// diagnostics. Whether such a record is usable is up to the caller.
///
/// ```
/// use export_unpack::export::tokenize;
///
/// let tokenized = tokenize(b"0,17,1691500000000,'a,b','hello world'\r\n");
/// assert_eq!(tokenized.record.key, b"a,b");
/// assert_eq!(tokenized.record.value, b"hello world");
/// assert!(tokenized.diagnostics.is_empty());
/// ```
#[must_use]
pub fn tokenize(line: &[u8]) -> Tokenized {
    let end = logical_len(line);

    let partition = plain_field(line, 0, end);
    let offset = plain_field(line, partition.next, end);
    let timestamp = plain_field(line, offset.next, end);
    let key = key_field(line, timestamp.next, end);
    let (value, quote_warning) = value_field(line, key.next, end);

    let record = Record {
        partition: partition.span.slice(line).to_vec(),
        offset: offset.span.slice(line).to_vec(),
        timestamp: timestamp.span.slice(line).to_vec(),
        key: key.span.slice(line).to_vec(),
        value: value.slice(line).to_vec(),
    };

    let diagnostics = [FieldName::Partition, FieldName::Offset, FieldName::Timestamp]
        .into_iter()
        .filter(|name| record.field(*name).is_empty())
        .map(Diagnostic::EmptyField)
        .chain(quote_warning)
        .collect();

    Tokenized {
        record,
        diagnostics,
    }
}

/// A field terminated by a plain comma.
fn plain_field(line: &[u8], start: usize, end: usize) -> Split {
    let start = start.min(end);
    match find_from(line, COMMA, start, end) {
        Some(comma) => Split {
            span: FieldSpan::new(start, comma),
            next: comma + COMMA.len(),
        },
        None => Split {
            span: FieldSpan::new(start, end),
            next: end,
        },
    }
}

/// The key, which may be wrapped in single quotes.
fn key_field(line: &[u8], start: usize, end: usize) -> Split {
    let start = start.min(end);
    if !starts_with_quote(line, start, end) {
        return plain_field(line, start, end);
    }

    let content = start + 1;
    match find_from(line, QUOTE_COMMA, content, end) {
        Some(closing) => Split {
            span: FieldSpan::new(content, closing),
            next: closing + QUOTE_COMMA.len(),
        },
        None => Split {
            span: FieldSpan::new(content, end),
            next: end,
        },
    }
}

/// The value, which runs to the end of the line and may be wrapped in
/// single quotes.
fn value_field(line: &[u8], start: usize, end: usize) -> (FieldSpan, Option<Diagnostic>) {
    let start = start.min(end);
    if !starts_with_quote(line, start, end) {
        return (FieldSpan::new(start, end), None);
    }

    let content = start + 1;
    match line[content..end].iter().rposition(|&b| b == QUOTE) {
        Some(idx) => {
            let closing = content + idx;
            let trailing = end - closing;
            let warning = (trailing > MAX_TRAILING_AFTER_CLOSING_QUOTE)
                .then_some(Diagnostic::UnexpectedClosingQuote { trailing });
            (FieldSpan::new(content, closing), warning)
        }
        // Only the opening quote: keep it as the value.
        None => (FieldSpan::new(start, content), None),
    }
}

fn starts_with_quote(line: &[u8], start: usize, end: usize) -> bool {
    start < end && line[start] == QUOTE
}
