//! Export file module
//!
//! Reads topic reader export files: a five line metadata header followed by
//! one comma separated record per line.

pub mod header;
pub mod reader;
pub mod record;
pub mod tokenizer;

pub use header::{ExportHeader, HeaderField};
pub use reader::{ExportReader, RawLine};
pub use record::{FieldName, FieldSpan, Record};
pub use tokenizer::{tokenize, Diagnostic, Tokenized, MIN_RECORD_LINE_LEN};
