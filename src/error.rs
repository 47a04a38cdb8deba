//! Error module
//!
//! Defines the error type shared by the export reader, the record sink and
//! the command-line driver. Only conditions that stop processing live here;
//! per-record problems are reported as [`crate::export::Diagnostic`]s instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::export::HeaderField;
use crate::text::ExtractError;

/// The main error type for export unpacking.
///
/// # Error Categories
///
/// - **Input errors**: an input file could not be opened or read
/// - **Header errors**: one of the five metadata lines is missing its label
/// - **Output errors**: a directory of the output tree could not be created
/// - **Configuration errors**: invalid command-line arguments
///
/// # Example
///
/// ```rust,ignore
/// use export_unpack::error::UnpackError;
///
/// fn example() -> Result<(), UnpackError> {
///     let file = std::fs::File::open("export.txt")?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum UnpackError {
    /// General I/O error while reading an input stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file named on the command line could not be opened.
    #[error("Cannot open file: {}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A header line lacks its label or its line terminator.
    ///
    /// Every export starts with five labeled lines. Without them the
    /// output location of the records is unknown, so the whole run stops.
    #[error("Failed to extract {field} from line {line_number}: {source}")]
    MissingHeaderField {
        field: HeaderField,
        line_number: u64,
        #[source]
        source: ExtractError,
    },

    /// A directory of the output tree could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid command-line argument, reported by [`crate::cli::Args::validate`].
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
