//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros.
//! Like classic UNIX filters the tool reads standard input when no file is
//! given and prints nothing unless something needs attention.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::UnpackError;

/// Command-line arguments for export unpacking.
///
/// Use the `validate()` method after parsing to ensure the arguments are usable.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use export_unpack::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "export-unpack")]
#[command(about = "Unpack topic reader export files into one file per record")]
#[command(version)]
pub struct Args {
    /// Export files to unpack (reads standard input when omitted)
    pub files: Vec<PathBuf>,

    /// Directory the environment/topic/partition tree is created in
    #[arg(short = 'C', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Print an unpack report to standard error when done
    #[arg(long, default_value = "false")]
    pub stats: bool,
}

impl Args {
    /// Validate the parsed arguments.
    ///
    /// - `--output-dir` must be a directory if it exists; a missing one is
    ///   created before unpacking
    ///
    /// Input files are not checked here: they are opened one after another
    /// and the first unopenable one stops the run.
    pub fn validate(&self) -> Result<(), UnpackError> {
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(UnpackError::InvalidArgument(format!(
                "--output-dir {} is not a directory",
                self.output_dir.display()
            )));
        }
        Ok(())
    }

    /// Whether input comes from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.files.is_empty()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
