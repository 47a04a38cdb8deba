//! export-unpack - Unpack topic reader export files
//!
//! Reads export files (or standard input) and writes every record to
//! `<environment>/<topic>/<partition>/<offset>.json5` below the output
//! directory.
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | Input error (unopenable file, unreadable stream, malformed header) |
//! | 4 | Output tree could not be created |
//!
//! Record warnings go to standard output, errors to standard error. Set
//! `RUST_LOG=debug` to trace every parsed record.

use clap::Parser;
use std::io;
use std::process::ExitCode;

use export_unpack::cli::Args;
use export_unpack::error::UnpackError;
use export_unpack::sink::FileSink;
use export_unpack::unpacker::Unpacker;

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for input errors
const EXIT_INPUT_ERROR: u8 = 3;
/// Exit code for output tree errors
const EXIT_OUTPUT_ERROR: u8 = 4;

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(error_to_exit_code(&e));
    }

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Log output goes to stderr so it never mixes with record warnings.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), UnpackError> {
    let output_dir = args.output_dir();
    if !output_dir.is_dir() {
        std::fs::create_dir_all(output_dir).map_err(|source| UnpackError::CreateDirectory {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let mut unpacker = Unpacker::new(FileSink::new(output_dir), io::stdout());

    if args.reads_stdin() {
        tracing::info!("Unpacking standard input");
        unpacker.unpack(io::stdin().lock())?;
    } else {
        for path in &args.files {
            unpacker.unpack_path(path)?;
        }
    }

    if args.stats {
        eprintln!("{}", unpacker.stats());
    }
    Ok(())
}

/// Map an error to its process exit code.
fn error_to_exit_code(error: &UnpackError) -> u8 {
    match error {
        UnpackError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        UnpackError::Io(_) => EXIT_INPUT_ERROR,
        UnpackError::OpenInput { .. } => EXIT_INPUT_ERROR,
        UnpackError::MissingHeaderField { .. } => EXIT_INPUT_ERROR,
        UnpackError::CreateDirectory { .. } => EXIT_OUTPUT_ERROR,
    }
}
