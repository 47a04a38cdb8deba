//! Property-based tests for CLI argument parsing

use clap::Parser;
use proptest::prelude::*;
use std::path::PathBuf;

use export_unpack::cli::Args;

/// Strategy for generating export file paths
fn file_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,10}\\.export".prop_map(PathBuf::from),
        "[a-z][a-z0-9]{0,5}/[a-z][a-z0-9]{0,5}\\.txt".prop_map(PathBuf::from),
    ]
}

fn output_dir_strategy() -> impl Strategy<Value = PathBuf> {
    "[a-z][a-z0-9_]{0,10}".prop_map(PathBuf::from)
}

proptest! {
    /// Positional files are kept in the order given.
    #[test]
    fn prop_files_preserve_order(files in prop::collection::vec(file_path_strategy(), 0..6)) {
        let mut argv = vec!["export-unpack".to_string()];
        argv.extend(files.iter().map(|p| p.display().to_string()));

        let args = Args::try_parse_from(argv).unwrap();

        prop_assert_eq!(&args.files, &files);
        prop_assert_eq!(args.reads_stdin(), files.is_empty());
    }

    /// The output directory may appear before or after the files.
    #[test]
    fn prop_output_dir_position_is_free(
        file in file_path_strategy(),
        dir in output_dir_strategy(),
        before in any::<bool>(),
    ) {
        let file_arg = file.display().to_string();
        let dir_arg = dir.display().to_string();
        let argv: Vec<&str> = if before {
            vec!["export-unpack", "--output-dir", &dir_arg, &file_arg]
        } else {
            vec!["export-unpack", &file_arg, "--output-dir", &dir_arg]
        };

        let args = Args::try_parse_from(argv).unwrap();

        prop_assert_eq!(args.output_dir, dir);
        prop_assert_eq!(args.files, vec![file]);
    }
}
