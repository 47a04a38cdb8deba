//! Export Unpack Library
//!
//! This library provides the core functionality for the export-unpack CLI
//! tool. It includes modules for CLI argument parsing, export header and
//! record parsing, and writing records to a directory tree.

pub mod cli;
pub mod error;
pub mod export;
pub mod sink;
pub mod text;
pub mod unpacker;
