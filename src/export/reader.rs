//! Line source for export files.

use std::io::BufRead;

use crate::error::UnpackError;
use crate::text::LF;

/// One line of input including its original terminator bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number within the input.
    pub number: u64,
    pub bytes: Vec<u8>,
}

/// Reads an export stream line by line without decoding it.
///
/// Lines are split on `\n` only; a preceding `\r` stays part of the line, as
/// does a lone `\r`. The final line may lack a terminator.
pub struct ExportReader<R> {
    reader: R,
    line_number: u64,
}

impl<R: BufRead> ExportReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }

    /// Reads the next line, or `None` at end of stream.
    pub fn read_next(&mut self) -> Option<Result<RawLine, UnpackError>> {
        let mut bytes = Vec::new();
        match self.reader.read_until(LF, &mut bytes) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(Ok(RawLine {
                    number: self.line_number,
                    bytes,
                }))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

impl<R: BufRead> Iterator for ExportReader<R> {
    type Item = Result<RawLine, UnpackError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next()
    }
}
