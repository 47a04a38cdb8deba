//! Byte-level text helpers.
//!
//! Export files are not guaranteed to be valid UTF-8, so everything here
//! works on `&[u8]`. Searches report a missing delimiter as `None`; callers
//! decide what "not found" means for their span.

use std::fmt;

/// Line feed terminator.
pub const LF: u8 = b'\n';
/// Carriage return, optionally preceding [`LF`].
pub const CR: u8 = b'\r';

/// Returns the index of the first occurrence of `needle` in
/// `haystack[from..until]`.
///
/// A match must fit entirely before `until`. An empty needle, `from > until`
/// or an `until` past the end of `haystack` never match.
#[must_use]
pub fn find_from(haystack: &[u8], needle: &[u8], from: usize, until: usize) -> Option<usize> {
    if needle.is_empty() || from > until || until > haystack.len() {
        return None;
    }
    haystack[from..until]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|idx| from + idx)
}

/// Length of `line` without its trailing line terminator.
///
/// Strips at most one `\n` and then at most one `\r`:
///
/// ```
/// use export_unpack::text::logical_len;
///
/// assert_eq!(logical_len(b"123\r\n"), 3);
/// assert_eq!(logical_len(b"123\n"), 3);
/// assert_eq!(logical_len(b"123\r"), 3);
/// assert_eq!(logical_len(b"123"), 3);
/// assert_eq!(logical_len(b"123\r\n\r\n"), 5);
/// ```
#[must_use]
pub fn logical_len(line: &[u8]) -> usize {
    let mut len = line.len();
    if len > 0 && line[len - 1] == LF {
        len -= 1;
    }
    if len > 0 && line[len - 1] == CR {
        len -= 1;
    }
    len
}

/// Which delimiter [`extract_between`] could not find.
///
/// For header lines the left delimiter is the label and the right one the
/// line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    LeftNotFound,
    RightNotFound,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::LeftNotFound => write!(f, "label not found"),
            ExtractError::RightNotFound => write!(f, "line terminator not found"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Returns the bytes between the first `left` and the next `right` after it.
///
/// Neither delimiter is part of the result. The search for `right` starts
/// directly after `left`, so adjacent delimiters yield an empty slice.
///
/// ```
/// use export_unpack::text::extract_between;
///
/// assert_eq!(extract_between(b"A,FOO,Z", b",", b","), Ok(&b"FOO"[..]));
/// ```
pub fn extract_between<'a>(
    line: &'a [u8],
    left: &[u8],
    right: &[u8],
) -> Result<&'a [u8], ExtractError> {
    let start =
        find_from(line, left, 0, line.len()).ok_or(ExtractError::LeftNotFound)? + left.len();
    let end = find_from(line, right, start, line.len()).ok_or(ExtractError::RightNotFound)?;
    Ok(&line[start..end])
}

/// Renders bytes for a human-readable message, replacing invalid UTF-8.
#[must_use]
pub fn display_bytes(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
