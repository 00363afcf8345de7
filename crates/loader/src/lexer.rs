//! Line scanner for LS-8 program text.

use crate::error::LoadError;

/// Lines whose first token starts with this are comments.
pub(crate) const COMMENT: char = '#';

/// Scan a single line of program text.
///
/// Returns `None` for blank lines and comment lines. Otherwise the first
/// whitespace-separated token must be a binary literal that fits in a byte;
/// anything after it on the line is ignored, which is how inline comments
/// like `10000010 # LDI R0,8` work.
pub(crate) fn scan_line(line: &str, line_num: usize) -> Result<Option<u8>, LoadError> {
    let Some(token) = line.split_whitespace().next() else {
        return Ok(None);
    };
    if token.starts_with(COMMENT) {
        return Ok(None);
    }

    u8::from_str_radix(token, 2)
        .map(Some)
        .map_err(|_| LoadError::MalformedLine {
            line: line_num,
            token: token.to_string(),
        })
}
