//! Small shared helpers.

use crate::error::ErrorCode;
use crate::path::Segment;

/// Check if a string is non-empty and consists only of ASCII digits.
pub(crate) fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a segment as an index into a sequence of length `len`.
///
/// Classification: the null marker and non-digit text are `INDEX_EXPECTED`,
/// the empty segment is `EMPTY_SEGMENT`, and anything outside `[0, len)` —
/// overflow included — is `INDEX_OUT_OF_BOUNDS`.
pub(crate) fn parse_index(segment: &Segment, len: usize) -> Result<usize, (ErrorCode, String)> {
    let text = match segment {
        Segment::Null => {
            return Err((
                ErrorCode::IndexExpected,
                "null segment is not an index".to_string(),
            ))
        }
        Segment::Text(t) => t,
    };
    if text.is_empty() {
        return Err((
            ErrorCode::EmptySegment,
            "empty segment is not an index".to_string(),
        ));
    }
    if !is_integer(text) {
        return Err((
            ErrorCode::IndexExpected,
            format!("`{text}` is not an index"),
        ));
    }
    let index: usize = text.parse().map_err(|_| {
        (
            ErrorCode::IndexOutOfBounds,
            format!("index {text} out of bounds for length {len}"),
        )
    })?;
    if index >= len {
        return Err((
            ErrorCode::IndexOutOfBounds,
            format!("index {index} out of bounds for length {len}"),
        ));
    }
    Ok(index)
}
