//! Escaped dotted-path model.
//!
//! A [`Path`] is an immutable sequence of [`Segment`]s parsed from a compact
//! string form: segments are separated by `.`, and `^` escapes the two
//! reserved characters inside a segment (`^.` is a literal dot, `^^` a
//! literal caret). Any other caret passes through literally. A segment
//! written exactly `^0` denotes the null-marker segment, which is distinct
//! from the empty string.

use std::fmt;
use std::ops::Index;
use std::slice;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::util::is_integer;

/// Separator between segments in the string form.
pub const SEPARATOR: char = '.';

/// Escape character used inside segments.
pub const ESCAPE: char = '^';

/// String form of the null-marker segment.
pub const NULL_SEGMENT: &str = "^0";

/// One atomic step of a [`Path`]: a property name, map key, or sequence
/// index.
///
/// The null marker is its own variant rather than an overloaded empty
/// string, so `a.^0.b` and `a..b` are different paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// The distinguished null marker, written `^0`.
    Null,
    /// A decoded segment string. May be empty.
    Text(String),
}

impl Segment {
    /// The segment text, or `None` for the null marker.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Segment::Null => None,
            Segment::Text(t) => Some(t),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Segment::Null)
    }

    /// True for a segment consisting only of ASCII digits.
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Text(t) if is_integer(t))
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Text(s.to_string())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Text(s)
    }
}

impl fmt::Display for Segment {
    /// Writes the parser-safe (escaped) form of the segment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Null => f.write_str(NULL_SEGMENT),
            Segment::Text(t) => f.write_str(&Path::escape(t)),
        }
    }
}

/// Error raised by bounds-checked path derivations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("segment index {index} out of range for path of size {size}")]
    IndexOutOfRange { index: isize, size: usize },
    #[error("subpath [{from}, {from}+{len}) out of range for path of size {size}")]
    RangeOutOfRange { from: isize, len: usize, size: usize },
}

/// A parsed, immutable traversal route through a nested value.
///
/// All derivations return new instances; equality and ordering are
/// segment-wise lexicographic.
///
/// # Example
///
/// ```
/// use pathwalk::{Path, Segment};
///
/// let path = Path::parse("identifications.0.scientificName.fullScientificName");
/// assert_eq!(path.size(), 4);
/// assert_eq!(path.segment(0), Some(&Segment::from("identifications")));
/// assert_eq!(path.segment(-1), Some(&Segment::from("fullScientificName")));
///
/// // The string form round-trips.
/// assert_eq!(Path::parse(&path.to_string()), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The canonical zero-length path.
    pub const EMPTY: Path = Path {
        segments: Vec::new(),
    };

    /// Parse the escaped dotted string form.
    ///
    /// Parsing cannot fail: every string has a decoding. Escape runs are
    /// resolved left to right in a single pass, so `a^^^.b` is the single
    /// segment `a^.b` and `^^^^^.` is the single segment `^^.`.
    ///
    /// ```
    /// use pathwalk::{Path, Segment};
    ///
    /// assert_eq!(Path::parse(""), Path::EMPTY);
    /// assert_eq!(Path::parse("a.b").size(), 2);
    /// assert_eq!(Path::parse("a^.b").size(), 1);
    /// assert_eq!(Path::parse("x.^0").segment(1), Some(&Segment::Null));
    /// ```
    pub fn parse(input: &str) -> Path {
        if input.is_empty() {
            return Path::EMPTY;
        }
        let mut segments = Vec::new();
        let mut decoded = String::new();
        let mut raw = String::new();
        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                SEPARATOR => {
                    segments.push(finish_segment(&raw, std::mem::take(&mut decoded)));
                    raw.clear();
                }
                ESCAPE => {
                    raw.push(ESCAPE);
                    match chars.peek() {
                        Some(&SEPARATOR) => {
                            chars.next();
                            raw.push(SEPARATOR);
                            decoded.push(SEPARATOR);
                        }
                        Some(&ESCAPE) => {
                            chars.next();
                            raw.push(ESCAPE);
                            decoded.push(ESCAPE);
                        }
                        _ => decoded.push(ESCAPE),
                    }
                }
                _ => {
                    raw.push(c);
                    decoded.push(c);
                }
            }
        }
        segments.push(finish_segment(&raw, decoded));
        Path { segments }
    }

    /// Build a path directly from segments.
    pub fn from_segments(segments: Vec<Segment>) -> Path {
        Path { segments }
    }

    /// Number of segments.
    pub fn size(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment at `index`; negative indices count from the end.
    pub fn segment(&self, index: isize) -> Option<&Segment> {
        self.resolve(index).map(|i| &self.segments[i])
    }

    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// New path with `segment` appended.
    pub fn append(&self, segment: impl Into<Segment>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Path { segments }
    }

    /// New path with all of `other` appended.
    pub fn append_path(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }

    /// New path without the first segment. The empty path shifts to itself.
    pub fn shift(&self) -> Path {
        if self.segments.is_empty() {
            return Path::EMPTY;
        }
        Path {
            segments: self.segments[1..].to_vec(),
        }
    }

    /// New path without the last segment, or `None` for the empty path.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Path {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The `len` segments starting at `from`; negative `from` counts from
    /// the end.
    ///
    /// ```
    /// use pathwalk::Path;
    ///
    /// let path = Path::parse("a.b.c");
    /// assert_eq!(path.subpath(1, 2).unwrap(), Path::parse("b.c"));
    /// assert_eq!(path.subpath(-2, 2).unwrap(), Path::parse("b.c"));
    /// assert!(path.subpath(2, 2).is_err());
    /// ```
    pub fn subpath(&self, from: isize, len: usize) -> Result<Path, PathError> {
        let size = self.segments.len();
        let start = self.resolve_inclusive(from).ok_or(PathError::RangeOutOfRange {
            from,
            len,
            size,
        })?;
        if start + len > size {
            return Err(PathError::RangeOutOfRange { from, len, size });
        }
        Ok(Path {
            segments: self.segments[start..start + len].to_vec(),
        })
    }

    /// The suffix starting at `from`; negative `from` counts from the end.
    pub fn subpath_from(&self, from: isize) -> Result<Path, PathError> {
        let size = self.segments.len();
        let start = self
            .resolve_inclusive(from)
            .ok_or(PathError::IndexOutOfRange { index: from, size })?;
        Ok(Path {
            segments: self.segments[start..].to_vec(),
        })
    }

    /// New path with the segment at `index` replaced; negative indices count
    /// from the end.
    pub fn replace(&self, index: isize, segment: impl Into<Segment>) -> Result<Path, PathError> {
        let i = self.resolve(index).ok_or(PathError::IndexOutOfRange {
            index,
            size: self.segments.len(),
        })?;
        let mut segments = self.segments.clone();
        segments[i] = segment.into();
        Ok(Path { segments })
    }

    /// The path without its all-numeric (index) segments: the shape of the
    /// route, independent of positions.
    ///
    /// ```
    /// use pathwalk::Path;
    ///
    /// let path = Path::parse("identifications.0.scientificName");
    /// assert_eq!(path.canonical(), Path::parse("identifications.scientificName"));
    /// ```
    pub fn canonical(&self) -> Path {
        Path {
            segments: self
                .segments
                .iter()
                .filter(|s| !s.is_index())
                .cloned()
                .collect(),
        }
    }

    /// True if `prefix` is a prefix of this path (every path starts with the
    /// empty path).
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Escape a string for use as a single segment in the string form.
    ///
    /// ```
    /// use pathwalk::Path;
    ///
    /// assert_eq!(Path::escape("identifications."), "identifications^.");
    /// assert_eq!(Path::escape("a^b"), "a^^b");
    /// assert_eq!(Path::escape("plain"), "plain");
    /// ```
    pub fn escape(segment: &str) -> String {
        if !segment.contains(SEPARATOR) && !segment.contains(ESCAPE) {
            return segment.to_string();
        }
        let mut out = String::with_capacity(segment.len() + 2);
        for c in segment.chars() {
            if c == SEPARATOR || c == ESCAPE {
                out.push(ESCAPE);
            }
            out.push(c);
        }
        out
    }

    fn resolve(&self, index: isize) -> Option<usize> {
        let size = self.segments.len() as isize;
        let i = if index < 0 { size + index } else { index };
        (0..size).contains(&i).then_some(i as usize)
    }

    /// Like `resolve`, but also admits the one-past-the-end position so a
    /// zero-length subpath at the end is representable.
    fn resolve_inclusive(&self, index: isize) -> Option<usize> {
        let size = self.segments.len() as isize;
        let i = if index < 0 { size + index } else { index };
        (0..=size).contains(&i).then_some(i as usize)
    }
}

fn finish_segment(raw: &str, decoded: String) -> Segment {
    if raw == NULL_SEGMENT {
        Segment::Null
    } else {
        Segment::Text(decoded)
    }
}

impl fmt::Display for Path {
    /// Writes the canonical string form, which [`Path::parse`] maps back to
    /// an equal path.
    ///
    /// The one exception is a hand-built path holding a single empty text
    /// segment: the grammar has no spelling for it, so it prints as the
    /// empty string and re-parses as [`Path::EMPTY`]. Parsing never
    /// produces that path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl Index<usize> for Path {
    type Output = Segment;

    fn index(&self, index: usize) -> &Segment {
        &self.segments[index]
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathVisitor;

        impl Visitor<'_> for PathVisitor {
            type Value = Path;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an escaped dotted-path string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Path, E> {
                Ok(Path::parse(v))
            }
        }

        deserializer.deserialize_str(PathVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(Path::parse(""), Path::EMPTY);
        assert_eq!(Path::parse("a"), Path::from_segments(vec![text("a")]));
        assert_eq!(
            Path::parse("a.b.c"),
            Path::from_segments(vec![text("a"), text("b"), text("c")])
        );
    }

    #[test]
    fn test_parse_empty_segments() {
        assert_eq!(Path::parse("."), Path::from_segments(vec![text(""), text("")]));
        assert_eq!(
            Path::parse("a..b"),
            Path::from_segments(vec![text("a"), text(""), text("b")])
        );
        assert_eq!(Path::parse("a."), Path::from_segments(vec![text("a"), text("")]));
    }

    #[test]
    fn test_parse_escapes() {
        assert_eq!(Path::parse("a^.b"), Path::from_segments(vec![text("a.b")]));
        assert_eq!(Path::parse("a^^b"), Path::from_segments(vec![text("a^b")]));
        assert_eq!(
            Path::parse("a^^.b"),
            Path::from_segments(vec![text("a^"), text("b")])
        );
    }

    #[test]
    fn test_parse_caret_runs() {
        // ^^ then ^. inside one segment
        assert_eq!(Path::parse("a^^^.b"), Path::from_segments(vec![text("a^.b")]));
        // five carets then a dot: ^^ ^^ ^.
        assert_eq!(Path::parse("^^^^^."), Path::from_segments(vec![text("^^.")]));
    }

    #[test]
    fn test_parse_stray_caret() {
        assert_eq!(Path::parse("a^b"), Path::from_segments(vec![text("a^b")]));
        assert_eq!(Path::parse("a^"), Path::from_segments(vec![text("a^")]));
        assert_eq!(Path::parse("^x"), Path::from_segments(vec![text("^x")]));
    }

    #[test]
    fn test_parse_null_marker() {
        assert_eq!(Path::parse("^0"), Path::from_segments(vec![Segment::Null]));
        assert_eq!(
            Path::parse("a.^0.b"),
            Path::from_segments(vec![text("a"), Segment::Null, text("b")])
        );
        // An escaped caret before the zero is the two-character string.
        assert_eq!(Path::parse("^^0"), Path::from_segments(vec![text("^0")]));
    }

    #[test]
    fn test_display_round_trip() {
        for input in [
            "",
            "a",
            "a.b.c",
            "a^.b",
            "a^^b",
            "a.^0.b",
            "^^0",
            "a..b",
            "a.",
            ".a",
            "identifications.0.scientificName.fullScientificName",
        ] {
            let path = Path::parse(input);
            assert_eq!(Path::parse(&path.to_string()), path, "input {input:?}");
        }
    }

    #[test]
    fn test_display_reencodes_stray_carets() {
        // `a^b` decodes to a literal caret, which prints back escaped.
        let path = Path::parse("a^b");
        assert_eq!(path.to_string(), "a^^b");
        assert_eq!(Path::parse(&path.to_string()), path);
    }

    #[test]
    fn test_segment_negative_index() {
        let path = Path::parse("a.b.c");
        assert_eq!(path.segment(0), Some(&text("a")));
        assert_eq!(path.segment(2), Some(&text("c")));
        assert_eq!(path.segment(-1), Some(&text("c")));
        assert_eq!(path.segment(-3), Some(&text("a")));
        assert_eq!(path.segment(3), None);
        assert_eq!(path.segment(-4), None);
    }

    #[test]
    fn test_append_shift_parent() {
        let path = Path::parse("a.b");
        assert_eq!(path.append("c"), Path::parse("a.b.c"));
        assert_eq!(path.shift(), Path::parse("b"));
        assert_eq!(Path::EMPTY.shift(), Path::EMPTY);
        assert_eq!(path.parent(), Some(Path::parse("a")));
        assert_eq!(Path::parse("a").parent(), Some(Path::EMPTY));
        assert_eq!(Path::EMPTY.parent(), None);
        // the source is untouched
        assert_eq!(path, Path::parse("a.b"));
    }

    #[test]
    fn test_append_path() {
        let head = Path::parse("a.b");
        let tail = Path::parse("c.d");
        assert_eq!(head.append_path(&tail), Path::parse("a.b.c.d"));
        assert_eq!(head.append_path(&Path::EMPTY), head);
    }

    #[test]
    fn test_subpath() {
        let path = Path::parse("a.b.c");
        assert_eq!(path.subpath(1, 2).unwrap(), Path::parse("b.c"));
        assert_eq!(path.subpath(0, 3).unwrap(), path);
        assert_eq!(path.subpath(-2, 2).unwrap(), Path::parse("b.c"));
        assert_eq!(path.subpath(1, 0).unwrap(), Path::EMPTY);
        assert!(path.subpath(1, 3).is_err());
        assert!(path.subpath(4, 0).is_err());
        assert!(path.subpath(-4, 1).is_err());
    }

    #[test]
    fn test_subpath_from() {
        let path = Path::parse("a.b.c");
        assert_eq!(path.subpath_from(1).unwrap(), Path::parse("b.c"));
        assert_eq!(path.subpath_from(-1).unwrap(), Path::parse("c"));
        assert_eq!(path.subpath_from(3).unwrap(), Path::EMPTY);
        assert!(path.subpath_from(4).is_err());
    }

    #[test]
    fn test_replace() {
        let path = Path::parse("a.b.c");
        assert_eq!(path.replace(1, "x").unwrap(), Path::parse("a.x.c"));
        assert_eq!(path.replace(-1, "z").unwrap(), Path::parse("a.b.z"));
        assert!(path.replace(3, "x").is_err());
    }

    #[test]
    fn test_canonical() {
        assert_eq!(
            Path::parse("identifications.0.scientificName").canonical(),
            Path::parse("identifications.scientificName")
        );
        assert_eq!(Path::parse("0.1.2").canonical(), Path::EMPTY);
        // null markers and empty segments are not indices
        assert_eq!(Path::parse("a.^0..7").canonical(), Path::parse("a.^0."));
    }

    #[test]
    fn test_starts_with() {
        let path = Path::parse("a.b.c");
        assert!(path.starts_with(&Path::parse("a.b")));
        assert!(path.starts_with(&path));
        assert!(path.starts_with(&Path::EMPTY));
        assert!(!path.starts_with(&Path::parse("a.c")));
        assert!(!Path::parse("a").starts_with(&path));
    }

    #[test]
    fn test_ordering() {
        assert!(Path::parse("a.b") < Path::parse("a.c"));
        assert!(Path::parse("a") < Path::parse("a.b"));
        // the null marker orders before any text segment
        assert!(Path::parse("a.^0") < Path::parse("a.b"));
    }

    #[test]
    fn test_serde_string_form() {
        let path = Path::parse("a^.b.^0.c");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"a^.b.^0.c\"");
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_scenario_identifications() {
        let path = Path::parse("identifications.0.scientificName.fullScientificName");
        assert_eq!(path.size(), 4);
        assert_eq!(path.segment(0), Some(&text("identifications")));
    }
}
