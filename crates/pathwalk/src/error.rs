//! Failure vocabulary shared by the walker and the writers.
//!
//! Every low-level failure is classified into exactly one [`ErrorCode`] at
//! the point of detection. The internal result carries that classification,
//! and the configured [`DeadEnd`] policy renders it once at the public
//! boundary: a silent null outcome, a [`WalkError`], or the code itself.

use thiserror::Error;

use crate::node::Node;
use crate::path::{Path, Segment};

/// Classification of a traversal failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The segment cannot apply to the container kind encountered.
    #[error("NOT_APPLICABLE")]
    NotApplicable,
    /// A sequence was addressed with a segment that is not an index.
    #[error("INDEX_EXPECTED")]
    IndexExpected,
    #[error("INDEX_OUT_OF_BOUNDS")]
    IndexOutOfBounds,
    /// An empty segment where a non-empty one is required.
    #[error("EMPTY_SEGMENT")]
    EmptySegment,
    /// The path continues past a terminal value.
    #[error("TERMINAL_VALUE")]
    TerminalValue,
    /// A wrapped foreign failure, cause text preserved in the context.
    #[error("GENERIC_EXCEPTION")]
    Generic,
    /// A value incompatible with the declared type of its destination.
    #[error("ILLEGAL_ASSIGNMENT")]
    IllegalAssignment,
}

/// How a walker or writer reports dead ends. Fixed at construction; applies
/// to every traversal step of every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadEnd {
    /// Resolve dead ends to a null outcome.
    #[default]
    Null,
    /// Return a [`WalkError`].
    Error,
    /// Resolve dead ends to their [`ErrorCode`].
    Code,
}

/// A classified traversal failure with its location.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code} at segment {at} of `{path}`: {context}")]
pub struct WalkError {
    code: ErrorCode,
    path: Path,
    at: usize,
    context: String,
}

impl WalkError {
    pub(crate) fn new(code: ErrorCode, path: Path, at: usize, context: String) -> Self {
        WalkError {
            code,
            path,
            at,
            context,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The full path whose application failed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Position of the offending segment within [`WalkError::path`].
    pub fn segment_index(&self) -> usize {
        self.at
    }

    /// The offending segment, when the position is inside the path.
    pub fn segment(&self) -> Option<&Segment> {
        self.path.segments().get(self.at)
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Outcome of a policy-governed read.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value at the path.
    Value(Node),
    /// Dead end under [`DeadEnd::Null`].
    Null,
    /// Dead end under [`DeadEnd::Code`].
    Code(ErrorCode),
}

impl Outcome {
    /// The resolved value, if any.
    pub fn value(self) -> Option<Node> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Node> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Outcome::Code(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Outcome::Null)
    }
}

/// Outcome of a policy-governed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The assignment happened.
    Done,
    /// Dead end under [`DeadEnd::Null`]; nothing was written.
    Skipped,
    /// Dead end under [`DeadEnd::Code`]; nothing was written.
    Code(ErrorCode),
}

impl WriteOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, WriteOutcome::Done)
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            WriteOutcome::Code(code) => Some(*code),
            _ => None,
        }
    }
}

/// Pre-policy failure: classification, segment position, human context.
#[derive(Debug, Clone)]
pub(crate) struct Fault {
    pub code: ErrorCode,
    pub at: usize,
    pub context: String,
}

impl Fault {
    pub(crate) fn new(code: ErrorCode, at: usize, context: impl Into<String>) -> Self {
        Fault {
            code,
            at,
            context: context.into(),
        }
    }

    pub(crate) fn into_error(self, path: &Path) -> WalkError {
        WalkError::new(self.code, path.clone(), self.at, self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotApplicable.to_string(), "NOT_APPLICABLE");
        assert_eq!(ErrorCode::IndexExpected.to_string(), "INDEX_EXPECTED");
        assert_eq!(
            ErrorCode::IndexOutOfBounds.to_string(),
            "INDEX_OUT_OF_BOUNDS"
        );
        assert_eq!(ErrorCode::EmptySegment.to_string(), "EMPTY_SEGMENT");
        assert_eq!(ErrorCode::TerminalValue.to_string(), "TERMINAL_VALUE");
        assert_eq!(ErrorCode::Generic.to_string(), "GENERIC_EXCEPTION");
        assert_eq!(
            ErrorCode::IllegalAssignment.to_string(),
            "ILLEGAL_ASSIGNMENT"
        );
    }

    #[test]
    fn test_walk_error_accessors() {
        let path = Path::parse("a.b.c");
        let err = Fault::new(ErrorCode::IndexExpected, 1, "`b` is not an index")
            .into_error(&path);
        assert_eq!(err.code(), ErrorCode::IndexExpected);
        assert_eq!(err.segment_index(), 1);
        assert_eq!(err.segment(), path.segment(1));
        let rendered = err.to_string();
        assert!(rendered.contains("INDEX_EXPECTED"));
        assert!(rendered.contains("a.b.c"));
    }
}
