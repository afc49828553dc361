//! Escaped dotted-path navigation and mutation for nested heterogeneous
//! values.
//!
//! A [`Path`] like `identifications.0.scientificName.fullScientificName`
//! addresses one location in an arbitrarily nested mix of maps, lists,
//! fixed-size arrays (object- and primitive-typed), and structured records.
//! [`PathWalker`] reads through such a tree and [`PathWriter`] assigns into
//! it, both with a per-instance policy for dead ends: resolve them silently,
//! return the [`ErrorCode`], or fail with a [`WalkError`]. [`MapWriter`]
//! builds a nested map from scratch out of (path, value) pairs.
//!
//! Path syntax: segments are separated by `.`; inside a segment `^.` is a
//! literal dot, `^^` a literal caret, and a segment written exactly `^0` is
//! the null-marker segment. Any other caret passes through literally.
//!
//! # Example
//!
//! ```
//! use pathwalk::{DeadEnd, ErrorCode, Node, Outcome, Path, PathWalker, PathWriter};
//! use serde_json::json;
//!
//! let mut doc: Node = json!({
//!     "identifications": [
//!         {"scientificName": {"fullScientificName": "Larus fuscus"}}
//!     ]
//! }).into();
//!
//! let path = Path::parse("identifications.0.scientificName.fullScientificName");
//! assert_eq!(path.size(), 4);
//!
//! let walker = PathWalker::new();
//! assert_eq!(
//!     walker.read(&doc, &path).unwrap(),
//!     Outcome::Value(Node::from("Larus fuscus"))
//! );
//!
//! let writer = PathWriter::new();
//! writer.write(&mut doc, &path, Node::from("Larus fuscus fuscus")).unwrap();
//! assert_eq!(pathwalk::get(&doc, &path.to_string()), Some(Node::from("Larus fuscus fuscus")));
//!
//! // Dead ends render per the configured policy.
//! let strict = PathWalker::new().on_dead_end(DeadEnd::Error);
//! let err = strict.read(&doc, &Path::parse("identifications.x")).unwrap_err();
//! assert_eq!(err.code(), ErrorCode::IndexExpected);
//! ```

pub mod error;
pub mod json;
pub mod map_writer;
pub mod node;
pub mod path;
pub mod read;
pub mod record;
mod util;
pub mod write;

pub use error::{DeadEnd, ErrorCode, Outcome, WalkError, WriteOutcome};
pub use json::{from_json, to_json};
pub use map_writer::{MapScope, MapWriter};
pub use node::{Kind, Map, Node, PrimArray};
pub use path::{Path, PathError, Segment, ESCAPE, NULL_SEGMENT, SEPARATOR};
pub use read::{get, KeyFn, PathWalker};
pub use record::{convert, ConvertFn, Property, Record, RecordError};
pub use write::PathWriter;
