//! Policy-governed mutation of nested containers.
//!
//! [`PathWriter`] dispatches each path segment to the strategy matching the
//! current container kind. One strategy per kind lives in its own module;
//! the dispatch is an exhaustive `match` on [`Node`], so a new container
//! kind cannot compile without a strategy.

mod array;
mod list;
mod map;
mod prims;
mod record;

use std::fmt;
use std::sync::Arc;

use crate::error::{DeadEnd, ErrorCode, Fault, WalkError, WriteOutcome};
use crate::node::Node;
use crate::path::Path;
use crate::read::KeyFn;
use crate::record::{convert, ConvertFn};

/// Writes values into nested containers by [`Path`].
///
/// Like the walker, a writer is stateless beyond its construction-time
/// configuration. The target tree is the only thing mutated, and only on a
/// fully successful traversal: any dead end leaves it untouched.
///
/// # Example
///
/// ```
/// use pathwalk::{Node, Path, PathWriter, WriteOutcome};
/// use serde_json::json;
///
/// let mut doc: Node = json!({"a": {"b": [10, 20, 30]}}).into();
/// let writer = PathWriter::new();
///
/// let outcome = writer.write(&mut doc, &Path::parse("a.b.1"), Node::Int(99)).unwrap();
/// assert_eq!(outcome, WriteOutcome::Done);
/// assert_eq!(pathwalk::get(&doc, "a.b.1"), Some(Node::Int(99)));
/// ```
#[derive(Clone)]
pub struct PathWriter {
    policy: DeadEnd,
    key_fn: Option<KeyFn>,
    convert: ConvertFn,
    create_maps: bool,
}

impl fmt::Debug for PathWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathWriter")
            .field("policy", &self.policy)
            .field("key_fn", &self.key_fn.is_some())
            .field("create_maps", &self.create_maps)
            .finish()
    }
}

impl Default for PathWriter {
    fn default() -> Self {
        PathWriter {
            policy: DeadEnd::default(),
            key_fn: None,
            convert,
            create_maps: false,
        }
    }
}

impl PathWriter {
    /// A writer with the [`DeadEnd::Null`] policy, identity map keys, and
    /// the default value conversion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dead-end policy.
    pub fn on_dead_end(mut self, policy: DeadEnd) -> Self {
        self.policy = policy;
        self
    }

    /// Install a map-key deserialization function.
    pub fn with_key_fn(
        mut self,
        f: impl Fn(&str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.key_fn = Some(Arc::new(f));
        self
    }

    /// Install the value conversion run before record-property assignments.
    pub fn with_converter(mut self, f: ConvertFn) -> Self {
        self.convert = f;
        self
    }

    /// Synthesize empty intermediate maps instead of dead-ending on a
    /// missing map child.
    pub fn create_intermediate_maps(mut self) -> Self {
        self.create_maps = true;
        self
    }

    /// Assign `value` at `path` under `root`, rendering dead ends per the
    /// policy. The empty path addresses no segment and is a dead end.
    pub fn write(
        &self,
        root: &mut Node,
        path: &Path,
        value: Node,
    ) -> Result<WriteOutcome, WalkError> {
        let result = if path.is_empty() {
            Err(Fault::new(
                ErrorCode::EmptySegment,
                0,
                "empty path has no segment to apply",
            ))
        } else {
            self.descend(root, path, 0, value)
        };
        match result {
            Ok(()) => Ok(WriteOutcome::Done),
            Err(fault) => match self.policy {
                DeadEnd::Null => Ok(WriteOutcome::Skipped),
                DeadEnd::Code => Ok(WriteOutcome::Code(fault.code)),
                DeadEnd::Error => Err(fault.into_error(path)),
            },
        }
    }

    /// [`write`](PathWriter::write) with the path in string form.
    pub fn write_str(
        &self,
        root: &mut Node,
        path: &str,
        value: Node,
    ) -> Result<WriteOutcome, WalkError> {
        self.write(root, &Path::parse(path), value)
    }

    /// Apply the segment at `at` to `node`: the dispatch point every
    /// strategy delegates back into for non-terminal segments.
    fn descend(&self, node: &mut Node, path: &Path, at: usize, value: Node) -> Result<(), Fault> {
        match node {
            Node::Map(entries) => map::write(self, entries, path, at, value),
            Node::List(items) => list::write(self, items, path, at, value),
            Node::Array(items) => array::write(self, items, path, at, value),
            Node::Prims(elements) => prims::write(self, elements, path, at, value),
            Node::Record(rec) => record::write(self, rec.as_mut(), path, at, value),
            Node::Null | Node::Bool(_) | Node::Int(_) | Node::Float(_) | Node::Str(_) => {
                Err(Fault::new(
                    ErrorCode::TerminalValue,
                    at,
                    format!("path continues past a {} value", node.kind()),
                ))
            }
        }
    }

    /// True when `at` is the last segment of `path`.
    fn is_terminal(path: &Path, at: usize) -> bool {
        at + 1 == path.size()
    }

    /// Run a raw map-key segment through the installed key function.
    fn map_key(&self, text: &str, at: usize) -> Result<String, Fault> {
        match &self.key_fn {
            None => Ok(text.to_string()),
            Some(f) => f(text).map_err(|e| {
                Fault::new(
                    ErrorCode::Generic,
                    at,
                    format!("key function failed for `{text}`: {e}"),
                )
            }),
        }
    }

    fn converter(&self) -> ConvertFn {
        self.convert
    }

    fn creates_maps(&self) -> bool {
        self.create_maps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Outcome;
    use crate::node::Map;
    use crate::read::PathWalker;

    fn doc() -> Node {
        let mut root = Map::new();
        root.insert(
            "items".to_string(),
            Node::from(vec![Node::from(1), Node::from(2)]),
        );
        Node::from(root)
    }

    #[test]
    fn test_write_terminal_map_key() {
        let mut root = doc();
        let writer = PathWriter::new();
        let outcome = writer.write_str(&mut root, "label", Node::from("x")).unwrap();
        assert_eq!(outcome, WriteOutcome::Done);
        assert_eq!(crate::read::get(&root, "label"), Some(Node::from("x")));
    }

    #[test]
    fn test_write_list_element() {
        let mut root = doc();
        let writer = PathWriter::new();
        writer.write_str(&mut root, "items.1", Node::from(9)).unwrap();
        assert_eq!(crate::read::get(&root, "items.1"), Some(Node::Int(9)));
    }

    #[test]
    fn test_empty_path_is_dead_end() {
        let mut root = doc();
        let writer = PathWriter::new().on_dead_end(DeadEnd::Code);
        let outcome = writer.write(&mut root, &Path::EMPTY, Node::Null).unwrap();
        assert_eq!(outcome, WriteOutcome::Code(ErrorCode::EmptySegment));
    }

    #[test]
    fn test_failed_write_leaves_tree_untouched() {
        let mut root = doc();
        let before = root.clone();
        let writer = PathWriter::new();
        let outcome = writer.write_str(&mut root, "items.9", Node::from(0)).unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(root, before);
    }

    #[test]
    fn test_policy_equivalence_on_write() {
        let value = Node::from(0);
        let silent = PathWriter::new()
            .write_str(&mut doc(), "items.x", value.clone())
            .unwrap();
        assert_eq!(silent, WriteOutcome::Skipped);

        let coded = PathWriter::new()
            .on_dead_end(DeadEnd::Code)
            .write_str(&mut doc(), "items.x", value.clone())
            .unwrap();
        assert_eq!(coded, WriteOutcome::Code(ErrorCode::IndexExpected));

        let err = PathWriter::new()
            .on_dead_end(DeadEnd::Error)
            .write_str(&mut doc(), "items.x", value)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::IndexExpected);
        assert_eq!(err.segment_index(), 1);
    }

    #[test]
    fn test_write_then_read_round() {
        let mut root = doc();
        let writer = PathWriter::new();
        writer
            .write_str(&mut root, "items.0", Node::from("replaced"))
            .unwrap();
        let walker = PathWalker::new();
        assert_eq!(
            walker.read_str(&root, "items.0").unwrap(),
            Outcome::Value(Node::from("replaced"))
        );
    }
}
