//! Policy-governed path resolution against a root value.
//!
//! [`PathWalker`] carries no state beyond its construction-time
//! configuration, so one instance can serve any number of reads. Each read
//! is a pure traversal: the cursor starts borrowed at the root and only
//! materializes owned values when a record boundary forces it.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{DeadEnd, ErrorCode, Fault, Outcome, WalkError};
use crate::node::Node;
use crate::path::{Path, Segment};
use crate::record::Record;
use crate::util::parse_index;

/// Converts a raw path segment into the key used against a map.
///
/// The default is the identity function; inject one to canonicalize keys
/// before lookup. A returned error is wrapped as
/// [`ErrorCode::Generic`](crate::ErrorCode::Generic) with its message
/// preserved.
pub type KeyFn =
    Arc<dyn Fn(&str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> + Send + Sync>;

/// Reads values out of nested containers by [`Path`].
///
/// # Example
///
/// ```
/// use pathwalk::{DeadEnd, Node, Outcome, Path, PathWalker};
/// use serde_json::json;
///
/// let doc: Node = json!({"a": {"b": [10, 20, 30]}}).into();
/// let walker = PathWalker::new();
///
/// let outcome = walker.read(&doc, &Path::parse("a.b.1")).unwrap();
/// assert_eq!(outcome, Outcome::Value(Node::Int(20)));
///
/// // Dead ends follow the configured policy.
/// let outcome = walker.read(&doc, &Path::parse("a.b.x")).unwrap();
/// assert_eq!(outcome, Outcome::Null);
/// ```
#[derive(Clone, Default)]
pub struct PathWalker {
    policy: DeadEnd,
    key_fn: Option<KeyFn>,
}

impl fmt::Debug for PathWalker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathWalker")
            .field("policy", &self.policy)
            .field("key_fn", &self.key_fn.is_some())
            .finish()
    }
}

impl PathWalker {
    /// A walker with the [`DeadEnd::Null`] policy and identity map keys.
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

    /// Resolve `path` against `root`, rendering dead ends per the policy.
    pub fn read(&self, root: &Node, path: &Path) -> Result<Outcome, WalkError> {
        match self.resolve(root, path) {
            Ok(value) => Ok(Outcome::Value(value.into_owned())),
            Err(fault) => match self.policy {
                DeadEnd::Null => Ok(Outcome::Null),
                DeadEnd::Code => Ok(Outcome::Code(fault.code)),
                DeadEnd::Error => Err(fault.into_error(path)),
            },
        }
    }

    /// [`read`](PathWalker::read) with the path in string form.
    pub fn read_str(&self, root: &Node, path: &str) -> Result<Outcome, WalkError> {
        self.read(root, &Path::parse(path))
    }

    /// Resolve several paths independently against the same root.
    pub fn read_many(&self, root: &Node, paths: &[Path]) -> Vec<Result<Outcome, WalkError>> {
        paths.iter().map(|p| self.read(root, p)).collect()
    }

    fn resolve<'a>(&self, root: &'a Node, path: &Path) -> Result<Cow<'a, Node>, Fault> {
        let mut current = Cow::Borrowed(root);
        for (at, segment) in path.segments().iter().enumerate() {
            current = match current {
                Cow::Borrowed(node) => self
                    .step_ref(node, segment)
                    .map_err(|(code, context)| Fault::new(code, at, context))?,
                Cow::Owned(node) => Cow::Owned(
                    self.step_owned(node, segment)
                        .map_err(|(code, context)| Fault::new(code, at, context))?,
                ),
            };
        }
        Ok(current)
    }

    /// Apply one segment to a borrowed cursor. Children of maps and
    /// sequences stay borrowed; record properties materialize.
    fn step_ref<'a>(
        &self,
        node: &'a Node,
        segment: &Segment,
    ) -> Result<Cow<'a, Node>, (ErrorCode, String)> {
        match node {
            Node::Map(map) => {
                let child = match self.map_key(segment)? {
                    Some(key) => map.get(key.as_ref()),
                    None => None,
                };
                match child {
                    Some(child) => Ok(Cow::Borrowed(child)),
                    None => Ok(Cow::Owned(Node::Null)),
                }
            }
            Node::List(items) => {
                let index = parse_index(segment, items.len())?;
                Ok(Cow::Borrowed(&items[index]))
            }
            Node::Array(items) => {
                let index = parse_index(segment, items.len())?;
                Ok(Cow::Borrowed(&items[index]))
            }
            Node::Prims(prims) => {
                let index = parse_index(segment, prims.len())?;
                Ok(Cow::Owned(prims.get(index).unwrap_or(Node::Null)))
            }
            Node::Record(record) => {
                read_property(record.as_ref(), segment).map(Cow::Owned)
            }
            Node::Null => Err(past_terminal(node)),
            Node::Bool(_) | Node::Int(_) | Node::Float(_) | Node::Str(_) => {
                Err(past_terminal(node))
            }
        }
    }

    /// Apply one segment to an owned cursor, extracting the child by value.
    fn step_owned(&self, node: Node, segment: &Segment) -> Result<Node, (ErrorCode, String)> {
        match node {
            Node::Map(mut map) => {
                let child = match self.map_key(segment)? {
                    Some(key) => map.swap_remove(key.as_ref()),
                    None => None,
                };
                Ok(child.unwrap_or(Node::Null))
            }
            Node::List(mut items) => {
                let index = parse_index(segment, items.len())?;
                Ok(items.swap_remove(index))
            }
            Node::Array(items) => {
                let mut items = items.into_vec();
                let index = parse_index(segment, items.len())?;
                Ok(items.swap_remove(index))
            }
            Node::Prims(prims) => {
                let index = parse_index(segment, prims.len())?;
                Ok(prims.get(index).unwrap_or(Node::Null))
            }
            Node::Record(record) => read_property(record.as_ref(), segment),
            other => Err(past_terminal(&other)),
        }
    }

    /// The key a segment addresses in a map, `None` for the null marker.
    fn map_key<'s>(
        &self,
        segment: &'s Segment,
    ) -> Result<Option<Cow<'s, str>>, (ErrorCode, String)> {
        let text = match segment {
            Segment::Null => return Ok(None),
            Segment::Text(t) => t,
        };
        match &self.key_fn {
            None => Ok(Some(Cow::Borrowed(text.as_str()))),
            Some(f) => f(text).map(|k| Some(Cow::Owned(k))).map_err(|e| {
                (
                    ErrorCode::Generic,
                    format!("key function failed for `{text}`: {e}"),
                )
            }),
        }
    }
}

fn read_property(record: &dyn Record, segment: &Segment) -> Result<Node, (ErrorCode, String)> {
    let name = match segment {
        Segment::Null => {
            return Err((
                ErrorCode::NotApplicable,
                format!(
                    "null segment cannot name a property of record `{}`",
                    record.type_name()
                ),
            ))
        }
        Segment::Text(t) => t,
    };
    record.get(name).ok_or_else(|| {
        (
            ErrorCode::NotApplicable,
            format!(
                "record `{}` has no property `{name}`",
                record.type_name()
            ),
        )
    })
}

fn past_terminal(node: &Node) -> (ErrorCode, String) {
    (
        ErrorCode::TerminalValue,
        format!("path continues past a {} value", node.kind()),
    )
}

/// Read the value at `path`, or `None` on any dead end.
///
/// Convenience over a default [`PathWalker`]; a path ending at an explicit
/// null reads as `Some(Node::Null)`, while a dead end reads as `None`.
///
/// ```
/// use pathwalk::{get, Node};
/// use serde_json::json;
///
/// let doc: Node = json!({"foo": {"bar": 42}}).into();
/// assert_eq!(get(&doc, "foo.bar"), Some(Node::Int(42)));
/// assert_eq!(get(&doc, "foo.bar.baz"), None);
/// ```
pub fn get(root: &Node, path: &str) -> Option<Node> {
    match PathWalker::new().read(root, &Path::parse(path)) {
        Ok(Outcome::Value(value)) => Some(value),
        _ => None,
    }
}
