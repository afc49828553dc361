//! Incremental construction of nested maps from (path, value) pairs.

use indexmap::map::Entry;

use crate::error::{ErrorCode, Fault, WalkError};
use crate::node::{Map, Node};
use crate::path::{Path, Segment};

/// Builds a nested [`Map`] one dotted path at a time.
///
/// Intermediate maps are created on demand. A prefix already bound to a
/// non-map leaf blocks longer paths through it, and a key already bound to
/// a map refuses a direct overwrite, so a write never silently turns a leaf
/// into a map or a map into a leaf. Leaf-over-leaf overwrites are fine.
///
/// The writer holds the map under construction; share it across threads
/// only under external locking.
///
/// # Example
///
/// ```
/// use pathwalk::{MapWriter, Node, Path};
///
/// let mut writer = MapWriter::new();
/// writer.write_str("person.address.street", Node::from("X")).unwrap();
/// writer.write_str("person.firstName", Node::from("John")).unwrap();
///
/// let person = writer.as_map()["person"].as_map().unwrap();
/// assert_eq!(person["firstName"], Node::from("John"));
/// assert_eq!(person["address"].as_map().unwrap()["street"], Node::from("X"));
///
/// // A bound leaf blocks longer paths through it.
/// assert!(writer.write_str("person.firstName.x", Node::Null).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapWriter {
    root: Map,
}

impl MapWriter {
    /// A writer over a fresh empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing map.
    pub fn from_map(root: Map) -> Self {
        MapWriter { root }
    }

    /// Bind the last segment of `path` to `value`, creating an empty map at
    /// every missing intermediate segment.
    pub fn write(&mut self, path: &Path, value: impl Into<Node>) -> Result<(), WalkError> {
        write_into(&mut self.root, path, value.into())
    }

    /// [`write`](MapWriter::write) with the path in string form.
    pub fn write_str(&mut self, path: &str, value: impl Into<Node>) -> Result<(), WalkError> {
        self.write(&Path::parse(path), value)
    }

    /// A handle scoped to the nested map under `prefix`, so subsequent
    /// writes omit the shared prefix. Missing intermediate maps are created
    /// on the way down; a leaf on the way is a blocked path.
    pub fn at(&mut self, prefix: &Path) -> Result<MapScope<'_>, WalkError> {
        descend(&mut self.root, prefix).map(|entries| MapScope { entries })
    }

    /// [`at`](MapWriter::at) with the prefix in string form.
    pub fn at_str(&mut self, prefix: &str) -> Result<MapScope<'_>, WalkError> {
        self.at(&Path::parse(prefix))
    }

    /// The live root map, not a copy.
    pub fn as_map(&self) -> &Map {
        &self.root
    }

    /// Consume the writer, yielding the map built so far.
    pub fn into_map(self) -> Map {
        self.root
    }
}

/// A [`MapWriter`] handle scoped under a path prefix. Scopes nest.
#[derive(Debug)]
pub struct MapScope<'a> {
    entries: &'a mut Map,
}

impl MapScope<'_> {
    /// As [`MapWriter::write`], relative to the scope's prefix.
    pub fn write(&mut self, path: &Path, value: impl Into<Node>) -> Result<(), WalkError> {
        write_into(self.entries, path, value.into())
    }

    /// As [`MapWriter::write_str`], relative to the scope's prefix.
    pub fn write_str(&mut self, path: &str, value: impl Into<Node>) -> Result<(), WalkError> {
        self.write(&Path::parse(path), value)
    }

    /// A handle scoped further down, under this scope's prefix plus
    /// `prefix`.
    pub fn at(&mut self, prefix: &Path) -> Result<MapScope<'_>, WalkError> {
        descend(self.entries, prefix).map(|entries| MapScope { entries })
    }

    /// [`at`](MapScope::at) with the prefix in string form.
    pub fn at_str(&mut self, prefix: &str) -> Result<MapScope<'_>, WalkError> {
        self.at(&Path::parse(prefix))
    }
}

fn write_into(entries: &mut Map, path: &Path, value: Node) -> Result<(), WalkError> {
    let Some(parent) = path.parent() else {
        return Err(
            Fault::new(ErrorCode::EmptySegment, 0, "empty path binds nothing").into_error(path),
        );
    };
    check_keys(path)?;
    let target = descend_from(entries, path, &parent)?;
    let key = key_of(path, path.size() - 1)?;
    match target.entry(key) {
        Entry::Occupied(slot) if matches!(slot.get(), Node::Map(_)) => Err(Fault::new(
            ErrorCode::TerminalValue,
            path.size() - 1,
            format!("key `{}` already holds a map", slot.key()),
        )
        .into_error(path)),
        Entry::Occupied(mut slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}

fn descend<'a>(entries: &'a mut Map, prefix: &Path) -> Result<&'a mut Map, WalkError> {
    check_keys(prefix)?;
    descend_from(entries, prefix, prefix)
}

/// Reject null-marker segments before any intermediate map is created, so a
/// failed write leaves the structure exactly as it was.
fn check_keys(path: &Path) -> Result<(), WalkError> {
    match path.segments().iter().position(|s| s.is_null()) {
        Some(at) => Err(Fault::new(
            ErrorCode::NotApplicable,
            at,
            "null segment cannot be a map key",
        )
        .into_error(path)),
        None => Ok(()),
    }
}

/// Walk `steps` (a prefix of `full`, which is only used for error
/// reporting), creating missing intermediate maps.
fn descend_from<'a>(
    entries: &'a mut Map,
    full: &Path,
    steps: &Path,
) -> Result<&'a mut Map, WalkError> {
    let mut current = entries;
    for at in 0..steps.size() {
        let key = key_of(full, at)?;
        let child = current
            .entry(key)
            .or_insert_with(|| Node::Map(Map::new()));
        current = match child {
            Node::Map(entries) => entries,
            other => {
                return Err(Fault::new(
                    ErrorCode::TerminalValue,
                    at,
                    format!("path blocked by a {} value", other.kind()),
                )
                .into_error(full))
            }
        };
    }
    Ok(current)
}

fn key_of(path: &Path, at: usize) -> Result<String, WalkError> {
    match &path.segments()[at] {
        Segment::Null => Err(Fault::new(
            ErrorCode::NotApplicable,
            at,
            "null segment cannot be a map key",
        )
        .into_error(path)),
        Segment::Text(text) => Ok(text.clone()),
    }
}
