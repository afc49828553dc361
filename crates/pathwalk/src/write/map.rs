//! Segment strategy for ordered string-keyed maps.

use indexmap::map::Entry;

use crate::error::{ErrorCode, Fault};
use crate::node::{Map, Node};
use crate::path::{Path, Segment};

use super::PathWriter;

/// A terminal segment inserts (overwriting freely); a non-terminal segment
/// descends into the child, synthesizing an empty map first when the writer
/// is configured to and the key is unbound.
pub(super) fn write(
    writer: &PathWriter,
    entries: &mut Map,
    path: &Path,
    at: usize,
    value: Node,
) -> Result<(), Fault> {
    let key = match &path.segments()[at] {
        Segment::Null => {
            return Err(Fault::new(
                ErrorCode::NotApplicable,
                at,
                "null segment cannot be a map key",
            ))
        }
        Segment::Text(text) => writer.map_key(text, at)?,
    };
    if PathWriter::is_terminal(path, at) {
        entries.insert(key, value);
        return Ok(());
    }
    let child = match entries.entry(key) {
        Entry::Occupied(slot) => slot.into_mut(),
        Entry::Vacant(slot) if writer.creates_maps() => slot.insert(Node::Map(Map::new())),
        Entry::Vacant(slot) => {
            return Err(Fault::new(
                ErrorCode::TerminalValue,
                at,
                format!("no value under key `{}` to descend into", slot.key()),
            ))
        }
    };
    writer.descend(child, path, at + 1, value)
}
