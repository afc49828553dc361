//! Segment strategy for growable ordered sequences.

use crate::error::Fault;
use crate::node::Node;
use crate::path::Path;
use crate::util::parse_index;

use super::PathWriter;

/// The segment must parse as an index into the existing elements; lists are
/// never grown by a path write. A terminal segment replaces the element in
/// place, a non-terminal one descends into it.
pub(super) fn write(
    writer: &PathWriter,
    items: &mut [Node],
    path: &Path,
    at: usize,
    value: Node,
) -> Result<(), Fault> {
    let index = parse_index(&path.segments()[at], items.len())
        .map_err(|(code, context)| Fault::new(code, at, context))?;
    if PathWriter::is_terminal(path, at) {
        items[index] = value;
        Ok(())
    } else {
        writer.descend(&mut items[index], path, at + 1, value)
    }
}
