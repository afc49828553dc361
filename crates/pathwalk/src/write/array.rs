//! Segment strategy for fixed-size object arrays.

use crate::error::Fault;
use crate::node::Node;
use crate::path::Path;
use crate::util::parse_index;

use super::PathWriter;

/// Same index grammar as lists; the fixed size means assignment only ever
/// replaces an existing slot.
pub(super) fn write(
    writer: &PathWriter,
    items: &mut Box<[Node]>,
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
