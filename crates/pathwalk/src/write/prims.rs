//! Segment strategy for fixed-size primitive arrays.

use crate::error::{ErrorCode, Fault};
use crate::node::{Node, PrimArray};
use crate::path::Path;
use crate::util::parse_index;

use super::PathWriter;

/// Primitive elements are leaves, so the segment must be terminal. The
/// value is coerced to the element type (ints widen to floats); anything
/// else is an illegal assignment.
pub(super) fn write(
    _writer: &PathWriter,
    elements: &mut PrimArray,
    path: &Path,
    at: usize,
    value: Node,
) -> Result<(), Fault> {
    if !PathWriter::is_terminal(path, at) {
        return Err(Fault::new(
            ErrorCode::TerminalValue,
            at,
            format!(
                "path continues past a {} element of a primitive array",
                elements.element_kind()
            ),
        ));
    }
    let index = parse_index(&path.segments()[at], elements.len())
        .map_err(|(code, context)| Fault::new(code, at, context))?;
    match (&mut *elements, &value) {
        (PrimArray::Bool(slots), Node::Bool(b)) => slots[index] = *b,
        (PrimArray::Int(slots), Node::Int(i)) => slots[index] = *i,
        (PrimArray::Float(slots), Node::Float(f)) => slots[index] = *f,
        (PrimArray::Float(slots), Node::Int(i)) => slots[index] = *i as f64,
        _ => {
            return Err(Fault::new(
                ErrorCode::IllegalAssignment,
                at,
                format!(
                    "cannot store a {} value in a {} array",
                    value.kind(),
                    elements.element_kind()
                ),
            ))
        }
    }
    Ok(())
}
