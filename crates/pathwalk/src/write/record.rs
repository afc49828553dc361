//! Segment strategy for structured records.
//!
//! Records are reached through the [`Record`] capability, so a nested write
//! is get/mutate/set: the property value is materialized, the suffix is
//! applied to it, and the result is stored back.

use crate::error::{ErrorCode, Fault};
use crate::node::Node;
use crate::path::{Path, Segment};
use crate::record::{Record, RecordError};

use super::PathWriter;

pub(super) fn write(
    writer: &PathWriter,
    rec: &mut dyn Record,
    path: &Path,
    at: usize,
    value: Node,
) -> Result<(), Fault> {
    let name = match &path.segments()[at] {
        Segment::Null => {
            return Err(Fault::new(
                ErrorCode::NotApplicable,
                at,
                format!(
                    "null segment cannot name a property of record `{}`",
                    rec.type_name()
                ),
            ))
        }
        Segment::Text(text) => text,
    };
    let property = rec.property(name).ok_or_else(|| {
        Fault::new(
            ErrorCode::NotApplicable,
            at,
            format!("record `{}` has no property `{name}`", rec.type_name()),
        )
    })?;
    if PathWriter::is_terminal(path, at) {
        let converted = (writer.converter())(value, property.kind).map_err(|offending| {
            Fault::new(
                ErrorCode::IllegalAssignment,
                at,
                format!(
                    "cannot assign {} value {offending:?} to property `{name}` of record `{}`, declared {}",
                    offending.kind(),
                    rec.type_name(),
                    property.kind,
                ),
            )
        })?;
        store(rec, name, converted, at)
    } else {
        // The suffix mutates a copy of the property value, which only
        // replaces the original once the whole traversal has succeeded.
        let mut child = rec.get(name).ok_or_else(|| {
            Fault::new(
                ErrorCode::NotApplicable,
                at,
                format!("record `{}` has no property `{name}`", rec.type_name()),
            )
        })?;
        writer.descend(&mut child, path, at + 1, value)?;
        store(rec, name, child, at)
    }
}

fn store(rec: &mut dyn Record, name: &str, value: Node, at: usize) -> Result<(), Fault> {
    rec.set(name, value).map_err(|e| match e {
        RecordError::NoSuchProperty(property) => Fault::new(
            ErrorCode::NotApplicable,
            at,
            format!("record `{}` has no property `{property}`", rec.type_name()),
        ),
        RecordError::Other(cause) => Fault::new(
            ErrorCode::Generic,
            at,
            format!("record `{}` rejected `{name}`: {cause}", rec.type_name()),
        ),
    })
}
