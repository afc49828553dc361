//! Structured-record capability.
//!
//! The engine never inspects concrete types. Anything that wants to be
//! traversed as a record implements [`Record`]: a declared property table
//! plus by-name get/set over [`Node`] values. Implementations are typically
//! hand-written accessors over a plain struct; a field table over a map
//! works just as well.
//!
//! # Example
//!
//! ```
//! use std::any::Any;
//! use pathwalk::{Kind, Node, Property, Record, RecordError};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! const POINT_PROPERTIES: &[Property] =
//!     &[Property::new("x", Kind::Int), Property::new("y", Kind::Int)];
//!
//! impl Record for Point {
//!     fn type_name(&self) -> &str {
//!         "Point"
//!     }
//!
//!     fn properties(&self) -> &[Property] {
//!         POINT_PROPERTIES
//!     }
//!
//!     fn get(&self, name: &str) -> Option<Node> {
//!         match name {
//!             "x" => Some(Node::Int(self.x)),
//!             "y" => Some(Node::Int(self.y)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set(&mut self, name: &str, value: Node) -> Result<(), RecordError> {
//!         let slot = match name {
//!             "x" => &mut self.x,
//!             "y" => &mut self.y,
//!             _ => return Err(RecordError::NoSuchProperty(name.to_string())),
//!         };
//!         match value {
//!             Node::Int(i) => {
//!                 *slot = i;
//!                 Ok(())
//!             }
//!             other => Err(RecordError::Other(format!(
//!                 "expected int for `{name}`, got {}",
//!                 other.kind()
//!             ))),
//!         }
//!     }
//!
//!     fn clone_box(&self) -> Box<dyn Record> {
//!         Box::new(self.clone())
//!     }
//!
//!     fn eq_box(&self, other: &dyn Record) -> bool {
//!         other.as_any().downcast_ref::<Self>() == Some(self)
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let point = Node::record(Point { x: 3, y: 4 });
//! assert_eq!(pathwalk::get(&point, "y"), Some(Node::Int(4)));
//! ```

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::node::{Kind, Node};

/// Declared property of a [`Record`]: name plus declared value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    pub name: &'static str,
    pub kind: Kind,
}

impl Property {
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Property { name, kind }
    }
}

/// Failure reported by a [`Record`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("no property `{0}`")]
    NoSuchProperty(String),
    #[error("{0}")]
    Other(String),
}

/// By-name property access over a structured record.
///
/// `get` returns the property value (materialized, not borrowed); `set`
/// receives a value that has already been through the conversion step, so an
/// implementation only needs to unpack the declared shape.
pub trait Record: fmt::Debug + Send + Sync {
    /// Type name used in diagnostics.
    fn type_name(&self) -> &str;

    /// The declared properties, in declaration order.
    fn properties(&self) -> &[Property];

    /// Read one property. `None` if no such property is declared.
    fn get(&self, name: &str) -> Option<Node>;

    /// Store a value into one property.
    fn set(&mut self, name: &str, value: Node) -> Result<(), RecordError>;

    fn clone_box(&self) -> Box<dyn Record>;

    fn eq_box(&self, other: &dyn Record) -> bool;

    fn as_any(&self) -> &dyn Any;

    /// The declaration for `name`, if the property exists.
    fn property(&self, name: &str) -> Option<Property> {
        self.properties().iter().copied().find(|p| p.name == name)
    }
}

impl Clone for Box<dyn Record> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for Box<dyn Record> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_box(other.as_ref())
    }
}

/// Signature of the value-conversion step run before a record assignment.
///
/// On rejection the offending value is handed back so the caller can report
/// it.
pub type ConvertFn = fn(Node, Kind) -> Result<Node, Node>;

/// Default value conversion: null passes anywhere, exact kinds pass, ints
/// widen to floats. Everything else is rejected.
pub fn convert(value: Node, kind: Kind) -> Result<Node, Node> {
    match (&value, kind) {
        (Node::Null, _) => Ok(value),
        (Node::Int(i), Kind::Float) => Ok(Node::Float(*i as f64)),
        _ if value.kind() == kind => Ok(value),
        _ => Err(value),
    }
}
