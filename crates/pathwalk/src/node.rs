//! Runtime value model.
//!
//! [`Node`] is the closed set of container and leaf shapes the engine can
//! traverse. Dispatch over container kind is an exhaustive `match` on this
//! enum, so adding a kind is a compile-time-checked change: the compiler
//! points at every strategy that needs a new arm.

use std::fmt;

use indexmap::IndexMap;

use crate::record::Record;

/// Ordered string-keyed map of child values.
pub type Map = IndexMap<String, Node>;

/// A value in a heterogeneous nested object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Growable ordered sequence.
    List(Vec<Node>),
    /// Fixed-size array of values.
    Array(Box<[Node]>),
    /// Fixed-size array of machine primitives.
    Prims(PrimArray),
    /// Ordered string-keyed map.
    Map(Map),
    /// Structured record with declared, typed properties.
    Record(Box<dyn Record>),
}

/// Discriminant of a [`Node`], used in diagnostics and in record property
/// declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Array,
    Prims,
    Map,
    Record,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "string",
            Kind::List => "list",
            Kind::Array => "array",
            Kind::Prims => "primitive array",
            Kind::Map => "map",
            Kind::Record => "record",
        })
    }
}

/// Fixed-size array of machine primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimArray {
    Bool(Box<[bool]>),
    Int(Box<[i64]>),
    Float(Box<[f64]>),
}

impl PrimArray {
    pub fn len(&self) -> usize {
        match self {
            PrimArray::Bool(xs) => xs.len(),
            PrimArray::Int(xs) => xs.len(),
            PrimArray::Float(xs) => xs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`, boxed up as a leaf [`Node`].
    pub fn get(&self, index: usize) -> Option<Node> {
        match self {
            PrimArray::Bool(xs) => xs.get(index).copied().map(Node::Bool),
            PrimArray::Int(xs) => xs.get(index).copied().map(Node::Int),
            PrimArray::Float(xs) => xs.get(index).copied().map(Node::Float),
        }
    }

    /// The leaf kind of the elements.
    pub fn element_kind(&self) -> Kind {
        match self {
            PrimArray::Bool(_) => Kind::Bool,
            PrimArray::Int(_) => Kind::Int,
            PrimArray::Float(_) => Kind::Float,
        }
    }
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Null => Kind::Null,
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::Float(_) => Kind::Float,
            Node::Str(_) => Kind::Str,
            Node::List(_) => Kind::List,
            Node::Array(_) => Kind::Array,
            Node::Prims(_) => Kind::Prims,
            Node::Map(_) => Kind::Map,
            Node::Record(_) => Kind::Record,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// True for the shapes a path can descend into.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Node::List(_) | Node::Array(_) | Node::Prims(_) | Node::Map(_) | Node::Record(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Node::Record(r) => Some(r.as_ref()),
            _ => None,
        }
    }

    /// Wrap a record value.
    pub fn record(record: impl Record + 'static) -> Node {
        Node::Record(Box::new(record))
    }

    /// Fixed-size array from a vector of values.
    pub fn array(items: Vec<Node>) -> Node {
        Node::Array(items.into_boxed_slice())
    }

    pub fn ints(items: Vec<i64>) -> Node {
        Node::Prims(PrimArray::Int(items.into_boxed_slice()))
    }

    pub fn floats(items: Vec<f64>) -> Node {
        Node::Prims(PrimArray::Float(items.into_boxed_slice()))
    }

    pub fn bools(items: Vec<bool>) -> Node {
        Node::Prims(PrimArray::Bool(items.into_boxed_slice()))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Int(i)
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node::Int(i64::from(i))
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Float(f)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Str(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Str(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Map(map)
    }
}

impl From<PrimArray> for Node {
    fn from(prims: PrimArray) -> Self {
        Node::Prims(prims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(Node::Null.kind(), Kind::Null);
        assert_eq!(Node::from(1).kind(), Kind::Int);
        assert_eq!(Node::from("x").kind(), Kind::Str);
        assert_eq!(Node::from(vec![Node::Null]).kind(), Kind::List);
        assert_eq!(Node::array(vec![]).kind(), Kind::Array);
        assert_eq!(Node::ints(vec![1, 2]).kind(), Kind::Prims);
        assert_eq!(Node::from(Map::new()).kind(), Kind::Map);
    }

    #[test]
    fn test_prim_array() {
        let prims = PrimArray::Int(vec![10, 20].into_boxed_slice());
        assert_eq!(prims.len(), 2);
        assert_eq!(prims.get(1), Some(Node::Int(20)));
        assert_eq!(prims.get(2), None);
        assert_eq!(prims.element_kind(), Kind::Int);
    }

    #[test]
    fn test_is_container() {
        assert!(Node::from(Map::new()).is_container());
        assert!(Node::ints(vec![]).is_container());
        assert!(!Node::from(1).is_container());
        assert!(!Node::Null.is_container());
    }
}
