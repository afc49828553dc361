//! Conversions between [`Node`] trees and `serde_json` values.
//!
//! `Value → Node` is total. The reverse is lossy at the edges of JSON:
//! records flatten into objects through their property tables, primitive
//! arrays become plain arrays, and non-finite floats become null.

use serde_json::Value;

use crate::node::{Node, PrimArray};

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Int(i),
                None => n.as_f64().map(Node::Float).unwrap_or(Node::Null),
            },
            Value::String(s) => Node::Str(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(entries) => Node::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Int(i) => Value::from(i),
            Node::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Node::Str(s) => Value::String(s),
            Node::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Array(items) => {
                Value::Array(items.into_vec().into_iter().map(Value::from).collect())
            }
            Node::Prims(prims) => Value::Array(match prims {
                PrimArray::Bool(xs) => xs.iter().map(|&b| Value::Bool(b)).collect(),
                PrimArray::Int(xs) => xs.iter().map(|&i| Value::from(i)).collect(),
                PrimArray::Float(xs) => xs
                    .iter()
                    .map(|&f| {
                        serde_json::Number::from_f64(f)
                            .map(Value::Number)
                            .unwrap_or(Value::Null)
                    })
                    .collect(),
            }),
            Node::Map(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            Node::Record(rec) => Value::Object(
                rec.properties()
                    .iter()
                    .filter_map(|p| rec.get(p.name).map(|v| (p.name.to_string(), Value::from(v))))
                    .collect(),
            ),
        }
    }
}

/// Alias for [`Node::from`] on a JSON value, for call sites where the
/// direction reads better spelled out.
pub fn from_json(value: Value) -> Node {
    Node::from(value)
}

/// Alias for [`Value::from`] on a node.
pub fn to_json(node: Node) -> Value {
    Value::from(node)
}
