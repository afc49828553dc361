//! Addressing plain JSON documents end to end.

mod support;

use pathwalk::{from_json, get, to_json, Node, Outcome, Path, PathWalker, PathWriter};
use serde_json::json;
use support::specimen;

#[test]
fn test_read_a_json_document() {
    let doc = from_json(json!({
        "sourceSystem": {"code": "CRS"},
        "identifications": [
            {"scientificName": {"fullScientificName": "Larus fuscus"}}
        ]
    }));
    let walker = PathWalker::new();
    assert_eq!(
        walker.read_str(&doc, "sourceSystem.code").unwrap(),
        Outcome::Value(Node::from("CRS"))
    );
    assert_eq!(
        walker
            .read_str(&doc, "identifications.0.scientificName.fullScientificName")
            .unwrap(),
        Outcome::Value(Node::from("Larus fuscus"))
    );
}

#[test]
fn test_write_then_render_back() {
    let mut doc = from_json(json!({"a": {"b": [1, 2, 3]}}));
    let writer = PathWriter::new();
    writer.write_str(&mut doc, "a.b.2", Node::from(30)).unwrap();
    writer.write_str(&mut doc, "a.c", Node::from("added")).unwrap();
    assert_eq!(to_json(doc), json!({"a": {"b": [1, 2, 30], "c": "added"}}));
}

#[test]
fn test_escaped_path_addresses_dotted_json_key() {
    let doc = from_json(json!({"10.0.0.1": {"port": 8080}}));
    // segments are raw; escaping only exists in the string form
    let path = Path::EMPTY.append("10.0.0.1").append("port");
    assert_eq!(path.to_string(), "10^.0^.0^.1.port");
    assert_eq!(
        PathWalker::new().read(&doc, &path).unwrap(),
        Outcome::Value(Node::Int(8080))
    );
    // the same address in string form
    assert_eq!(get(&doc, "10^.0^.0^.1.port"), Some(Node::Int(8080)));
}

#[test]
fn test_records_flatten_to_objects() {
    let rendered = to_json(specimen());
    assert_eq!(
        rendered["identifications"][0]["scientificName"]["fullScientificName"],
        json!("Larus fuscus")
    );
    assert_eq!(rendered["identifications"][1]["preferred"], json!(false));
    // primitive arrays render as plain arrays
    assert_eq!(rendered["measurements"], json!([24.5, 25.1, 23.8]));
    // fixed-size object arrays too
    assert_eq!(rendered["gatheringAgents"], json!(["Altenburg", "Wymenga"]));
}

#[test]
fn test_json_round_trip_for_json_shaped_trees() {
    let value = json!({
        "nested": {"list": [true, null, 2, 2.5, "s"]},
        "top": "level"
    });
    assert_eq!(to_json(from_json(value.clone())), value);
}
