//! Record implementations and fixture documents shared by the integration
//! tests.
#![allow(dead_code)]

use std::any::Any;

use pathwalk::{Kind, Map, Node, Property, Record, RecordError};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScientificName {
    pub full_scientific_name: String,
    pub genus: String,
}

const SCIENTIFIC_NAME_PROPERTIES: &[Property] = &[
    Property::new("fullScientificName", Kind::Str),
    Property::new("genus", Kind::Str),
];

impl Record for ScientificName {
    fn type_name(&self) -> &str {
        "ScientificName"
    }

    fn properties(&self) -> &[Property] {
        SCIENTIFIC_NAME_PROPERTIES
    }

    fn get(&self, name: &str) -> Option<Node> {
        match name {
            "fullScientificName" => Some(Node::from(self.full_scientific_name.clone())),
            "genus" => Some(Node::from(self.genus.clone())),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Node) -> Result<(), RecordError> {
        let slot = match name {
            "fullScientificName" => &mut self.full_scientific_name,
            "genus" => &mut self.genus,
            _ => return Err(RecordError::NoSuchProperty(name.to_string())),
        };
        match value {
            Node::Str(s) => {
                *slot = s;
                Ok(())
            }
            other => Err(RecordError::Other(format!(
                "expected string for `{name}`, got {}",
                other.kind()
            ))),
        }
    }

    fn clone_box(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_box(&self, other: &dyn Record) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Identification {
    pub scientific_name: ScientificName,
    pub preferred: bool,
    pub confidence: f64,
}

const IDENTIFICATION_PROPERTIES: &[Property] = &[
    Property::new("scientificName", Kind::Record),
    Property::new("preferred", Kind::Bool),
    Property::new("confidence", Kind::Float),
];

impl Record for Identification {
    fn type_name(&self) -> &str {
        "Identification"
    }

    fn properties(&self) -> &[Property] {
        IDENTIFICATION_PROPERTIES
    }

    fn get(&self, name: &str) -> Option<Node> {
        match name {
            "scientificName" => Some(Node::record(self.scientific_name.clone())),
            "preferred" => Some(Node::Bool(self.preferred)),
            "confidence" => Some(Node::Float(self.confidence)),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Node) -> Result<(), RecordError> {
        match (name, value) {
            ("scientificName", Node::Record(rec)) => {
                let name = rec
                    .as_any()
                    .downcast_ref::<ScientificName>()
                    .cloned()
                    .ok_or_else(|| {
                        RecordError::Other(format!(
                            "expected a ScientificName, got a {}",
                            rec.type_name()
                        ))
                    })?;
                self.scientific_name = name;
                Ok(())
            }
            ("preferred", Node::Bool(b)) => {
                self.preferred = b;
                Ok(())
            }
            ("confidence", Node::Float(f)) => {
                self.confidence = f;
                Ok(())
            }
            (name, other) => match self.property(name) {
                Some(_) => Err(RecordError::Other(format!(
                    "bad value of kind {} for `{name}`",
                    other.kind()
                ))),
                None => Err(RecordError::NoSuchProperty(name.to_string())),
            },
        }
    }

    fn clone_box(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_box(&self, other: &dyn Record) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A specimen document mixing every container kind: a map holding a list of
/// records (with a nested record inside), a fixed-size object array, and a
/// primitive float array.
pub fn specimen() -> Node {
    let gull = Identification {
        scientific_name: ScientificName {
            full_scientific_name: "Larus fuscus".to_string(),
            genus: "Larus".to_string(),
        },
        preferred: true,
        confidence: 0.98,
    };
    let tern = Identification {
        scientific_name: ScientificName {
            full_scientific_name: "Sterna hirundo".to_string(),
            genus: "Sterna".to_string(),
        },
        preferred: false,
        confidence: 0.40,
    };
    let mut root = Map::new();
    root.insert("unitID".to_string(), Node::from("RMNH.AVES.110070"));
    root.insert(
        "identifications".to_string(),
        Node::from(vec![Node::record(gull), Node::record(tern)]),
    );
    root.insert(
        "gatheringAgents".to_string(),
        Node::array(vec![Node::from("Altenburg"), Node::from("Wymenga")]),
    );
    root.insert(
        "measurements".to_string(),
        Node::floats(vec![24.5, 25.1, 23.8]),
    );
    Node::from(root)
}
