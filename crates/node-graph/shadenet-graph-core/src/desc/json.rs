//! JSON reader.
//!
//! ```json
//! {
//!   "name": "painted",
//!   "templates": { "paint": { "node": "Lambert", "properties": { "Color": [0.8, 0.1, 0.1, 1] } } },
//!   "properties": {
//!     "Surface": {
//!       "node": "Blend",
//!       "properties": { "Bxdf1": { "ref": "paint" }, "Bxdf2": { "node": "MicrofacetReflection" }, "Factor": 0.25 }
//!     }
//!   }
//! }
//! ```
//!
//! Property values are literals (anything [`literal_text`] accepts), objects
//! with a `node` key, or objects with a `ref` key.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use shadenet_api_core::json::literal_text;

use super::{GraphDesc, LibraryDesc, NodeDesc, PropertyDesc, PropertyValue, Templates};
use crate::context::Warning;
use crate::error::GraphError;

#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    templates: Map<String, JsonValue>,
    #[serde(default)]
    properties: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
struct JsonLibrary {
    #[serde(default)]
    templates: Map<String, JsonValue>,
    #[serde(default)]
    materials: Vec<JsonGraph>,
}

pub fn graph_from_json(text: &str) -> Result<GraphDesc, GraphError> {
    let raw: JsonGraph = serde_json::from_str(text)?;
    Ok(convert_graph(raw, &Templates::new()))
}

/// Read `{ "templates": {...}, "materials": [graph, ...] }`.
pub fn library_from_json(text: &str) -> Result<LibraryDesc, GraphError> {
    let raw: JsonLibrary = serde_json::from_str(text)?;
    let (shared, warnings) = convert_templates(&raw.templates);
    let materials = raw
        .materials
        .into_iter()
        .map(|graph| convert_graph(graph, &shared))
        .collect();
    Ok(LibraryDesc {
        materials,
        warnings,
    })
}

fn convert_graph(raw: JsonGraph, inherited: &Templates) -> GraphDesc {
    let mut templates = inherited.clone();
    let (own, warnings) = convert_templates(&raw.templates);
    templates.extend(own);
    GraphDesc {
        name: raw.name,
        output: NodeDesc {
            node_type: "Output".to_string(),
            name: None,
            properties: convert_properties(&raw.properties),
        },
        templates,
        warnings,
    }
}

fn convert_templates(raw: &Map<String, JsonValue>) -> (Templates, Vec<Warning>) {
    let mut templates = Templates::new();
    let mut warnings = Vec::new();
    for (name, value) in raw {
        let path = format!("templates/{name}");
        let Some(obj) = value.as_object() else {
            warnings.push(Warning::MalformedTemplate {
                path,
                detail: format!("expected a node object, got {value}"),
            });
            continue;
        };
        match node_from_object(obj) {
            PropertyValue::Node(mut desc) => {
                desc.name = Some(name.clone());
                templates.insert(name.clone(), *desc);
            }
            PropertyValue::Missing { attribute } => warnings.push(Warning::MissingAttribute {
                path,
                attribute: attribute.to_string(),
            }),
            PropertyValue::Invalid { reason } => warnings.push(Warning::MalformedTemplate {
                path,
                detail: reason,
            }),
            PropertyValue::Literal(_) | PropertyValue::Reference(_) => {}
        }
    }
    (templates, warnings)
}

fn convert_properties(raw: &Map<String, JsonValue>) -> Vec<PropertyDesc> {
    raw.iter()
        .map(|(name, value)| PropertyDesc {
            name: name.clone(),
            value: property_value(value),
        })
        .collect()
}

fn property_value(value: &JsonValue) -> PropertyValue {
    if let Some(obj) = value.as_object() {
        if obj.contains_key("node") {
            return node_from_object(obj);
        }
        if let Some(target) = obj.get("ref") {
            return match target.as_str() {
                Some(target) => PropertyValue::Reference(target.to_string()),
                None => PropertyValue::Invalid {
                    reason: format!("reference must be a string, got {target}"),
                },
            };
        }
    }
    match literal_text(value) {
        Ok(text) => PropertyValue::Literal(text),
        Err(err) => PropertyValue::Invalid {
            reason: err.to_string(),
        },
    }
}

fn node_from_object(obj: &Map<String, JsonValue>) -> PropertyValue {
    let node_type = match obj.get("node") {
        Some(JsonValue::String(node_type)) => node_type.clone(),
        Some(other) => {
            return PropertyValue::Invalid {
                reason: format!("node type must be a string, got {other}"),
            }
        }
        None => return PropertyValue::Missing { attribute: "node" },
    };
    let properties = match obj.get("properties") {
        Some(JsonValue::Object(props)) => convert_properties(props),
        Some(other) => {
            return PropertyValue::Invalid {
                reason: format!("properties of '{node_type}' must be an object, got {other}"),
            }
        }
        None => Vec::new(),
    };
    PropertyValue::Node(Box::new(NodeDesc {
        node_type,
        name: obj.get("name").and_then(|n| n.as_str()).map(str::to_string),
        properties,
    }))
}
