//! Owned description model shared by the XML and JSON readers.
//!
//! Readers never fail on a malformed element. What was missing inside a
//! property is recorded in the description for the parser to report; problems
//! outside any property, such as unusable templates, are carried as warnings.

use hashbrown::HashMap;
use serde::Serialize;

use crate::context::Warning;

pub mod json;
pub mod xml;

/// Named node descriptions that `ref` properties may instantiate.
pub type Templates = HashMap<String, NodeDesc>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeDesc {
    pub node_type: String,
    pub name: Option<String>,
    pub properties: Vec<PropertyDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDesc {
    pub name: String,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    /// Literal text for a numeric or text socket.
    Literal(String),
    /// Inline nested node.
    Node(Box<NodeDesc>),
    /// Name of a template to instantiate.
    Reference(String),
    /// A required attribute was absent.
    Missing { attribute: &'static str },
    /// The value was present but unreadable.
    Invalid { reason: String },
}

/// A complete material graph description: the properties of its `Output`
/// node plus the templates visible to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphDesc {
    pub name: Option<String>,
    pub output: NodeDesc,
    pub templates: Templates,
    /// Problems the reader hit in this material's own templates.
    pub warnings: Vec<Warning>,
}

/// Every material of a library document, plus the problems found in the
/// templates shared between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryDesc {
    pub materials: Vec<GraphDesc>,
    pub warnings: Vec<Warning>,
}

impl NodeDesc {
    pub fn new(node_type: impl Into<String>) -> Self {
        NodeDesc {
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    /// Builder helper: add a literal property.
    pub fn literal(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.properties.push(PropertyDesc {
            name: name.into(),
            value: PropertyValue::Literal(text.into()),
        });
        self
    }

    /// Builder helper: add a nested node property.
    pub fn node(mut self, name: impl Into<String>, node: NodeDesc) -> Self {
        self.properties.push(PropertyDesc {
            name: name.into(),
            value: PropertyValue::Node(Box::new(node)),
        });
        self
    }

    /// Builder helper: add a template reference.
    pub fn reference(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.properties.push(PropertyDesc {
            name: name.into(),
            value: PropertyValue::Reference(template.into()),
        });
        self
    }
}

impl GraphDesc {
    /// Graph whose `Output` receives `output`'s properties.
    pub fn new(output: NodeDesc) -> Self {
        GraphDesc {
            output,
            ..Default::default()
        }
    }
}
