//! Explicit context threaded through parsing and preparation, and the
//! aggregated warning report those passes produce.

use std::fmt;

use serde::Serialize;
use shadenet_resources_core::TextureManager;

use crate::config::EngineConfig;
use crate::registry::NodeRegistry;
use crate::types::SocketKind;

/// Collaborators a graph needs while it is built and prepared.
#[derive(Clone, Copy)]
pub struct GraphContext<'a> {
    pub registry: &'a NodeRegistry,
    pub textures: &'a TextureManager,
    pub config: &'a EngineConfig,
}

impl<'a> GraphContext<'a> {
    pub fn new(
        registry: &'a NodeRegistry,
        textures: &'a TextureManager,
        config: &'a EngineConfig,
    ) -> Self {
        GraphContext {
            registry,
            textures,
            config,
        }
    }
}

/// A recoverable problem. The offending element was skipped; its siblings were not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    UnknownNodeType {
        path: String,
        node_type: String,
    },
    UnknownProperty {
        path: String,
        property: String,
    },
    MalformedLiteral {
        path: String,
        property: String,
        detail: String,
    },
    ExtraComponents {
        path: String,
        property: String,
        count: usize,
    },
    MissingAttribute {
        path: String,
        attribute: String,
    },
    UnknownReference {
        path: String,
        reference: String,
    },
    DepthExceeded {
        path: String,
        limit: usize,
    },
    KindMismatch {
        path: String,
        property: String,
        expected: SocketKind,
    },
    MissingTexture {
        path: String,
        texture: String,
    },
    MalformedTemplate {
        path: String,
        detail: String,
    },
    DuplicateMaterial {
        path: String,
        name: String,
    },
}

impl Warning {
    pub fn path(&self) -> &str {
        match self {
            Warning::UnknownNodeType { path, .. }
            | Warning::UnknownProperty { path, .. }
            | Warning::MalformedLiteral { path, .. }
            | Warning::ExtraComponents { path, .. }
            | Warning::MissingAttribute { path, .. }
            | Warning::UnknownReference { path, .. }
            | Warning::DepthExceeded { path, .. }
            | Warning::KindMismatch { path, .. }
            | Warning::MissingTexture { path, .. }
            | Warning::MalformedTemplate { path, .. }
            | Warning::DuplicateMaterial { path, .. } => path,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownNodeType { path, node_type } => {
                write!(f, "{path}: node type '{node_type}' is unknown")
            }
            Warning::UnknownProperty { path, property } => {
                write!(f, "{path}: node property '{property}' is ignored")
            }
            Warning::MalformedLiteral {
                path,
                property,
                detail,
            } => write!(f, "{path}: malformed literal for '{property}': {detail}"),
            Warning::ExtraComponents {
                path,
                property,
                count,
            } => write!(f, "{path}: {count} extra component(s) for '{property}' ignored"),
            Warning::MissingAttribute { path, attribute } => {
                write!(f, "{path}: missing attribute '{attribute}'")
            }
            Warning::UnknownReference { path, reference } => {
                write!(f, "{path}: reference to unknown node '{reference}'")
            }
            Warning::DepthExceeded { path, limit } => {
                write!(f, "{path}: nesting deeper than {limit} nodes, subtree dropped")
            }
            Warning::KindMismatch {
                path,
                property,
                expected,
            } => write!(f, "{path}: '{property}' expects a {expected:?} input"),
            Warning::MissingTexture { path, texture } => {
                write!(f, "{path}: texture '{texture}' is not loaded")
            }
            Warning::MalformedTemplate { path, detail } => {
                write!(f, "{path}: template ignored: {detail}")
            }
            Warning::DuplicateMaterial { path, name } => {
                write!(f, "{path}: material '{name}' already exists, later definition skipped")
            }
        }
    }
}

/// Warnings gathered over a parse or preparation pass, in discovery order.
/// Every warning is also sent to the `log` facade as it is recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    warnings: Vec<Warning>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn merge(&mut self, other: Report) {
        self.warnings.extend(other.warnings);
    }
}
