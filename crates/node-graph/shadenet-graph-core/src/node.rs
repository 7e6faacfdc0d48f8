//! Nodes and their sockets.
//!
//! Every socket either holds a literal or owns the node connected to it, so
//! a graph is a tree and dropping the root drops everything below it,
//! releasing any resource handles those nodes acquired.

use shadenet_api_core::{parse_tuple, ParsedTuple, Spectrum, Value};
use shadenet_resources_core::{Handle, ImageData};

use crate::schema::{self, SocketSpec};
use crate::types::{Capability, NodeKind, SocketKind};

/// State of a socket. A socket is never literal and connected at once.
#[derive(Debug)]
pub enum Link {
    Literal(Value),
    Text(String),
    Node(Box<MaterialNode>),
}

/// A named input slot on a node.
#[derive(Debug)]
pub struct Property {
    kind: SocketKind,
    link: Link,
}

impl Property {
    pub fn new(spec: &SocketSpec) -> Self {
        let link = match spec.kind {
            SocketKind::Text => Link::Text(String::new()),
            _ => Link::Literal(Value(spec.default)),
        };
        Property {
            kind: spec.kind,
            link,
        }
    }

    pub fn kind(&self) -> SocketKind {
        self.kind
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Replace the socket state with a literal read from `text`.
    ///
    /// Text sockets keep `text` verbatim. Numeric sockets read up to four
    /// components permissively; the returned tuple says what was dropped.
    /// A previously connected node is dropped.
    pub fn set_literal(&mut self, text: &str) -> ParsedTuple {
        if self.kind == SocketKind::Text {
            self.link = Link::Text(text.to_string());
            return ParsedTuple::default();
        }
        let parsed = parse_tuple(text);
        self.link = Link::Literal(parsed.value);
        parsed
    }

    /// Connect `node` as this socket's input, returning the node it replaced.
    pub fn connect(&mut self, node: MaterialNode) -> Option<Box<MaterialNode>> {
        match std::mem::replace(&mut self.link, Link::Node(Box::new(node))) {
            Link::Node(previous) => Some(previous),
            _ => None,
        }
    }

    /// Detach the connected node, leaving a zero literal behind.
    pub fn disconnect(&mut self) -> Option<Box<MaterialNode>> {
        let empty = match self.kind {
            SocketKind::Text => Link::Text(String::new()),
            _ => Link::Literal(Value::ZERO),
        };
        match std::mem::replace(&mut self.link, empty) {
            Link::Node(node) => Some(node),
            other => {
                self.link = other;
                None
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.link, Link::Node(_))
    }

    pub fn node(&self) -> Option<&MaterialNode> {
        match &self.link {
            Link::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn node_mut(&mut self) -> Option<&mut MaterialNode> {
        match &mut self.link {
            Link::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<Value> {
        match self.link {
            Link::Literal(v) => Some(v),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.link {
            Link::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Per-node data computed once by post-processing.
#[derive(Debug, Default)]
pub(crate) enum Prepared {
    #[default]
    None,
    /// Value of a subtree that does not depend on the shading point.
    Folded(Value),
    /// Image bound to an `ImageTexture` node, if the manager had it.
    Texture(Option<Handle<ImageData>>),
    /// Lobe colour an invalid `Output` falls back to.
    Fallback(Spectrum),
}

#[derive(Debug)]
pub struct MaterialNode {
    kind: NodeKind,
    type_name: String,
    props: Vec<(&'static str, Property)>,
    pub(crate) subtree: Capability,
    pub(crate) valid: bool,
    pub(crate) validated: bool,
    pub(crate) post_processed: bool,
    pub(crate) prepared: Prepared,
}

impl MaterialNode {
    /// Build a node with the sockets of `kind`, all holding their defaults.
    pub fn new(kind: NodeKind) -> Self {
        let sig = schema::signature(kind);
        let props = sig
            .sockets
            .iter()
            .map(|spec| (spec.name, Property::new(spec)))
            .collect();
        MaterialNode {
            kind,
            type_name: sig.name.to_string(),
            props,
            subtree: Capability::empty(),
            valid: false,
            validated: false,
            post_processed: false,
            prepared: Prepared::None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Name the node was created under in the registry.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn set_type_name(&mut self, name: &str) {
        self.type_name = name.to_string();
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|(n, _)| *n == name).map(|(_, p)| p)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.props
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| p)
    }

    /// Sockets in registration order.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &Property)> {
        self.props.iter().map(|(n, p)| (*n, p))
    }

    pub(crate) fn properties_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut Property)> {
        self.props.iter_mut().map(|(n, p)| (*n, p))
    }

    /// Directly connected children in socket order.
    pub fn children(&self) -> impl Iterator<Item = &MaterialNode> {
        self.props.iter().filter_map(|(_, p)| p.node())
    }

    /// Capability mask from the last validity check or type inference.
    pub fn subtree_type(&self) -> Capability {
        self.subtree
    }

    /// Validity from the last check. Unchecked nodes report `false`.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn is_post_processed(&self) -> bool {
        self.post_processed
    }

    /// Constant value cached by post-processing, if the node was folded.
    pub fn folded_value(&self) -> Option<Value> {
        match self.prepared {
            Prepared::Folded(v) => Some(v),
            _ => None,
        }
    }

    /// Texture handle bound by post-processing.
    pub fn texture(&self) -> Option<&Handle<ImageData>> {
        match &self.prepared {
            Prepared::Texture(handle) => handle.as_ref(),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(MaterialNode::node_count).sum::<usize>()
    }
}
