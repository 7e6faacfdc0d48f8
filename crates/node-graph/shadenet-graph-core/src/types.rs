use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Graph root
    Output,

    // Scattering lobes
    Lambert,
    OrenNayar,
    MicrofacetReflection,
    MicrofacetRefraction,

    // Lobe combinators
    Blend,
    Add,

    // Values
    Constant,
    Multiply,
    Mix,

    // Textures
    Checker,
    ImageTexture,
}

/// What a node hands to the socket it is connected to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    None,
    Bsdf,
    Value,
}

impl NodeKind {
    pub fn output(self) -> OutputKind {
        use NodeKind::*;
        match self {
            Output => OutputKind::None,
            Lambert | OrenNayar | MicrofacetReflection | MicrofacetRefraction | Blend | Add => {
                OutputKind::Bsdf
            }
            Constant | Multiply | Mix | Checker | ImageTexture => OutputKind::Value,
        }
    }

    /// Capability this node contributes on its own, before its children.
    pub fn intrinsic(self) -> Capability {
        use NodeKind::*;
        match self {
            // Combinators only scatter through what is plugged into them.
            Output | Multiply | Mix | Blend | Add => Capability::empty(),
            Lambert | OrenNayar | MicrofacetReflection | MicrofacetRefraction => Capability::BSDF,
            Constant => Capability::CONSTANT,
            Checker => Capability::VARYING,
            ImageTexture => Capability::VARYING | Capability::TEXTURE,
        }
    }

    /// Leaf lobes create runtime lobes themselves instead of forwarding.
    pub fn is_lobe(self) -> bool {
        matches!(
            self,
            NodeKind::Lambert
                | NodeKind::OrenNayar
                | NodeKind::MicrofacetReflection
                | NodeKind::MicrofacetRefraction
        )
    }
}

bitflags! {
    /// Summary of what a node's subtree can produce.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capability: u32 {
        /// Contains a scattering node.
        const BSDF = 1 << 0;
        /// Contains a literal constant node.
        const CONSTANT = 1 << 1;
        /// Output depends on the shading point.
        const VARYING = 1 << 2;
        /// Reads an image from the texture manager.
        const TEXTURE = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SocketKind {
    /// Feeds BSDF composition; only accepts scattering nodes.
    Bsdf,
    Color,
    Float,
    /// Free text, e.g. a texture name.
    Text,
}

impl SocketKind {
    /// Whether a node producing `output` may be plugged into this socket.
    pub fn accepts(self, output: OutputKind) -> bool {
        match self {
            SocketKind::Bsdf => output == OutputKind::Bsdf,
            SocketKind::Color | SocketKind::Float => output == OutputKind::Value,
            SocketKind::Text => false,
        }
    }
}

/// Surface data a graph is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadingPoint {
    pub uv: [f32; 2],
}

impl ShadingPoint {
    pub fn at_uv(u: f32, v: f32) -> Self {
        ShadingPoint { uv: [u, v] }
    }
}
