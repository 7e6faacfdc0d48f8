//! Socket layouts for every built-in node kind.
//!
//! A node's sockets are created from its signature in the order listed here,
//! and that order is the order children are visited during composition.

use crate::types::{NodeKind, SocketKind};
use serde::Serialize;

/// Socket names shared by the built-in node kinds.
pub mod sockets {
    pub const SURFACE: &str = "Surface";
    pub const COLOR: &str = "Color";
    pub const BASE_COLOR: &str = "BaseColor";
    pub const ROUGHNESS: &str = "Roughness";
    pub const IOR: &str = "IOR";
    pub const BXDF1: &str = "Bxdf1";
    pub const BXDF2: &str = "Bxdf2";
    pub const FACTOR: &str = "Factor";
    pub const COLOR1: &str = "Color1";
    pub const COLOR2: &str = "Color2";
    pub const SCALE: &str = "Scale";
    pub const TEXTURE: &str = "Texture";
}

#[derive(Debug, Clone, Serialize)]
pub struct SocketSpec {
    pub name: &'static str,
    pub kind: SocketKind,
    /// Literal the socket starts with.
    pub default: [f32; 4],
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSignature {
    pub kind: NodeKind,
    pub name: &'static str,
    pub category: &'static str,
    pub sockets: Vec<SocketSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub version: &'static str,
    pub nodes: Vec<NodeSignature>,
}

// Helpers
fn bsdf_in(name: &'static str) -> SocketSpec {
    SocketSpec {
        name,
        kind: SocketKind::Bsdf,
        default: [0.0; 4],
    }
}
fn color_in(name: &'static str) -> SocketSpec {
    SocketSpec {
        name,
        kind: SocketKind::Color,
        default: [0.0; 4],
    }
}
fn float_in(name: &'static str, default: f32) -> SocketSpec {
    SocketSpec {
        name,
        kind: SocketKind::Float,
        default: [default, 0.0, 0.0, 0.0],
    }
}
fn text_in(name: &'static str) -> SocketSpec {
    SocketSpec {
        name,
        kind: SocketKind::Text,
        default: [0.0; 4],
    }
}

/// Signature of a single node kind.
pub fn signature(kind: NodeKind) -> NodeSignature {
    use sockets::*;
    use NodeKind::*;
    let (name, category, sockets) = match kind {
        Output => ("Output", "Output", vec![bsdf_in(SURFACE)]),
        Lambert => ("Lambert", "Bxdf", vec![color_in(COLOR)]),
        OrenNayar => (
            "OrenNayar",
            "Bxdf",
            vec![color_in(COLOR), float_in(ROUGHNESS, 0.0)],
        ),
        MicrofacetReflection => (
            "MicrofacetReflection",
            "Bxdf",
            vec![color_in(BASE_COLOR), float_in(ROUGHNESS, 0.5)],
        ),
        MicrofacetRefraction => (
            "MicrofacetRefraction",
            "Bxdf",
            vec![
                color_in(BASE_COLOR),
                float_in(ROUGHNESS, 0.5),
                float_in(IOR, 1.5),
            ],
        ),
        Blend => (
            "Blend",
            "Bxdf",
            vec![bsdf_in(BXDF1), bsdf_in(BXDF2), float_in(FACTOR, 0.5)],
        ),
        Add => ("Add", "Bxdf", vec![bsdf_in(BXDF1), bsdf_in(BXDF2)]),
        Constant => ("Constant", "Input", vec![color_in(COLOR)]),
        Multiply => (
            "Multiply",
            "Math",
            vec![color_in(COLOR1), color_in(COLOR2)],
        ),
        Mix => (
            "Mix",
            "Math",
            vec![color_in(COLOR1), color_in(COLOR2), float_in(FACTOR, 0.5)],
        ),
        Checker => (
            "Checker",
            "Texture",
            vec![color_in(COLOR1), color_in(COLOR2), float_in(SCALE, 1.0)],
        ),
        ImageTexture => ("ImageTexture", "Texture", vec![text_in(TEXTURE)]),
    };
    NodeSignature {
        kind,
        name,
        category,
        sockets,
    }
}

/// Every built-in node kind, in a stable order.
pub fn schema() -> Schema {
    use NodeKind::*;
    let nodes = [
        Output,
        Lambert,
        OrenNayar,
        MicrofacetReflection,
        MicrofacetRefraction,
        Blend,
        Add,
        Constant,
        Multiply,
        Mix,
        Checker,
        ImageTexture,
    ]
    .into_iter()
    .map(signature)
    .collect();
    Schema {
        version: env!("CARGO_PKG_VERSION"),
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_have_unique_socket_names_per_node() {
        for sig in schema().nodes {
            let mut names: Vec<_> = sig.sockets.iter().map(|s| s.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), sig.sockets.len(), "duplicate socket on {}", sig.name);
        }
    }

    #[test]
    fn it_should_only_give_bsdf_sockets_to_root_and_combinators() {
        for sig in schema().nodes {
            let has_bsdf = sig.sockets.iter().any(|s| s.kind == SocketKind::Bsdf);
            let expected = matches!(sig.kind, NodeKind::Output | NodeKind::Blend | NodeKind::Add);
            assert_eq!(has_bsdf, expected, "{}", sig.name);
        }
    }

    #[test]
    fn it_should_serialize_schema() {
        let json = serde_json::to_value(schema()).unwrap();
        let nodes = json["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 12);
        assert_eq!(nodes[5]["name"], "Blend");
        assert_eq!(nodes[5]["sockets"][2]["kind"], "float");
    }
}
