//! shadenet-graph-core: the material node graph engine.
//!
//! A material is described as a tree of typed nodes wired through named
//! sockets. The engine turns a description into a [`MaterialGraph`], checks
//! that it can scatter light, prepares it once, and then composes a runtime
//! [`Bsdf`](shadenet_api_core::Bsdf) for every shading point.
//!
//! ```text
//! description ──parse──▶ graph ──check_validity──▶ post_process ──▶ update_bsdf (per point)
//! ```

pub mod config;
pub mod context;
pub mod desc;
pub mod error;
pub mod eval;
pub mod graph;
pub mod node;
pub mod parse;
pub mod post;
pub mod registry;
pub mod schema;
pub mod types;
pub mod validate;

pub use config::EngineConfig;
pub use context::{GraphContext, Report, Warning};
pub use desc::{GraphDesc, LibraryDesc, NodeDesc, PropertyDesc, PropertyValue, Templates};
pub use error::{GraphError, RegistryError};
pub use graph::MaterialGraph;
pub use node::{Link, MaterialNode, Property};
pub use registry::{NodeFactory, NodeRegistry};
pub use types::{Capability, NodeKind, OutputKind, ShadingPoint, SocketKind};
