//! Per-shading-point evaluation.
//!
//! Everything here takes `&self`: once a graph has been post-processed it is
//! shared read-only between rendering threads, and each thread composes into
//! its own [`Bsdf`].
//!
//! - [`MaterialNode::resolve`] computes the value a node feeds into a colour or float socket.
//! - [`MaterialNode::update_bsdf`] walks BSDF sockets top-down and appends weighted lobes.

use shadenet_api_core::coercion::unit_clamp;
use shadenet_api_core::{Bsdf, LobeKind, Spectrum, Value};

use crate::node::{Link, MaterialNode, Prepared, Property};
use crate::schema::sockets;
use crate::types::{NodeKind, ShadingPoint};


/// Lobe colour of an `Output` that was never post-processed.
pub const DEFAULT_FALLBACK: Spectrum = Spectrum::new(0.3, 0.0, 0.0);

impl Property {
    /// The literal, or the connected node's value. Text sockets read as zero.
    pub fn resolve(&self, sp: &ShadingPoint) -> Value {
        match self.link() {
            Link::Literal(v) => *v,
            Link::Text(_) => Value::ZERO,
            Link::Node(node) => node.resolve(sp),
        }
    }

    /// Forward BSDF composition to the connected node, if any.
    pub fn accumulate(&self, bsdf: &mut Bsdf, weight: Spectrum, sp: &ShadingPoint) {
        if let Some(node) = self.node() {
            node.update_bsdf(bsdf, weight, sp);
        }
    }
}

impl MaterialNode {
    /// Value this node outputs at `sp`. Nodes that scatter output zero.
    pub fn resolve(&self, sp: &ShadingPoint) -> Value {
        if let Prepared::Folded(v) = self.prepared {
            return v;
        }
        match self.kind() {
            NodeKind::Constant => self.input(sockets::COLOR, sp),
            NodeKind::Multiply => self
                .input(sockets::COLOR1, sp)
                .mul(&self.input(sockets::COLOR2, sp)),
            NodeKind::Mix => {
                let f = unit_clamp(self.input(sockets::FACTOR, sp).x());
                self.input(sockets::COLOR1, sp)
                    .lerp(&self.input(sockets::COLOR2, sp), f)
            }
            NodeKind::Checker => {
                let scale = self.input(sockets::SCALE, sp).x();
                // Float to int casts saturate and map NaN to 0.
                let u = (sp.uv[0] * scale).floor() as i64;
                let v = (sp.uv[1] * scale).floor() as i64;
                if (u.rem_euclid(2) + v.rem_euclid(2)) % 2 == 0 {
                    self.input(sockets::COLOR1, sp)
                } else {
                    self.input(sockets::COLOR2, sp)
                }
            }
            NodeKind::ImageTexture => match &self.prepared {
                Prepared::Texture(Some(image)) => image.sample_nearest(sp.uv),
                _ => Value::ZERO,
            },
            NodeKind::Output
            | NodeKind::Lambert
            | NodeKind::OrenNayar
            | NodeKind::MicrofacetReflection
            | NodeKind::MicrofacetRefraction
            | NodeKind::Blend
            | NodeKind::Add => Value::ZERO,
        }
    }

    /// Append this subtree's lobes to `bsdf`, each scaled by `weight`.
    ///
    /// A black weight adds nothing. An `Output` that failed validation adds a
    /// single diffuse lobe in the fallback colour; a valid one forwards to its
    /// `Surface` with full weight. Children are visited in socket order.
    pub fn update_bsdf(&self, bsdf: &mut Bsdf, weight: Spectrum, sp: &ShadingPoint) {
        if weight.is_black() {
            return;
        }
        match self.kind() {
            NodeKind::Output => {
                if self.valid {
                    self.accumulate(sockets::SURFACE, bsdf, Spectrum::WHITE, sp);
                } else {
                    let reflectance = match self.prepared {
                        Prepared::Fallback(color) => color,
                        _ => DEFAULT_FALLBACK,
                    };
                    bsdf.add_lobe(LobeKind::Lambert { reflectance }, weight);
                }
            }
            NodeKind::Blend => {
                let f = unit_clamp(self.input(sockets::FACTOR, sp).x());
                self.accumulate(sockets::BXDF1, bsdf, weight * (1.0 - f), sp);
                self.accumulate(sockets::BXDF2, bsdf, weight * f, sp);
            }
            NodeKind::Add => {
                self.accumulate(sockets::BXDF1, bsdf, weight, sp);
                self.accumulate(sockets::BXDF2, bsdf, weight, sp);
            }
            NodeKind::Lambert => bsdf.add_lobe(
                LobeKind::Lambert {
                    reflectance: self.color(sockets::COLOR, sp),
                },
                weight,
            ),
            NodeKind::OrenNayar => bsdf.add_lobe(
                LobeKind::OrenNayar {
                    reflectance: self.color(sockets::COLOR, sp),
                    sigma: self.input(sockets::ROUGHNESS, sp).x(),
                },
                weight,
            ),
            NodeKind::MicrofacetReflection => bsdf.add_lobe(
                LobeKind::MicrofacetReflection {
                    base_color: self.color(sockets::BASE_COLOR, sp),
                    roughness: self.input(sockets::ROUGHNESS, sp).x(),
                },
                weight,
            ),
            NodeKind::MicrofacetRefraction => bsdf.add_lobe(
                LobeKind::MicrofacetRefraction {
                    transmittance: self.color(sockets::BASE_COLOR, sp),
                    roughness: self.input(sockets::ROUGHNESS, sp).x(),
                    ior: self.input(sockets::IOR, sp).x(),
                },
                weight,
            ),
            NodeKind::Constant
            | NodeKind::Multiply
            | NodeKind::Mix
            | NodeKind::Checker
            | NodeKind::ImageTexture => {}
        }
    }

    /// Compose a fresh BSDF for `sp` with unit weight.
    pub fn evaluate(&self, sp: &ShadingPoint) -> Bsdf {
        let mut bsdf = Bsdf::new();
        self.update_bsdf(&mut bsdf, Spectrum::WHITE, sp);
        bsdf
    }

    fn input(&self, socket: &str, sp: &ShadingPoint) -> Value {
        self.property(socket)
            .map(|p| p.resolve(sp))
            .unwrap_or(Value::ZERO)
    }

    fn color(&self, socket: &str, sp: &ShadingPoint) -> Spectrum {
        Spectrum::from(self.input(socket, sp))
    }

    fn accumulate(&self, socket: &str, bsdf: &mut Bsdf, weight: Spectrum, sp: &ShadingPoint) {
        if let Some(prop) = self.property(socket) {
            prop.accumulate(bsdf, weight, sp);
        }
    }
}
