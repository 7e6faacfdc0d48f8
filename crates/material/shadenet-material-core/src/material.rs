use shadenet_api_core::{Bsdf, Spectrum};
use shadenet_graph_core::{GraphContext, MaterialGraph, Report, ShadingPoint};

/// A named, prepared material graph.
#[derive(Debug)]
pub struct Material {
    name: String,
    graph: MaterialGraph,
}

impl Material {
    /// Wrap `graph` under `name`. The graph is expected to be prepared
    /// already; see [`Material::prepared`].
    pub fn new(name: impl Into<String>, graph: MaterialGraph) -> Self {
        let name = name.into();
        let mut graph = graph;
        graph.set_name(name.clone());
        Material { name, graph }
    }

    /// Wrap and prepare `graph`, returning the preparation warnings.
    pub fn prepared(
        name: impl Into<String>,
        graph: MaterialGraph,
        ctx: &GraphContext<'_>,
    ) -> (Self, Report) {
        let mut material = Material::new(name, graph);
        let report = material.graph.prepare(ctx);
        (material, report)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &MaterialGraph {
        &self.graph
    }

    pub fn is_valid(&self) -> bool {
        self.graph.is_valid()
    }

    pub fn update_bsdf(&self, bsdf: &mut Bsdf, weight: Spectrum, sp: &ShadingPoint) {
        self.graph.update_bsdf(bsdf, weight, sp);
    }

    pub fn evaluate(&self, sp: &ShadingPoint) -> Bsdf {
        self.graph.evaluate(sp)
    }
}
