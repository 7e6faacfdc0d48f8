//! A material graph: one `Output` node and the tree it owns.

use shadenet_api_core::{Bsdf, Spectrum};

use crate::context::{GraphContext, Report};
use crate::desc::{self, GraphDesc};
use crate::error::GraphError;
use crate::node::MaterialNode;
use crate::parse::Parser;
use crate::types::{Capability, NodeKind, ShadingPoint};

#[derive(Debug)]
pub struct MaterialGraph {
    name: Option<String>,
    root: MaterialNode,
}

impl MaterialGraph {
    /// A graph whose `Output` has nothing connected.
    pub fn new() -> Self {
        MaterialGraph {
            name: None,
            root: MaterialNode::new(NodeKind::Output),
        }
    }

    /// Build a graph from a description. Content problems end up in the
    /// report; the graph is always returned.
    pub fn parse(desc: &GraphDesc, ctx: GraphContext<'_>) -> (Self, Report) {
        let mut graph = MaterialGraph::new();
        graph.name = desc.name.clone();
        let mut report = Report::new();
        for warning in &desc.warnings {
            report.warn(warning.clone());
        }
        let mut parser = Parser::new(ctx, &desc.templates);
        parser.parse(&desc.output, &mut graph.root);
        report.merge(parser.finish());
        log::debug!(
            "parsed material {:?}: {} node(s), {} warning(s)",
            graph.name,
            graph.root.node_count(),
            report.len()
        );
        (graph, report)
    }

    /// Parse a `<Material>` document.
    pub fn from_xml(text: &str, ctx: GraphContext<'_>) -> Result<(Self, Report), GraphError> {
        let desc = desc::xml::graph_from_xml(text)?;
        Ok(Self::parse(&desc, ctx))
    }

    /// Parse a JSON material document.
    pub fn from_json(text: &str, ctx: GraphContext<'_>) -> Result<(Self, Report), GraphError> {
        let desc = desc::json::graph_from_json(text)?;
        Ok(Self::parse(&desc, ctx))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn root(&self) -> &MaterialNode {
        &self.root
    }

    /// Mutable access to the tree. Cached preparation is dropped, so call
    /// [`prepare`](Self::prepare) again before evaluating.
    pub fn root_mut(&mut self) -> &mut MaterialNode {
        self.root.reset_preparation();
        &mut self.root
    }

    pub fn check_validity(&mut self) -> bool {
        self.root.check_validity()
    }

    pub fn is_valid(&self) -> bool {
        self.root.is_valid()
    }

    pub fn subtree_type(&self) -> Capability {
        self.root.subtree_type()
    }

    pub fn post_process(&mut self, ctx: &GraphContext<'_>, report: &mut Report) {
        self.root.post_process(ctx, report);
    }

    pub fn is_prepared(&self) -> bool {
        self.root.is_validated() && self.root.is_post_processed()
    }

    /// Validate then post-process. Must complete before the graph is shared
    /// with evaluating threads.
    pub fn prepare(&mut self, ctx: &GraphContext<'_>) -> Report {
        let mut report = Report::new();
        let valid = self.check_validity();
        if !valid {
            log::debug!(
                "material {:?} is invalid and will shade with the fallback lobe",
                self.name
            );
        }
        self.post_process(ctx, &mut report);
        report
    }

    pub fn update_bsdf(&self, bsdf: &mut Bsdf, weight: Spectrum, sp: &ShadingPoint) {
        self.root.update_bsdf(bsdf, weight, sp);
    }

    pub fn evaluate(&self, sp: &ShadingPoint) -> Bsdf {
        self.root.evaluate(sp)
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl Default for MaterialGraph {
    fn default() -> Self {
        MaterialGraph::new()
    }
}
