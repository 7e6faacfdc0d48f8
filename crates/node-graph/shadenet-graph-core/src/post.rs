//! One-time preparation run between validation and the first evaluation.

use shadenet_api_core::Spectrum;

use crate::context::{GraphContext, Report, Warning};
use crate::node::{MaterialNode, Prepared, Property};
use crate::schema::sockets;
use crate::types::{Capability, NodeKind, OutputKind, ShadingPoint};

impl MaterialNode {
    /// Prepare this subtree for evaluation.
    ///
    /// Binds texture handles, records the fallback colour on `Output` and,
    /// when enabled, folds value subtrees that do not vary over the surface.
    /// Nodes already processed are skipped, so a second call changes nothing
    /// and acquires no further handles.
    pub fn post_process(&mut self, ctx: &GraphContext<'_>, report: &mut Report) {
        let path = self.type_name().to_string();
        self.post_process_at(ctx, report, &path);
    }

    fn post_process_at(&mut self, ctx: &GraphContext<'_>, report: &mut Report, path: &str) {
        if self.post_processed {
            return;
        }
        self.post_processed = true;

        for (name, prop) in self.properties_mut() {
            if let Some(child) = prop.node_mut() {
                let child_path = format!("{path}/{name}({})", child.type_name());
                child.post_process_at(ctx, report, &child_path);
            }
        }

        match self.kind() {
            NodeKind::Output => {
                self.prepared = Prepared::Fallback(Spectrum::from(ctx.config.fallback_color));
            }
            NodeKind::ImageTexture => {
                let name = self
                    .property(sockets::TEXTURE)
                    .and_then(Property::text)
                    .unwrap_or_default()
                    .to_string();
                let handle = ctx.textures.find_by_name(&name);
                if handle.is_none() {
                    report.warn(Warning::MissingTexture {
                        path: path.to_string(),
                        texture: name,
                    });
                }
                self.prepared = Prepared::Texture(handle);
            }
            _ if ctx.config.fold_constants && self.is_foldable() => {
                let value = self.resolve(&ShadingPoint::default());
                log::debug!("{path}: folded to {:?}", value.0);
                self.prepared = Prepared::Folded(value);
            }
            _ => {}
        }
    }

    fn is_foldable(&self) -> bool {
        self.kind().output() == OutputKind::Value
            && !self.kind().intrinsic().contains(Capability::VARYING)
            && self.children().all(|c| c.folded_value().is_some())
    }

    /// Drop everything validation and post-processing cached in this
    /// subtree, releasing texture handles. Until the next validity check an
    /// `Output` reads as invalid and shades with the fallback lobe.
    pub fn reset_preparation(&mut self) {
        for (_, prop) in self.properties_mut() {
            if let Some(child) = prop.node_mut() {
                child.reset_preparation();
            }
        }
        self.prepared = Prepared::None;
        self.post_processed = false;
        self.subtree = Capability::empty();
        self.valid = false;
        self.validated = false;
    }
}
