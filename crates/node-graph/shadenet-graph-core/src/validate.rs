//! Capability inference and validity checking.
//!
//! Both walks are bottom-up and pure apart from caching their result on each
//! node, so they can be re-run after the tree changes.

use crate::node::{MaterialNode, Property};
use crate::schema::sockets;
use crate::types::{Capability, NodeKind};

impl MaterialNode {
    /// Recompute the capability mask of this subtree without touching validity.
    pub fn update_subtree_type(&mut self) -> Capability {
        let mut mask = self.kind().intrinsic();
        for (_, prop) in self.properties_mut() {
            if let Some(child) = prop.node_mut() {
                mask |= child.update_subtree_type();
            }
        }
        self.subtree = mask;
        mask
    }

    /// Infer capability masks and validity for this subtree.
    ///
    /// A node is valid when every connected child is valid and produces what
    /// its socket accepts. `Output` additionally needs a connected `Surface`
    /// whose subtree can scatter.
    pub fn check_validity(&mut self) -> bool {
        let mut mask = self.kind().intrinsic();
        let mut valid = true;
        for (_, prop) in self.properties_mut() {
            let socket = prop.kind();
            if let Some(child) = prop.node_mut() {
                let child_valid = child.check_validity();
                mask |= child.subtree;
                valid &= child_valid && socket.accepts(child.kind().output());
            }
        }

        if self.kind() == NodeKind::Output {
            let scatters = self
                .property(sockets::SURFACE)
                .and_then(Property::node)
                .is_some_and(|root| root.subtree.contains(Capability::BSDF));
            valid &= scatters;
        }

        self.subtree = mask;
        self.valid = valid;
        self.validated = true;
        valid
    }
}
