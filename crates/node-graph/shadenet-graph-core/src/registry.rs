//! String-keyed node factories.
//!
//! The set of node kinds is closed, but the names that create them are not:
//! hosts can register aliases or factories that preset socket literals.

use hashbrown::HashMap;

use crate::error::RegistryError;
use crate::node::MaterialNode;
use crate::types::NodeKind;

pub type NodeFactory = Box<dyn Fn() -> MaterialNode + Send + Sync>;

pub struct NodeRegistry {
    factories: HashMap<String, NodeFactory>,
}

impl NodeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        NodeRegistry {
            factories: HashMap::new(),
        }
    }

    /// A registry holding every built-in node kind under its schema name.
    /// `Output` is not creatable; it only appears as a graph root.
    pub fn with_builtins() -> Self {
        let mut registry = NodeRegistry::new();
        for sig in crate::schema::schema().nodes {
            if sig.kind == NodeKind::Output {
                continue;
            }
            let kind = sig.kind;
            registry.register(sig.name, move || MaterialNode::new(kind));
        }
        registry
    }

    /// Register `factory` under `name`. Returns true when an earlier
    /// factory with the same name was replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn() -> MaterialNode + Send + Sync + 'static,
    {
        let name = name.into();
        log::debug!("registering node type '{name}'");
        self.factories.insert(name, Box::new(factory)).is_some()
    }

    /// Create a node by exact, case-sensitive name.
    pub fn create(&self, name: &str) -> Result<MaterialNode, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        let mut node = factory();
        node.set_type_name(name);
        Ok(node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        NodeRegistry::with_builtins()
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::sockets;
    use shadenet_api_core::Value;

    #[test]
    fn it_should_create_builtins_by_exact_name() {
        let registry = NodeRegistry::with_builtins();
        let node = registry.create("Lambert").unwrap();
        assert_eq!(node.kind(), NodeKind::Lambert);
        assert_eq!(
            registry.create("lambert").unwrap_err(),
            RegistryError::NotFound("lambert".into())
        );
        assert!(!registry.contains("Output"));
        assert_eq!(registry.names().len(), 11);
    }

    #[test]
    fn it_should_register_aliases_with_presets() {
        let mut registry = NodeRegistry::with_builtins();
        let replaced = registry.register("Clay", || {
            let mut node = MaterialNode::new(NodeKind::OrenNayar);
            if let Some(p) = node.property_mut(sockets::ROUGHNESS) {
                p.set_literal("0.8");
            }
            node
        });
        assert!(!replaced);
        let clay = registry.create("Clay").unwrap();
        assert_eq!(clay.kind(), NodeKind::OrenNayar);
        assert_eq!(clay.type_name(), "Clay");
        assert_eq!(
            clay.property(sockets::ROUGHNESS).unwrap().literal(),
            Some(Value::new(0.8, 0.0, 0.0, 0.0))
        );
        assert!(registry.register("Clay", || MaterialNode::new(NodeKind::Lambert)));
    }

    #[test]
    fn it_should_start_empty() {
        let registry = NodeRegistry::new();
        assert!(registry.names().is_empty());
        assert!(registry.create("Lambert").is_err());
    }
}
