//! Builds node trees from descriptions.
//!
//! Parsing never fails on content. Each problem is recorded as a [`Warning`]
//! keyed by a node path such as `Output/Surface(Blend)/Bxdf1`, the offending
//! property or subtree is skipped and its siblings are still wired.

use crate::context::{GraphContext, Report, Warning};
use crate::desc::{NodeDesc, PropertyValue, Templates};
use crate::error::RegistryError;
use crate::node::{MaterialNode, Property};
use crate::types::SocketKind;

pub struct Parser<'a> {
    ctx: GraphContext<'a>,
    templates: &'a Templates,
    report: Report,
}

impl<'a> Parser<'a> {
    pub fn new(ctx: GraphContext<'a>, templates: &'a Templates) -> Self {
        Parser {
            ctx,
            templates,
            report: Report::new(),
        }
    }

    /// Apply every property of `desc` to `target`, creating nested nodes
    /// through the registry.
    pub fn parse(&mut self, desc: &NodeDesc, target: &mut MaterialNode) {
        let path = target.type_name().to_string();
        self.parse_at(desc, target, &path, 0);
    }

    pub fn finish(self) -> Report {
        self.report
    }

    fn parse_at(&mut self, desc: &NodeDesc, target: &mut MaterialNode, path: &str, depth: usize) {
        for prop in &desc.properties {
            if let PropertyValue::Missing { attribute } = &prop.value {
                let at = if prop.name.is_empty() {
                    path.to_string()
                } else {
                    format!("{path}/{}", prop.name)
                };
                self.report.warn(Warning::MissingAttribute {
                    path: at,
                    attribute: attribute.to_string(),
                });
                continue;
            }

            let Some(socket) = target.property_mut(&prop.name) else {
                self.report.warn(Warning::UnknownProperty {
                    path: path.to_string(),
                    property: prop.name.clone(),
                });
                continue;
            };

            let prop_path = format!("{path}/{}", prop.name);
            match &prop.value {
                PropertyValue::Literal(text) => {
                    self.apply_literal(socket, text, path, &prop.name);
                }
                PropertyValue::Node(child) => {
                    self.connect(socket, child, &prop_path, &prop.name, path, depth + 1);
                }
                PropertyValue::Reference(name) => {
                    let templates = self.templates;
                    match templates.get(name) {
                        Some(template) => {
                            self.connect(socket, template, &prop_path, &prop.name, path, depth + 1)
                        }
                        None => self.report.warn(Warning::UnknownReference {
                            path: prop_path,
                            reference: name.clone(),
                        }),
                    }
                }
                PropertyValue::Invalid { reason } => {
                    self.report.warn(Warning::MalformedLiteral {
                        path: path.to_string(),
                        property: prop.name.clone(),
                        detail: reason.clone(),
                    });
                }
                PropertyValue::Missing { .. } => {}
            }
        }
    }

    fn apply_literal(&mut self, socket: &mut Property, text: &str, path: &str, name: &str) {
        if socket.kind() == SocketKind::Bsdf {
            self.report.warn(Warning::KindMismatch {
                path: path.to_string(),
                property: name.to_string(),
                expected: SocketKind::Bsdf,
            });
            return;
        }
        let parsed = socket.set_literal(text);
        for token in parsed.malformed {
            self.report.warn(Warning::MalformedLiteral {
                path: path.to_string(),
                property: name.to_string(),
                detail: format!("token '{token}' read as a number prefix"),
            });
        }
        if parsed.extra > 0 {
            self.report.warn(Warning::ExtraComponents {
                path: path.to_string(),
                property: name.to_string(),
                count: parsed.extra,
            });
        }
    }

    /// Instantiate `desc` and connect it to `socket`. On any failure the
    /// socket keeps its current state.
    fn connect(
        &mut self,
        socket: &mut Property,
        desc: &NodeDesc,
        prop_path: &str,
        name: &str,
        path: &str,
        depth: usize,
    ) {
        if socket.kind() == SocketKind::Text {
            self.report.warn(Warning::KindMismatch {
                path: path.to_string(),
                property: name.to_string(),
                expected: SocketKind::Text,
            });
            return;
        }
        if depth > self.ctx.config.max_depth {
            self.report.warn(Warning::DepthExceeded {
                path: prop_path.to_string(),
                limit: self.ctx.config.max_depth,
            });
            return;
        }
        match self.ctx.registry.create(&desc.node_type) {
            Ok(mut node) => {
                let node_path = format!("{prop_path}({})", desc.node_type);
                self.parse_at(desc, &mut node, &node_path, depth);
                socket.connect(node);
            }
            Err(RegistryError::NotFound(node_type)) => {
                self.report.warn(Warning::UnknownNodeType {
                    path: prop_path.to_string(),
                    node_type,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::registry::NodeRegistry;
    use crate::schema::sockets;
    use crate::types::NodeKind;
    use shadenet_api_core::Value;
    use shadenet_resources_core::TextureManager;

    fn parse_with(desc: &NodeDesc, templates: &Templates, config: &EngineConfig) -> (MaterialNode, Report) {
        let registry = NodeRegistry::with_builtins();
        let textures = TextureManager::new("texture");
        let ctx = GraphContext::new(&registry, &textures, config);
        let mut root = MaterialNode::new(NodeKind::Output);
        let mut parser = Parser::new(ctx, templates);
        parser.parse(desc, &mut root);
        (root, parser.finish())
    }

    fn parse(desc: &NodeDesc) -> (MaterialNode, Report) {
        parse_with(desc, &Templates::new(), &EngineConfig::default())
    }

    #[test]
    fn it_should_wire_nested_lambert() {
        let desc = NodeDesc::new("Output")
            .node(sockets::SURFACE, NodeDesc::new("Lambert").literal(sockets::COLOR, "0.8 0.8 0.8 1.0"));
        let (root, report) = parse(&desc);
        assert!(report.is_empty(), "{report:?}");
        let lambert = root.property(sockets::SURFACE).unwrap().node().unwrap();
        assert_eq!(lambert.kind(), NodeKind::Lambert);
        assert_eq!(
            lambert.property(sockets::COLOR).unwrap().literal(),
            Some(Value::new(0.8, 0.8, 0.8, 1.0))
        );
    }

    #[test]
    fn it_should_skip_only_the_malformed_sibling() {
        let lambert = NodeDesc::new("Lambert")
            .literal("Colour", "1 0 0")
            .literal(sockets::COLOR, "0.5 abc 0.5");
        let mix = NodeDesc::new("Mix")
            .literal(sockets::COLOR1, "1 1 1")
            .node(sockets::COLOR2, NodeDesc::new("Voronoi"))
            .literal(sockets::FACTOR, "0.25 9 9 9 9");
        let desc = NodeDesc::new("Output").node(
            sockets::SURFACE,
            NodeDesc::new("Blend")
                .node(sockets::BXDF1, lambert)
                .node(sockets::BXDF2, NodeDesc::new("OrenNayar").node(sockets::COLOR, mix)),
        );
        let (root, report) = parse(&desc);

        let kinds: Vec<_> = report
            .warnings()
            .iter()
            .map(|w| match w {
                Warning::UnknownProperty { .. } => "unknown_property",
                Warning::MalformedLiteral { .. } => "malformed",
                Warning::UnknownNodeType { .. } => "unknown_type",
                Warning::ExtraComponents { count, .. } => {
                    assert_eq!(*count, 1);
                    "extra"
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(kinds, vec!["unknown_property", "malformed", "unknown_type", "extra"]);
        assert_eq!(
            report.warnings()[0].path(),
            "Output/Surface(Blend)/Bxdf1(Lambert)"
        );
        assert_eq!(
            report.warnings()[2].path(),
            "Output/Surface(Blend)/Bxdf2(OrenNayar)/Color(Mix)/Color2"
        );

        let blend = root.property(sockets::SURFACE).unwrap().node().unwrap();
        let lambert = blend.property(sockets::BXDF1).unwrap().node().unwrap();
        assert_eq!(
            lambert.property(sockets::COLOR).unwrap().literal(),
            Some(Value::new(0.5, 0.0, 0.5, 0.0))
        );
        let oren = blend.property(sockets::BXDF2).unwrap().node().unwrap();
        let mix = oren.property(sockets::COLOR).unwrap().node().unwrap();
        assert_eq!(mix.property(sockets::COLOR2).unwrap().literal(), Some(Value::ZERO));
        assert_eq!(
            mix.property(sockets::FACTOR).unwrap().literal(),
            Some(Value::new(0.25, 9.0, 9.0, 9.0))
        );
    }

    #[test]
    fn it_should_reject_mismatched_socket_kinds() {
        let desc = NodeDesc::new("Output").literal(sockets::SURFACE, "1 1 1");
        let (root, report) = parse(&desc);
        assert!(matches!(
            report.warnings(),
            [Warning::KindMismatch { expected: SocketKind::Bsdf, .. }]
        ));
        assert!(!root.property(sockets::SURFACE).unwrap().is_connected());

        let desc = NodeDesc::new("Output").node(
            sockets::SURFACE,
            NodeDesc::new("Lambert").node(
                sockets::COLOR,
                NodeDesc::new("ImageTexture").node(sockets::TEXTURE, NodeDesc::new("Constant")),
            ),
        );
        let (_, report) = parse(&desc);
        assert!(matches!(
            report.warnings(),
            [Warning::KindMismatch { expected: SocketKind::Text, .. }]
        ));
    }

    #[test]
    fn it_should_instantiate_independent_copies_of_templates() {
        let mut templates = Templates::new();
        templates.insert(
            "paint".into(),
            NodeDesc::new("Lambert").literal(sockets::COLOR, "0.2 0.4 0.6"),
        );
        let desc = NodeDesc::new("Output").node(
            sockets::SURFACE,
            NodeDesc::new("Add")
                .reference(sockets::BXDF1, "paint")
                .reference(sockets::BXDF2, "paint")
                .reference("Bxdf3", "paint"),
        );
        let (mut root, report) = parse_with(&desc, &templates, &EngineConfig::default());
        assert_eq!(report.len(), 1);
        assert_eq!(root.node_count(), 4);

        let add = root
            .property_mut(sockets::SURFACE)
            .unwrap()
            .node_mut()
            .unwrap();
        add.property_mut(sockets::BXDF1)
            .unwrap()
            .node_mut()
            .unwrap()
            .property_mut(sockets::COLOR)
            .unwrap()
            .set_literal("1");
        let second = add.property(sockets::BXDF2).unwrap().node().unwrap();
        assert_eq!(
            second.property(sockets::COLOR).unwrap().literal(),
            Some(Value::new(0.2, 0.4, 0.6, 0.0))
        );
    }

    #[test]
    fn it_should_cut_self_referencing_templates_at_max_depth() {
        let mut templates = Templates::new();
        templates.insert(
            "loop".into(),
            NodeDesc::new("Add").reference(sockets::BXDF1, "loop"),
        );
        let desc = NodeDesc::new("Output").reference(sockets::SURFACE, "loop");
        let config = EngineConfig {
            max_depth: 3,
            ..Default::default()
        };
        let (root, report) = parse_with(&desc, &templates, &config);
        assert_eq!(root.node_count(), 4);
        assert!(matches!(
            report.warnings(),
            [Warning::DepthExceeded { limit: 3, .. }]
        ));

        let desc = NodeDesc::new("Output").reference(sockets::SURFACE, "missing");
        let (_, report) = parse_with(&desc, &templates, &config);
        assert!(matches!(report.warnings(), [Warning::UnknownReference { .. }]));
    }

    #[test]
    fn it_should_report_missing_and_invalid_values() {
        let mut desc = NodeDesc::new("Output");
        desc.properties.push(crate::desc::PropertyDesc {
            name: String::new(),
            value: PropertyValue::Missing { attribute: "name" },
        });
        desc.properties.push(crate::desc::PropertyDesc {
            name: sockets::SURFACE.into(),
            value: PropertyValue::Invalid {
                reason: "null".into(),
            },
        });
        let (root, report) = parse(&desc);
        assert_eq!(report.warnings()[0].path(), "Output");
        assert!(matches!(report.warnings()[1], Warning::MalformedLiteral { .. }));
        assert!(!root.property(sockets::SURFACE).unwrap().is_connected());
    }
}
