//! XML reader.
//!
//! ```xml
//! <Material name="painted">
//!   <Node name="paint" node="Lambert">
//!     <Property name="Color" type="color" value="0.8 0.1 0.1 1"/>
//!   </Node>
//!   <Property name="Surface" type="node" node="Blend">
//!     <Property name="Bxdf1" type="ref" value="paint"/>
//!     <Property name="Bxdf2" type="node">
//!       <Node node="MicrofacetReflection"/>
//!     </Property>
//!     <Property name="Factor" type="float" value="0.25"/>
//!   </Property>
//! </Material>
//! ```

use roxmltree::{Document, Node};

use super::{GraphDesc, LibraryDesc, NodeDesc, PropertyDesc, PropertyValue, Templates};
use crate::context::Warning;
use crate::error::GraphError;

const MATERIAL: &str = "Material";
const MATERIALS: &str = "Materials";
const PROPERTY: &str = "Property";
const NODE: &str = "Node";

/// Read a single `<Material>` document.
pub fn graph_from_xml(text: &str) -> Result<GraphDesc, GraphError> {
    let doc = Document::parse(text)?;
    let root = expect_root(&doc, MATERIAL)?;
    Ok(graph_from_element(root, &Templates::new()))
}

/// Read a `<Materials>` document holding any number of `<Material>` elements.
/// Templates declared directly under `<Materials>` are visible to every
/// material; a material's own templates shadow them.
pub fn library_from_xml(text: &str) -> Result<LibraryDesc, GraphError> {
    let doc = Document::parse(text)?;
    let root = expect_root(&doc, MATERIALS)?;
    let (shared, warnings) = templates_in(root, MATERIALS);
    let materials = root
        .children()
        .filter(|n| n.is_element() && n.has_tag_name(MATERIAL))
        .map(|el| graph_from_element(el, &shared))
        .collect();
    Ok(LibraryDesc {
        materials,
        warnings,
    })
}

fn expect_root<'a, 'input>(
    doc: &'a Document<'input>,
    expected: &'static str,
) -> Result<Node<'a, 'input>, GraphError> {
    let root = doc.root_element();
    if root.has_tag_name(expected) {
        Ok(root)
    } else {
        Err(GraphError::UnexpectedRoot {
            expected,
            found: root.tag_name().name().to_string(),
        })
    }
}

fn graph_from_element(el: Node, inherited: &Templates) -> GraphDesc {
    let mut templates = inherited.clone();
    let (own, warnings) = templates_in(el, MATERIAL);
    templates.extend(own);
    GraphDesc {
        name: el.attribute("name").map(str::to_string),
        output: NodeDesc {
            node_type: "Output".to_string(),
            name: None,
            properties: properties_in(el),
        },
        templates,
        warnings,
    }
}

/// `<Node>` templates directly under `el`. Each unusable one becomes a
/// warning at `scope/Node[i]`, `i` counting `<Node>` siblings.
fn templates_in(el: Node, scope: &str) -> (Templates, Vec<Warning>) {
    let mut templates = Templates::new();
    let mut warnings = Vec::new();
    for (index, node) in el
        .children()
        .filter(|n| n.is_element() && n.has_tag_name(NODE))
        .enumerate()
    {
        let path = format!("{scope}/Node[{index}]");
        let Some(name) = node.attribute("name") else {
            warnings.push(Warning::MissingAttribute {
                path,
                attribute: "name".to_string(),
            });
            continue;
        };
        match node_value(node, true) {
            PropertyValue::Node(desc) => {
                templates.insert(name.to_string(), *desc);
            }
            _ => warnings.push(Warning::MissingAttribute {
                path,
                attribute: "node".to_string(),
            }),
        }
    }
    (templates, warnings)
}

fn properties_in(el: Node) -> Vec<PropertyDesc> {
    el.children()
        .filter(|n| n.is_element() && n.has_tag_name(PROPERTY))
        .map(property_from_element)
        .collect()
}

fn property_from_element(el: Node) -> PropertyDesc {
    let Some(name) = el.attribute("name") else {
        return PropertyDesc {
            name: String::new(),
            value: PropertyValue::Missing { attribute: "name" },
        };
    };
    let value = match el.attribute("type") {
        Some("node") => {
            if el.attribute("node").is_some() {
                node_value(el, false)
            } else {
                match el
                    .children()
                    .find(|n| n.is_element() && n.has_tag_name(NODE))
                {
                    Some(child) => node_value(child, true),
                    None => PropertyValue::Missing { attribute: "node" },
                }
            }
        }
        Some("ref") => match el.attribute("value") {
            Some(target) => PropertyValue::Reference(target.to_string()),
            None => PropertyValue::Missing { attribute: "value" },
        },
        _ => match el.attribute("value") {
            Some(text) => PropertyValue::Literal(text.to_string()),
            None => PropertyValue::Missing { attribute: "value" },
        },
    };
    PropertyDesc {
        name: name.to_string(),
        value,
    }
}

/// Element carrying a `node` type attribute and nested properties. Inline
/// property elements use `name` for the socket, so only `<Node>` elements
/// contribute a node name.
fn node_value(el: Node, named: bool) -> PropertyValue {
    match el.attribute("node") {
        Some(node_type) => PropertyValue::Node(Box::new(NodeDesc {
            node_type: node_type.to_string(),
            name: if named {
                el.attribute("name").map(str::to_string)
            } else {
                None
            },
            properties: properties_in(el),
        })),
        None => PropertyValue::Missing { attribute: "node" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <Material name="painted">
          <Node name="paint" node="Lambert">
            <Property name="Color" type="color" value="0.8 0.1 0.1 1"/>
          </Node>
          <Property name="Surface" type="node" node="Blend">
            <Property name="Bxdf1" type="ref" value="paint"/>
            <Property name="Bxdf2" type="node">
              <Node node="MicrofacetReflection"/>
            </Property>
            <Property name="Factor" type="float" value="0.25"/>
            <Property type="float" value="1"/>
            <Property name="Broken" type="node"/>
          </Property>
        </Material>"#;

    #[test]
    fn it_should_read_nested_and_inline_nodes() {
        let graph = graph_from_xml(DOC).unwrap();
        assert_eq!(graph.name.as_deref(), Some("painted"));
        assert_eq!(graph.output.node_type, "Output");
        assert_eq!(graph.output.properties.len(), 1);

        let PropertyValue::Node(blend) = &graph.output.properties[0].value else {
            panic!("surface should be a node");
        };
        assert_eq!(blend.node_type, "Blend");
        let values: Vec<_> = blend.properties.iter().map(|p| &p.value).collect();
        assert_eq!(values[0], &PropertyValue::Reference("paint".into()));
        assert!(matches!(values[1], PropertyValue::Node(n) if n.node_type == "MicrofacetReflection"));
        assert_eq!(values[2], &PropertyValue::Literal("0.25".into()));
        assert_eq!(values[3], &PropertyValue::Missing { attribute: "name" });
        assert_eq!(values[4], &PropertyValue::Missing { attribute: "node" });
    }

    #[test]
    fn it_should_collect_templates() {
        let graph = graph_from_xml(DOC).unwrap();
        let paint = graph.templates.get("paint").unwrap();
        assert_eq!(paint.node_type, "Lambert");
        assert_eq!(paint.properties[0].name, "Color");
    }

    #[test]
    fn it_should_reject_wrong_root_and_bad_xml() {
        assert!(matches!(
            graph_from_xml("<Scene/>"),
            Err(GraphError::UnexpectedRoot { expected: "Material", .. })
        ));
        assert!(matches!(graph_from_xml("<Material>"), Err(GraphError::Xml(_))));
    }

    #[test]
    fn it_should_share_library_templates_with_local_override() {
        let text = r#"
            <Materials>
              <Node name="base" node="Lambert"/>
              <Material name="a">
                <Property name="Surface" type="ref" value="base"/>
              </Material>
              <Material name="b">
                <Node name="base" node="OrenNayar"/>
                <Property name="Surface" type="ref" value="base"/>
              </Material>
            </Materials>"#;
        let library = library_from_xml(text).unwrap();
        let graphs = &library.materials;
        assert_eq!(graphs.len(), 2);
        assert!(library.warnings.is_empty());
        assert_eq!(graphs[0].templates["base"].node_type, "Lambert");
        assert_eq!(graphs[1].templates["base"].node_type, "OrenNayar");
    }

    #[test]
    fn it_should_carry_unusable_templates_as_warnings() {
        let graph = graph_from_xml(
            r#"<Material>
                 <Node name="paint"/>
                 <Node node="Lambert"/>
                 <Node name="ok" node="Lambert"/>
               </Material>"#,
        )
        .unwrap();
        assert_eq!(graph.templates.len(), 1);
        assert_eq!(
            graph.warnings,
            vec![
                Warning::MissingAttribute {
                    path: "Material/Node[0]".into(),
                    attribute: "node".into(),
                },
                Warning::MissingAttribute {
                    path: "Material/Node[1]".into(),
                    attribute: "name".into(),
                },
            ]
        );

        let library = library_from_xml(
            r#"<Materials>
                 <Node node="Lambert"/>
                 <Material name="a"/>
               </Materials>"#,
        )
        .unwrap();
        assert_eq!(library.warnings[0].path(), "Materials/Node[0]");
        assert!(library.materials[0].warnings.is_empty());
    }
}
