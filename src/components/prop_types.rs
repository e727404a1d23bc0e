// Declared propTypes extraction
#![allow(dead_code)]

use super::{ComponentRegistry, ComponentUpdate, DeclaredProp, DeclaredSchema, OwnerKey};
use crate::parser::common::{
    ancestors, named_children, node_location, node_text, string_literal_value,
};
use std::path::{Path, PathBuf};
use tracing::trace;
use tree_sitter::Node;

/// Expression kinds that can carry a custom validator function
const VALIDATOR_KINDS: [&str; 3] = ["arrow_function", "function_expression", "generator_function"];

/// Extracts declared prop schemas from `Foo.propTypes = {...}` assignments
/// and `static propTypes = {...}` class fields.
///
/// Schema shapes that cannot be statically enumerated (a non-literal
/// propTypes value, spread or computed keys inside the literal) set the
/// component's validation opt-out instead of producing a partial schema.
pub struct SchemaExtractor<'s> {
    file: PathBuf,
    source: &'s str,
}

impl<'s> SchemaExtractor<'s> {
    pub fn new(file: &Path, source: &'s str) -> Self {
        Self {
            file: file.to_path_buf(),
            source,
        }
    }

    /// Inspect a node and merge any declared schema it carries into the
    /// registry. Returns the custom validator functions found, paired with
    /// the component that owns them, for later re-analysis.
    pub fn observe<'t>(
        &self,
        registry: &mut ComponentRegistry,
        node: Node<'t>,
    ) -> Vec<(OwnerKey, Node<'t>)> {
        match node.kind() {
            "assignment_expression" => self.observe_assignment(registry, node),
            "field_definition" => self.observe_class_field(registry, node),
            _ => Vec::new(),
        }
    }

    /// `Foo.propTypes = { ... }`
    fn observe_assignment<'t>(
        &self,
        registry: &mut ComponentRegistry,
        node: Node<'t>,
    ) -> Vec<(OwnerKey, Node<'t>)> {
        let Some(left) = node.child_by_field_name("left") else {
            return Vec::new();
        };
        if left.kind() != "member_expression" {
            return Vec::new();
        }
        let (Some(object), Some(property)) = (
            left.child_by_field_name("object"),
            left.child_by_field_name("property"),
        ) else {
            return Vec::new();
        };
        if object.kind() != "identifier" || node_text(property, self.source) != "propTypes" {
            return Vec::new();
        }

        let component_name = node_text(object, self.source);
        let Some(key) = registry.find_by_name(component_name) else {
            trace!("propTypes assignment for unknown component {}", component_name);
            return Vec::new();
        };

        let Some(value) = node.child_by_field_name("right") else {
            return Vec::new();
        };
        self.attach_schema(registry, key, value)
    }

    /// `static propTypes = { ... }` inside a class component
    fn observe_class_field<'t>(
        &self,
        registry: &mut ComponentRegistry,
        node: Node<'t>,
    ) -> Vec<(OwnerKey, Node<'t>)> {
        let is_static = {
            let mut cursor = node.walk();
            let x = node.children(&mut cursor).any(|c| c.kind() == "static");
            x
        };
        if !is_static {
            return Vec::new();
        }
        let Some(property) = node.child_by_field_name("property") else {
            return Vec::new();
        };
        if node_text(property, self.source) != "propTypes" {
            return Vec::new();
        }

        let Some(key) = ancestors(node)
            .filter(|n| matches!(n.kind(), "class_declaration" | "class"))
            .map(|n| OwnerKey::Component(n.id()))
            .find(|key| registry.get(key).is_some())
        else {
            return Vec::new();
        };

        let Some(value) = node.child_by_field_name("value") else {
            return Vec::new();
        };
        self.attach_schema(registry, key, value)
    }

    fn attach_schema<'t>(
        &self,
        registry: &mut ComponentRegistry,
        key: OwnerKey,
        value: Node<'t>,
    ) -> Vec<(OwnerKey, Node<'t>)> {
        if value.kind() != "object" {
            // `Foo.propTypes = somewhereElse` - nothing to enumerate
            registry.merge(
                key,
                ComponentUpdate {
                    ignore_validation: true,
                    ..ComponentUpdate::default()
                },
            );
            return Vec::new();
        }

        let mut schema = DeclaredSchema::default();
        let mut validators = Vec::new();
        let mut ignore_validation = false;

        for entry in named_children(value) {
            match entry.kind() {
                "pair" => {
                    let Some(key_node) = entry.child_by_field_name("key") else {
                        continue;
                    };
                    let name = match key_node.kind() {
                        "property_identifier" => node_text(key_node, self.source).to_string(),
                        "string" => string_literal_value(key_node, self.source),
                        "number" => node_text(key_node, self.source).to_string(),
                        // Computed keys defeat static enumeration
                        _ => {
                            ignore_validation = true;
                            continue;
                        }
                    };

                    let pair_value = entry.child_by_field_name("value");
                    let has_custom_validator = pair_value
                        .map(|v| VALIDATOR_KINDS.contains(&v.kind()))
                        .unwrap_or(false);
                    if has_custom_validator {
                        validators.push((key, pair_value.unwrap()));
                    }

                    let required = pair_value
                        .map(|v| node_text(v, self.source).ends_with(".isRequired"))
                        .unwrap_or(false);

                    schema.props.push(DeclaredProp {
                        name,
                        required,
                        has_custom_validator,
                        location: node_location(&self.file, entry),
                    });
                }
                "method_definition" => {
                    // Shorthand validator: `propName(props, propName) { ... }`
                    let Some(name_node) = entry.child_by_field_name("name") else {
                        continue;
                    };
                    schema.props.push(DeclaredProp {
                        name: node_text(name_node, self.source).to_string(),
                        required: false,
                        has_custom_validator: true,
                        location: node_location(&self.file, entry),
                    });
                    validators.push((key, entry));
                }
                "shorthand_property_identifier" => {
                    schema.props.push(DeclaredProp {
                        name: node_text(entry, self.source).to_string(),
                        required: false,
                        has_custom_validator: false,
                        location: node_location(&self.file, entry),
                    });
                }
                "spread_element" => {
                    // Spread in the schema: the declared set is open-ended
                    ignore_validation = true;
                }
                _ => {}
            }
        }

        registry.merge(
            key,
            ComponentUpdate {
                declared_schema: Some(schema),
                ignore_validation,
                ..ComponentUpdate::default()
            },
        );

        validators
    }
}
