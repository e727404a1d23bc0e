// Component classification - decides which constructs count as components
#![allow(dead_code)]

use super::{ComponentKind, ComponentRegistry, OwnerKey};
use crate::parser::common::{ancestors, descendants, is_function_kind, node_location, node_text};
use std::path::{Path, PathBuf};
use tracing::trace;
use tree_sitter::Node;

/// Base-class name fragments that identify a React class component
const CLASS_COMPONENT_BASES: [&str; 2] = ["Component", "PureComponent"];

/// Classifies class-style and function-style components and registers them.
///
/// Detection is deliberately conservative: a function-like construct only
/// counts as a component when it returns JSX (or `React.createElement`),
/// its name (if any) is capitalized, and it is not nested inside a
/// construct that was already classified as a component. The nesting rule
/// keeps render-time callbacks from claiming ownership of prop reads.
pub struct ComponentDetector<'s> {
    file: PathBuf,
    source: &'s str,
}

impl<'s> ComponentDetector<'s> {
    pub fn new(file: &Path, source: &'s str) -> Self {
        Self {
            file: file.to_path_buf(),
            source,
        }
    }

    /// Inspect a node and register it when it is a component construct.
    /// Called for every node, in traversal order, before any usage marking
    /// so that enclosing-component lookups see the construct.
    pub fn observe(&self, registry: &mut ComponentRegistry, node: Node) {
        match node.kind() {
            "class_declaration" | "class" => {
                if self.is_class_component(node) {
                    let name = self.construct_name(node);
                    trace!("Registered class component {:?}", name);
                    registry.register(
                        node.id(),
                        name,
                        ComponentKind::Class,
                        node_location(&self.file, node),
                    );
                }
            }
            "function_declaration" | "function_expression" | "generator_function"
            | "generator_function_declaration" | "arrow_function" => {
                if self.is_function_component(registry, node) {
                    let name = self.construct_name(node);
                    trace!("Registered function component {:?}", name);
                    registry.register(
                        node.id(),
                        name,
                        ComponentKind::Function,
                        node_location(&self.file, node),
                    );
                }
            }
            _ => {}
        }
    }

    fn is_class_component(&self, node: Node) -> bool {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "class_heritage" {
                let heritage = node_text(child, self.source);
                return CLASS_COMPONENT_BASES.iter().any(|base| heritage.contains(base));
            }
        }
        false
    }

    fn is_function_component(&self, registry: &ComponentRegistry, node: Node) -> bool {
        // Components nested inside components are almost always render
        // callbacks; attribute their prop reads to the enclosing component
        if let Some(parent) = node.parent() {
            if enclosing_component(registry, parent).is_some() {
                return false;
            }
        }

        // React convention: component names are capitalized
        if let Some(name) = self.construct_name(node) {
            if !name.chars().next().map(char::is_uppercase).unwrap_or(false) {
                return false;
            }
        }

        self.returns_element(node)
    }

    /// Whether the function body produces JSX or `React.createElement`
    fn returns_element(&self, node: Node) -> bool {
        let Some(body) = node.child_by_field_name("body") else {
            return false;
        };

        descendants(body).any(|n| match n.kind() {
            "jsx_element" | "jsx_self_closing_element" | "jsx_fragment" => true,
            "call_expression" => n
                .child_by_field_name("function")
                .map(|callee| node_text(callee, self.source) == "React.createElement")
                .unwrap_or(false),
            _ => false,
        })
    }

    /// Construct name, falling back to the variable an expression-form
    /// class or function is bound to (`const Foo = () => ...`)
    fn construct_name(&self, node: Node) -> Option<String> {
        if let Some(name) = node.child_by_field_name("name") {
            return Some(node_text(name, self.source).to_string());
        }
        let parent = node.parent()?;
        if parent.kind() == "variable_declarator" {
            let name = parent.child_by_field_name("name")?;
            if name.kind() == "identifier" {
                return Some(node_text(name, self.source).to_string());
            }
        }
        None
    }
}

/// Nearest enclosing registered component construct, including `node` itself
pub fn enclosing_component(registry: &ComponentRegistry, node: Node) -> Option<OwnerKey> {
    ancestors(node)
        .find(|n| registry.is_component_node(n.id()))
        .map(|n| OwnerKey::Component(n.id()))
}

/// Nearest enclosing registered class component
pub fn enclosing_class_component(registry: &ComponentRegistry, node: Node) -> Option<OwnerKey> {
    enclosing_kind(registry, node, ComponentKind::Class)
}

/// Nearest enclosing registered function component
pub fn enclosing_function_component(registry: &ComponentRegistry, node: Node) -> Option<OwnerKey> {
    enclosing_kind(registry, node, ComponentKind::Function)
}

fn enclosing_kind(
    registry: &ComponentRegistry,
    node: Node,
    kind: ComponentKind,
) -> Option<OwnerKey> {
    ancestors(node)
        .filter(|n| registry.is_component_node(n.id()))
        .map(|n| OwnerKey::Component(n.id()))
        .find(|key| registry.get(key).map(|c| c.kind == kind).unwrap_or(false))
}

/// Ownership key for usage produced at `node`: the nearest enclosing
/// component when one is open, otherwise the raw node identity
pub fn owner_for(registry: &ComponentRegistry, node: Node) -> OwnerKey {
    enclosing_component(registry, node).unwrap_or(OwnerKey::Ungrouped(node.id()))
}

/// The enclosing function-like construct that owns `node`, if any
pub fn enclosing_function(node: Node) -> Option<Node> {
    ancestors(node).skip(1).find(|n| is_function_kind(n.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JsParser;

    fn detect_all(source: &str) -> Vec<(Option<String>, ComponentKind)> {
        let tree = JsParser::new()
            .parse(Path::new("test.jsx"), source)
            .unwrap();
        let mut registry = ComponentRegistry::new(PathBuf::from("test.jsx"));
        let detector = ComponentDetector::new(Path::new("test.jsx"), source);
        for node in descendants(tree.root_node()) {
            detector.observe(&mut registry, node);
        }
        registry
            .components()
            .map(|c| (c.name.clone(), c.kind))
            .collect()
    }

    #[test]
    fn test_detects_class_component() {
        let found = detect_all(
            "class Profile extends React.PureComponent { render() { return <div/>; } }",
        );
        assert_eq!(
            found,
            vec![(Some("Profile".to_string()), ComponentKind::Class)]
        );
    }

    #[test]
    fn test_detects_arrow_component_by_binding_name() {
        let found = detect_all("const Badge = () => <span/>;");
        assert_eq!(
            found,
            vec![(Some("Badge".to_string()), ComponentKind::Function)]
        );
    }

    #[test]
    fn test_lowercase_function_is_not_a_component() {
        let found = detect_all("function renderRow() { return <tr/>; }");
        assert!(found.is_empty());
    }

    #[test]
    fn test_function_without_jsx_is_not_a_component() {
        let found = detect_all("function Sum(a, b) { return a + b; }");
        assert!(found.is_empty());
    }

    #[test]
    fn test_render_callback_is_not_registered() {
        let found = detect_all(
            r#"
            function List(props) {
                return <ul>{props.items.map((item) => <li>{item}</li>)}</ul>;
            }
            "#,
        );
        assert_eq!(
            found,
            vec![(Some("List".to_string()), ComponentKind::Function)]
        );
    }

    #[test]
    fn test_class_without_component_base_is_skipped() {
        let found = detect_all("class Parser extends Tokenizer { parse() { return <x/>; } }");
        assert!(found.is_empty());
    }
}
