// Parser utilities shared by the engine and the schema extractor
#![allow(dead_code)]

use crate::components::Location;
use std::path::Path;
use tree_sitter::Node;

/// Node kinds that open a new function scope in the JavaScript grammar.
///
/// `method_definition` carries its parameters and body directly (there is
/// no inner function node), so it counts as a function-like construct here.
pub const FUNCTION_KINDS: [&str; 6] = [
    "function_declaration",
    "function_expression",
    "generator_function",
    "generator_function_declaration",
    "arrow_function",
    "method_definition",
];

/// Check whether a node kind is one of the function-like constructs
pub fn is_function_kind(kind: &str) -> bool {
    FUNCTION_KINDS.contains(&kind)
}

/// Extract text from a node
pub fn node_text<'a>(node: Node<'a>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Helper to convert a tree-sitter position to a Location
pub fn node_location(file: &Path, node: Node) -> Location {
    let start = node.start_position();
    Location::new(
        file.to_path_buf(),
        start.row + 1,    // tree-sitter uses 0-indexed lines
        start.column + 1, // tree-sitter uses 0-indexed columns
        node.start_byte(),
        node.end_byte(),
    )
}

/// Find all children of a specific kind
pub fn children_of_kind<'a>(node: Node<'a>, kind: &str) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| child.kind() == kind)
        .collect()
}

/// Named children of a node (skips punctuation and comments)
pub fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Iterator over the ancestor chain of a node, starting at the node itself
pub fn ancestors(node: Node) -> impl Iterator<Item = Node> {
    std::iter::successors(Some(node), |n| n.parent())
}

/// Enclosing function-like constructs, innermost first, including `node`
/// itself when it is function-like
pub fn enclosing_functions(node: Node) -> impl Iterator<Item = Node> {
    ancestors(node).filter(|n| is_function_kind(n.kind()))
}

/// The formal parameters of a function-like node.
///
/// Arrow functions with a single bare parameter expose it through the
/// `parameter` field instead of a `formal_parameters` list.
pub fn function_parameters(node: Node) -> Vec<Node> {
    if let Some(params) = node.child_by_field_name("parameters") {
        named_children(params)
    } else if let Some(param) = node.child_by_field_name("parameter") {
        vec![param]
    } else {
        Vec::new()
    }
}

/// Decode the value of a `string` literal node (without its quotes)
pub fn string_literal_value(node: Node, source: &str) -> String {
    let mut cursor = node.walk();
    let mut value = String::new();
    for child in node.children(&mut cursor) {
        if child.kind() == "string_fragment" || child.kind() == "escape_sequence" {
            value.push_str(node_text(child, source));
        }
    }
    value
}

/// Iterator over all descendant nodes
pub fn descendants(node: Node) -> impl Iterator<Item = Node> {
    DescendantIterator::new(node)
}

struct DescendantIterator<'a> {
    cursor: tree_sitter::TreeCursor<'a>,
    done: bool,
}

impl<'a> DescendantIterator<'a> {
    fn new(node: Node<'a>) -> Self {
        Self {
            cursor: node.walk(),
            done: false,
        }
    }
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        // Try to go to first child
        if self.cursor.goto_first_child() {
            return Some(node);
        }

        // Try to go to next sibling
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }

            // Go up to parent
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}
