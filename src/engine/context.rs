use crate::parser::common::{
    enclosing_functions, function_parameters, named_children, node_text, string_literal_value,
};
use tree_sitter::Node;

/// Lifecycle methods that receive or compare props
pub const LIFECYCLE_METHODS: [&str; 4] = [
    "componentWillReceiveProps",
    "shouldComponentUpdate",
    "componentWillUpdate",
    "componentDidUpdate",
];

/// Async-safe lifecycle names introduced with React 16.3
pub const ASYNC_SAFE_LIFECYCLE_METHODS: [&str; 4] = [
    "getDerivedStateFromProps",
    "getSnapshotBeforeUpdate",
    "UNSAFE_componentWillReceiveProps",
    "UNSAFE_componentWillUpdate",
];

/// Answers "where am I" questions about the current position by walking the
/// chain of enclosing function-like constructs outward.
///
/// The three predicates are answered independently on every query: a node
/// can satisfy more than one at a time and callers combine them with
/// different boolean logic.
#[derive(Debug, Clone, Copy)]
pub struct ContextClassifier<'s> {
    source: &'s str,
    check_async_safe_lifecycles: bool,
}

impl<'s> ContextClassifier<'s> {
    pub fn new(source: &'s str, check_async_safe_lifecycles: bool) -> Self {
        Self {
            source,
            check_async_safe_lifecycles,
        }
    }

    /// Whether any enclosing method is a class constructor
    pub fn in_constructor(&self, node: Node) -> bool {
        enclosing_functions(node).any(|f| {
            f.kind() == "method_definition"
                && f.child_by_field_name("name")
                    .map(|n| node_text(n, self.source) == "constructor")
                    .unwrap_or(false)
        })
    }

    /// Whether any enclosing callable is a lifecycle method
    pub fn in_lifecycle_method(&self, node: Node) -> bool {
        enclosing_functions(node).any(|f| self.is_lifecycle_callable(f))
    }

    /// Whether `callable` is defined under a lifecycle method name
    pub fn is_lifecycle_callable(&self, callable: Node) -> bool {
        self.callable_key_name(callable)
            .map(|name| self.is_lifecycle_name(&name))
            .unwrap_or(false)
    }

    pub fn is_lifecycle_name(&self, name: &str) -> bool {
        LIFECYCLE_METHODS.contains(&name)
            || (self.check_async_safe_lifecycles && ASYNC_SAFE_LIFECYCLE_METHODS.contains(&name))
    }

    /// The key name a callable construct is defined under: the method name,
    /// the class-field name for arrow properties, or the object-literal key
    pub fn callable_key_name(&self, callable: Node) -> Option<String> {
        if callable.kind() == "method_definition" {
            return callable
                .child_by_field_name("name")
                .map(|n| self.key_text(n));
        }
        let parent = callable.parent()?;
        match parent.kind() {
            "field_definition" => parent
                .child_by_field_name("property")
                .map(|n| self.key_text(n)),
            "pair" => parent.child_by_field_name("key").map(|n| self.key_text(n)),
            _ => None,
        }
    }

    fn key_text(&self, key: Node) -> String {
        if key.kind() == "string" {
            string_literal_value(key, self.source)
        } else {
            node_text(key, self.source).to_string()
        }
    }

    /// Whether any enclosing function is a state-updater body
    pub fn in_state_updater(&self, node: Node) -> bool {
        enclosing_functions(node).any(|f| self.is_state_updater(f))
    }

    /// Whether `func` is the updater argument of a `.setState(...)` call.
    ///
    /// Positionally the first argument only: the optional second completion
    /// callback has the same call-parent shape but is not the updater.
    pub fn is_state_updater(&self, func: Node) -> bool {
        if func.kind() == "method_definition" {
            return false;
        }
        let Some(args) = func.parent() else {
            return false;
        };
        if args.kind() != "arguments" {
            return false;
        }
        let Some(call) = args.parent() else {
            return false;
        };
        if call.kind() != "call_expression" {
            return false;
        }
        let Some(callee) = call.child_by_field_name("function") else {
            return false;
        };
        if callee.kind() != "member_expression" {
            return false;
        }
        let is_set_state = callee
            .child_by_field_name("property")
            .map(|p| node_text(p, self.source) == "setState")
            .unwrap_or(false);
        if !is_set_state {
            return false;
        }

        named_children(args)
            .first()
            .map(|first| first.id() == func.id())
            .unwrap_or(false)
    }

    /// Whether `identifier` names the props parameter (the second one) of an
    /// enclosing state-updater body
    pub fn is_updater_prop_param(&self, identifier: Node) -> bool {
        let name = node_text(identifier, self.source);
        for func in enclosing_functions(identifier) {
            if self.is_state_updater(func) {
                let params = function_parameters(func);
                if params.len() > 1 {
                    return params[1].kind() == "identifier"
                        && node_text(params[1], self.source) == name;
                }
            }
        }
        false
    }
}
