use super::context::ContextClassifier;
use super::resolver::{PropName, PropPathResolver};
use super::{EngineConfig, EngineError, PROP_ROOT_NAMES};
use crate::components::{
    enclosing_function_component, ComponentRegistry, ComponentUpdate, OwnerKey, UsageRecord,
};
use crate::parser::common::{
    function_parameters, is_function_kind, named_children, node_location, node_text,
    string_literal_value,
};
use std::path::{Path, PathBuf};
use tree_sitter::Node;

/// Names inherited from `Object.prototype`; reads of these are method
/// plumbing, not prop usage
const OBJECT_PROTOTYPE_MEMBERS: [&str; 12] = [
    "constructor",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
    "__proto__",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
];

/// The core marking procedure: turns one dispatched node into zero or more
/// usage records on the owning component.
///
/// Accepts four node shapes - property access chains, function-like nodes,
/// binding declarators, and binding patterns. Anything else reaching this
/// procedure means the driver routed an unsupported node kind, which is a
/// bug in the driver/marker contract and fails loudly.
pub struct UsageMarker<'s> {
    file: PathBuf,
    source: &'s str,
    ctx: ContextClassifier<'s>,
    resolver: PropPathResolver<'s>,
}

impl<'s> UsageMarker<'s> {
    pub fn new(file: &Path, source: &'s str, config: &EngineConfig) -> Self {
        let ctx = ContextClassifier::new(source, config.check_async_safe_lifecycles);
        Self {
            file: file.to_path_buf(),
            source,
            ctx,
            resolver: PropPathResolver::new(source, ctx),
        }
    }

    /// Mark prop usage rooted at `node`, attributing records to `owner`
    pub fn mark(
        &self,
        registry: &mut ComponentRegistry,
        node: Node,
        owner: OwnerKey,
        parent_path: &[String],
    ) -> Result<(), EngineError> {
        match node.kind() {
            "member_expression" | "subscript_expression" => {
                self.mark_access(registry, node, owner, parent_path);
                Ok(())
            }
            kind if is_function_kind(kind) => {
                self.mark_function(registry, node, owner);
                Ok(())
            }
            "variable_declarator" => {
                self.mark_declarator(registry, node, owner);
                Ok(())
            }
            "object_pattern" => {
                self.mark_pattern_fields(registry, node, owner, parent_path);
                Ok(())
            }
            other => Err(EngineError::UnsupportedNode {
                kind: other.to_string(),
            }),
        }
    }

    /// Walk a member chain link by link, recording one usage at the deepest
    /// resolvable access
    fn mark_access(
        &self,
        registry: &mut ComponentRegistry,
        node: Node,
        owner: OwnerKey,
        parent_path: &[String],
    ) {
        let Some(resolution) = self.resolver.resolve(node, registry) else {
            // Not a prop read by itself; a destructuring binding over the
            // access still extracts fields
            if let Some(pattern) = declarator_pattern(node) {
                if !named_children(pattern).is_empty() {
                    self.mark_pattern_fields(registry, pattern, owner, parent_path);
                }
            }
            return;
        };

        let name = match resolution.name {
            PropName::Computed => {
                // A computed key means the statically visible field set is
                // incomplete for this component
                registry.merge(owner, ComponentUpdate::suppress());
                return;
            }
            PropName::Field(name) => name,
        };

        let target = resolution.target;
        let mut path = parent_path.to_vec();
        path.push(name.clone());

        // `props.a.b` continues the chain; `x[props.a]` does not, because
        // the parent's object is not this access
        let continuation = target.parent().filter(|next| {
            matches!(next.kind(), "member_expression" | "subscript_expression")
                && next
                    .child_by_field_name("object")
                    .map(|o| o.id() == target.id())
                    .unwrap_or(false)
        });

        if let Some(next) = continuation {
            let continue_from = if target.id() == node.id() { next } else { target };
            self.mark_access(registry, continue_from, owner, &path);
            return;
        }

        if !OBJECT_PROTOTYPE_MEMBERS.contains(&name.as_str()) {
            let anchor = target
                .child_by_field_name("property")
                .or_else(|| target.child_by_field_name("index"))
                .unwrap_or(target);
            registry.merge(
                owner,
                ComponentUpdate::usage(UsageRecord::new(
                    name,
                    path.clone(),
                    node_location(&self.file, anchor),
                )),
            );
        }

        // `const {x} = props.b` extracts fields below the resolved path
        if let Some(pattern) = declarator_pattern(target) {
            self.mark_pattern_fields(registry, pattern, owner, &path);
        }
    }

    /// Destructured props parameter of a function-like node.
    ///
    /// The props parameter is the second one inside a state-updater body
    /// and the first one everywhere else.
    fn mark_function(&self, registry: &mut ComponentRegistry, node: Node, owner: OwnerKey) {
        let params = function_parameters(node);
        if params.is_empty() {
            return;
        }

        let index = if self.ctx.in_state_updater(node) { 1 } else { 0 };
        let Some(&param) = params.get(index) else {
            return;
        };

        let pattern = if param.kind() == "assignment_pattern" {
            match param.child_by_field_name("left") {
                Some(left) => left,
                None => return,
            }
        } else {
            param
        };

        if pattern.kind() == "object_pattern" {
            self.mark_pattern_fields(registry, pattern, owner, &[]);
        }
    }

    /// Binding declarator with a structured pattern target. Two admitted
    /// forms:
    ///   (a) `const {props: {firstName}} = this`
    ///   (b) `const {firstName} = props` in a function component body or a
    ///       lifecycle method
    fn mark_declarator(&self, registry: &mut ComponentRegistry, node: Node, owner: OwnerKey) {
        let (Some(pattern), Some(init)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("value"),
        ) else {
            return;
        };
        if pattern.kind() != "object_pattern" {
            return;
        }

        if init.kind() == "this" {
            for field in named_children(pattern) {
                if field.kind() != "pair_pattern" {
                    continue;
                }
                let Some(key) = field.child_by_field_name("key") else {
                    continue;
                };
                let key_name = match key.kind() {
                    "property_identifier" => node_text(key, self.source).to_string(),
                    "string" => string_literal_value(key, self.source),
                    _ => continue,
                };
                if !PROP_ROOT_NAMES.contains(&key_name.as_str()) {
                    continue;
                }
                if let Some(value) = field.child_by_field_name("value") {
                    if value.kind() == "object_pattern" {
                        self.mark_pattern_fields(registry, value, owner, &[]);
                        return;
                    }
                }
            }
            return;
        }

        let flat_root = init.kind() == "identifier"
            && PROP_ROOT_NAMES.contains(&node_text(init, self.source));
        if flat_root
            && (enclosing_function_component(registry, node).is_some()
                || self.ctx.in_lifecycle_method(node))
        {
            self.mark_pattern_fields(registry, pattern, owner, &[]);
        }
    }

    /// Record one usage per extracted field of a binding pattern.
    ///
    /// A rest element or a computed key can capture any field, so it sets
    /// the suppress flag and the field itself is skipped; the remaining
    /// fields still record normally.
    fn mark_pattern_fields(
        &self,
        registry: &mut ComponentRegistry,
        pattern: Node,
        owner: OwnerKey,
        parent_path: &[String],
    ) {
        let mut update = ComponentUpdate::default();

        for field in named_children(pattern) {
            let (name, anchor) = match field.kind() {
                "rest_pattern" => {
                    update.suppress_unused_check = true;
                    continue;
                }
                "pair_pattern" => {
                    let Some(key) = field.child_by_field_name("key") else {
                        continue;
                    };
                    match key.kind() {
                        "property_identifier" => {
                            (node_text(key, self.source).to_string(), key)
                        }
                        "string" => (string_literal_value(key, self.source), key),
                        "number" => (node_text(key, self.source).to_string(), key),
                        _ => {
                            update.suppress_unused_check = true;
                            continue;
                        }
                    }
                }
                "shorthand_property_identifier_pattern" => {
                    (node_text(field, self.source).to_string(), field)
                }
                "object_assignment_pattern" => {
                    let Some(left) = field.child_by_field_name("left") else {
                        continue;
                    };
                    if left.kind() != "shorthand_property_identifier_pattern" {
                        continue;
                    }
                    (node_text(left, self.source).to_string(), left)
                }
                _ => continue,
            };

            let mut path = parent_path.to_vec();
            path.push(name.clone());
            update.used_properties.push(UsageRecord::new(
                name,
                path,
                node_location(&self.file, anchor),
            ));
        }

        if !update.is_empty() {
            registry.merge(owner, update);
        }
    }
}

/// The object pattern bound over `node`, when `node` initializes a
/// structured variable declarator
fn declarator_pattern(node: Node) -> Option<Node> {
    let parent = node.parent()?;
    if parent.kind() != "variable_declarator" {
        return None;
    }
    let pattern = parent.child_by_field_name("name")?;
    if pattern.kind() == "object_pattern" {
        Some(pattern)
    } else {
        None
    }
}
