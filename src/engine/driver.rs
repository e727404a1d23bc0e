use super::context::ContextClassifier;
use super::marker::UsageMarker;
use super::{EngineConfig, PROP_ROOT_NAMES};
use crate::components::{
    enclosing_class_component, enclosing_function_component, owner_for, Component,
    ComponentDetector, ComponentRegistry, ComponentUpdate, OwnerKey, SchemaExtractor,
};
use crate::parser::common::{descendants, function_parameters, named_children, node_text};
use miette::{IntoDiagnostic, Result};
use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;
use tree_sitter::Node;

/// Drives a single depth-first pass over one syntax tree.
///
/// Five observation points feed the usage marker: binding declarators,
/// function-like nodes, JSX spread attributes, property accesses, and
/// destructuring patterns written directly in a lifecycle method signature.
/// Component classification and schema extraction run on the same pass so
/// that ownership lookups always see every construct opened so far. Custom
/// validators found in declared schemas are queued and re-analyzed once the
/// main traversal is done.
pub struct TraversalDriver<'a> {
    source: &'a str,
    registry: ComponentRegistry,
    detector: ComponentDetector<'a>,
    schema: SchemaExtractor<'a>,
    marker: UsageMarker<'a>,
    ctx: ContextClassifier<'a>,
    pending_validators: Vec<(OwnerKey, Node<'a>)>,
}

impl<'a> TraversalDriver<'a> {
    pub fn new(file: &Path, source: &'a str, config: &EngineConfig) -> Self {
        Self {
            source,
            registry: ComponentRegistry::new(file.to_path_buf()),
            detector: ComponentDetector::new(file, source),
            schema: SchemaExtractor::new(file, source),
            marker: UsageMarker::new(file, source, config),
            ctx: ContextClassifier::new(source, config.check_async_safe_lifecycles),
            pending_validators: Vec::new(),
        }
    }

    /// Walk the tree from `root` and accumulate usage state
    pub fn run(&mut self, root: Node<'a>) -> Result<()> {
        let mut cursor = root.walk();

        loop {
            let node = cursor.node();
            self.enter(node)?;

            // Move to next node
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    self.discharge_validators()?;
                    debug!("Traversal done: {} registry entries", self.registry.len());
                    return Ok(());
                }
            }
        }
    }

    /// Consume the driver into the accumulated component list
    pub fn into_components(self) -> Vec<Component> {
        self.registry.into_components()
    }

    fn enter(&mut self, node: Node<'a>) -> Result<()> {
        self.detector.observe(&mut self.registry, node);
        let validators = self.schema.observe(&mut self.registry, node);
        self.pending_validators.extend(validators);

        match node.kind() {
            "variable_declarator" => self.on_variable_declarator(node),
            "function_declaration" | "function_expression" | "generator_function"
            | "generator_function_declaration" | "arrow_function" => self.on_function(node),
            "spread_element" => {
                self.on_spread_attribute(node);
                Ok(())
            }
            "member_expression" | "subscript_expression" => self.on_property_access(node),
            "object_pattern" => self.on_lifecycle_signature(node),
            _ => Ok(()),
        }
    }

    /// `const {a} = props` / `const {props: {a}} = this`
    fn on_variable_declarator(&mut self, node: Node) -> Result<()> {
        let (Some(pattern), Some(init)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("value"),
        ) else {
            return Ok(());
        };
        if pattern.kind() != "object_pattern" {
            return Ok(());
        }

        let this_destructuring = init.kind() == "this";
        let stateless_destructuring = init.kind() == "identifier"
            && PROP_ROOT_NAMES.contains(&node_text(init, self.source))
            && (enclosing_function_component(&self.registry, node).is_some()
                || self.ctx.in_lifecycle_method(node));

        if !this_destructuring && !stateless_destructuring {
            return Ok(());
        }

        let owner = owner_for(&self.registry, node);
        self.marker
            .mark(&mut self.registry, node, owner, &[])
            .into_diagnostic()
    }

    /// Function-like node: first the state-updater check, then the
    /// destructured-parameter check
    fn on_function(&mut self, node: Node) -> Result<()> {
        let params = function_parameters(node);

        if params.len() >= 2 && self.ctx.in_state_updater(node) {
            let owner = owner_for(&self.registry, node);
            self.marker
                .mark(&mut self.registry, node, owner, &[])
                .into_diagnostic()?;
        }

        let index = if self.ctx.in_state_updater(node) { 1 } else { 0 };
        let Some(&param) = params.get(index) else {
            return Ok(());
        };
        let pattern = if param.kind() == "assignment_pattern" {
            param.child_by_field_name("left")
        } else {
            Some(param)
        };
        let destructured = pattern
            .map(|p| p.kind() == "object_pattern")
            .unwrap_or(false);

        // Only functions that are themselves components (or whose parent
        // construct is) take their first parameter as the props bundle
        let registered = self.registry.is_component_node(node.id())
            || node
                .parent()
                .map(|p| self.registry.is_component_node(p.id()))
                .unwrap_or(false);

        if destructured && registered {
            let owner = owner_for(&self.registry, node);
            self.marker
                .mark(&mut self.registry, node, owner, &[])
                .into_diagnostic()?;
        }
        Ok(())
    }

    /// `<Child {...props} />` forwards an unknowable set of fields
    fn on_spread_attribute(&mut self, node: Node) {
        let Some(parent) = node.parent() else {
            return;
        };
        if parent.kind() != "jsx_expression" {
            return;
        }
        let in_attribute_position = parent
            .parent()
            .map(|gp| {
                matches!(
                    gp.kind(),
                    "jsx_opening_element" | "jsx_self_closing_element"
                )
            })
            .unwrap_or(false);
        if !in_attribute_position {
            return;
        }

        let owner = owner_for(&self.registry, node);
        self.registry.merge(owner, ComponentUpdate::suppress());
    }

    /// Property access whose object is a trusted props root
    fn on_property_access(&mut self, node: Node) -> Result<()> {
        if !self.is_prop_access_candidate(node) {
            return Ok(());
        }
        let owner = owner_for(&self.registry, node);
        self.marker
            .mark(&mut self.registry, node, owner, &[])
            .into_diagnostic()
    }

    /// Destructuring written directly in a lifecycle method signature:
    /// `componentWillReceiveProps({ active }) { ... }`
    fn on_lifecycle_signature(&mut self, node: Node) -> Result<()> {
        let Some(params) = node.parent() else {
            return Ok(());
        };
        if params.kind() != "formal_parameters" {
            return Ok(());
        }
        let Some(callable) = params.parent() else {
            return Ok(());
        };
        if !self.ctx.is_lifecycle_callable(callable) {
            return Ok(());
        }
        if named_children(node).is_empty() {
            return Ok(());
        }

        let owner = owner_for(&self.registry, callable);
        self.marker
            .mark(&mut self.registry, callable, owner, &[])
            .into_diagnostic()
    }

    /// Whether a property access is rooted at the props bundle: qualified
    /// by the instance, a bare root name in a trusted position, or the
    /// updater's props parameter
    fn is_prop_access_candidate(&self, node: Node) -> bool {
        let Some(object) = node.child_by_field_name("object") else {
            return false;
        };

        match object.kind() {
            "this" => {
                node.kind() == "member_expression"
                    && node
                        .child_by_field_name("property")
                        .map(|p| node_text(p, self.source) == "props")
                        .unwrap_or(false)
                    && enclosing_class_component(&self.registry, node).is_some()
            }
            "identifier" => {
                let name = node_text(object, self.source);
                if name == "props" {
                    return !self.is_assignment_target(node);
                }
                if (name == "nextProps" || name == "prevProps")
                    && self.ctx.in_lifecycle_method(node)
                {
                    return true;
                }
                enclosing_class_component(&self.registry, node).is_some()
                    && self.ctx.is_updater_prop_param(object)
            }
            _ => false,
        }
    }

    /// Whether `node` is the target of an assignment (`props.x = 1`)
    fn is_assignment_target(&self, node: Node) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        if !matches!(
            parent.kind(),
            "assignment_expression" | "augmented_assignment_expression"
        ) {
            return false;
        }
        parent
            .child_by_field_name("left")
            .map(|left| left.id() == node.id())
            .unwrap_or(false)
    }

    /// Re-enter the marker for every custom validator attached to a
    /// component that still must be validated. Discharged from an explicit
    /// queue so deeply nested validator definitions cannot grow the call
    /// stack.
    fn discharge_validators(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_validators);
        let mut queue: VecDeque<(OwnerKey, Node<'a>)> = pending
            .into_iter()
            .filter(|(owner, _)| {
                self.registry
                    .get(owner)
                    .map(|c| c.must_validate())
                    .unwrap_or(false)
            })
            .collect();

        while let Some((owner, func)) = queue.pop_front() {
            // Destructured validator parameters count as usage
            self.marker
                .mark(&mut self.registry, func, owner, &[])
                .into_diagnostic()?;

            // Prop reads inside the validator body are attributed to the
            // component owning the schema; the validator itself is
            // lexically outside the component construct
            if let Some(body) = func.child_by_field_name("body") {
                for inner in descendants(body) {
                    if matches!(inner.kind(), "member_expression" | "subscript_expression")
                        && self.is_prop_access_candidate(inner)
                    {
                        self.marker
                            .mark(&mut self.registry, inner, owner, &[])
                            .into_diagnostic()?;
                    }
                }
            }
        }

        Ok(())
    }
}
