use super::context::ContextClassifier;
use crate::components::{enclosing_class_component, ComponentRegistry};
use crate::parser::common::{node_text, string_literal_value};
use regex::Regex;
use tree_sitter::Node;

/// Outcome of resolving one access point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropName {
    /// A concrete field name
    Field(String),
    /// A computed key that cannot be resolved statically
    Computed,
}

/// A resolved access: the access node that carried the field, and the name
#[derive(Debug, Clone)]
pub struct Resolution<'t> {
    pub target: Node<'t>,
    pub name: PropName,
}

/// Resolves a candidate property access into its field name.
///
/// Returns `None` when the access is not a props read at all: a bare
/// `props`-shaped identifier inside a class component is only trusted as
/// the props bundle in a constructor, a lifecycle method, or a state
/// updater; everywhere else it is just a local variable.
pub struct PropPathResolver<'s> {
    source: &'s str,
    ctx: ContextClassifier<'s>,
    direct_props: Regex,
    direct_next_props: Regex,
    direct_prev_props: Regex,
}

impl<'s> PropPathResolver<'s> {
    pub fn new(source: &'s str, ctx: ContextClassifier<'s>) -> Self {
        Self {
            source,
            ctx,
            direct_props: Regex::new(r"^props\s*[\.\[]").expect("valid regex"),
            direct_next_props: Regex::new(r"^nextProps\s*[\.\[]").expect("valid regex"),
            direct_prev_props: Regex::new(r"^prevProps\s*[\.\[]").expect("valid regex"),
        }
    }

    /// Whether the access text is rooted directly at one of the props
    /// root names (`props.x`, `nextProps[x]`, ...)
    pub fn is_direct_root(&self, node: Node) -> bool {
        let text = node_text(node, self.source);
        self.direct_props.is_match(text)
            || self.direct_next_props.is_match(text)
            || self.direct_prev_props.is_match(text)
    }

    /// Resolve `node` to the field name it reads.
    ///
    /// For a direct root (`props.x`) the field is on the node itself; for an
    /// instance-qualified root (`this.props`) it is one level up, on the
    /// parent access.
    pub fn resolve<'t>(
        &self,
        node: Node<'t>,
        registry: &ComponentRegistry,
    ) -> Option<Resolution<'t>> {
        let is_direct = self.is_direct_root(node);

        let is_updater_param_root = node
            .child_by_field_name("object")
            .map(|o| o.kind() == "identifier" && self.ctx.is_updater_prop_param(o))
            .unwrap_or(false);

        if is_direct
            && enclosing_class_component(registry, node).is_some()
            && !self.ctx.in_constructor(node)
            && !self.ctx.in_lifecycle_method(node)
            && !self.ctx.in_state_updater(node)
        {
            return None;
        }

        let target = if is_direct || is_updater_param_root {
            node
        } else {
            node.parent()?
        };

        let name = match target.kind() {
            "member_expression" => {
                let property = target.child_by_field_name("property")?;
                PropName::Field(node_text(property, self.source).to_string())
            }
            "subscript_expression" => {
                let index = target.child_by_field_name("index")?;
                if index.kind() == "string" {
                    // String-keyed computed access resolves to the literal
                    PropName::Field(string_literal_value(index, self.source))
                } else {
                    PropName::Computed
                }
            }
            _ => return None,
        };

        Some(Resolution { target, name })
    }
}
