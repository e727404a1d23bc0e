// Component model - some fields and methods reserved for future use
#![allow(dead_code)]

mod detect;
mod prop_types;
mod registry;

pub use detect::{
    enclosing_class_component, enclosing_component, enclosing_function,
    enclosing_function_component, owner_for, ComponentDetector,
};
pub use prop_types::SchemaExtractor;
pub use registry::{ComponentRegistry, ComponentUpdate};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ownership key for accumulated usage state.
///
/// Usage records are normally attributed to the nearest enclosing component
/// construct. When an access happens outside any known component, the state
/// is still kept, keyed by the raw node that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerKey {
    /// A classified component construct (class or function)
    Component(usize),
    /// A raw syntax node with no enclosing component
    Ungrouped(usize),
}

impl OwnerKey {
    pub fn node_id(&self) -> usize {
        match self {
            OwnerKey::Component(id) | OwnerKey::Ungrouped(id) => *id,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, OwnerKey::Component(_))
    }
}

impl std::fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerKey::Component(id) => write!(f, "component:{}", id),
            OwnerKey::Ungrouped(id) => write!(f, "ungrouped:{}", id),
        }
    }
}

/// Kind of component construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Class extending a React component base
    Class,
    /// Function or arrow function returning JSX
    Function,
    /// Fallback bucket for usage outside any component
    Ungrouped,
}

impl ComponentKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Class => "class component",
            ComponentKind::Function => "function component",
            ComponentKind::Ungrouped => "ungrouped",
        }
    }
}

/// Location in source code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Starting byte offset
    pub start_byte: usize,
    /// Ending byte offset
    pub end_byte: usize,
}

impl Location {
    pub fn new(
        file: PathBuf,
        line: usize,
        column: usize,
        start_byte: usize,
        end_byte: usize,
    ) -> Self {
        Self {
            file,
            line,
            column,
            start_byte,
            end_byte,
        }
    }

    /// Zero-position location for entries that have no natural anchor
    pub fn synthetic(file: PathBuf) -> Self {
        Self::new(file, 0, 0, 0, 0)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// One observed read of a prop field.
///
/// Records are append-only and never deduplicated; several reads of the same
/// field keep their own positions for later reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// The field name extracted at this access point
    pub name: String,

    /// Field names from the props root to this access, e.g. `props.a.b`
    /// becomes `["a", "b"]`
    pub path: Vec<String>,

    /// Position to attribute in later diagnostics
    pub location: Location,
}

impl UsageRecord {
    pub fn new(name: String, path: Vec<String>, location: Location) -> Self {
        Self {
            name,
            path,
            location,
        }
    }

    /// The top-level prop this record reads
    pub fn root(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or(&self.name)
    }
}

/// One entry of a component's declared propTypes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredProp {
    /// Prop name as declared
    pub name: String,

    /// Whether the declaration ends in `.isRequired`
    pub required: bool,

    /// Whether the declaration value is a custom validator function
    pub has_custom_validator: bool,

    /// Location of the declaration entry
    pub location: Location,
}

/// Declared prop schema of a component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclaredSchema {
    pub props: Vec<DeclaredProp>,
}

impl DeclaredSchema {
    pub fn contains(&self, name: &str) -> bool {
        self.props.iter().any(|p| p.name == name)
    }
}

/// A React component tracked during analysis.
///
/// Owned by the registry; the engine only reads it and requests merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Registry key
    pub key: OwnerKey,

    /// Component name, when one can be determined
    pub name: Option<String>,

    /// Kind of construct
    pub kind: ComponentKind,

    /// Location of the component construct
    pub location: Location,

    /// Observed prop reads, in traversal order
    pub used_properties: Vec<UsageRecord>,

    /// Once set, the unused-prop check is disabled for this component.
    /// Set when static enumeration of reads is known to be incomplete
    /// (spread bindings, computed keys, JSX spread forwarding).
    pub suppress_unused_check: bool,

    /// Set when the declared schema itself could not be statically
    /// analyzed; disables all prop validation for the component.
    pub ignore_validation: bool,

    /// Declared propTypes, when present
    pub declared_schema: Option<DeclaredSchema>,
}

impl Component {
    pub fn new(key: OwnerKey, name: Option<String>, kind: ComponentKind, location: Location) -> Self {
        Self {
            key,
            name,
            kind,
            location,
            used_properties: Vec::new(),
            suppress_unused_check: false,
            ignore_validation: false,
            declared_schema: None,
        }
    }

    /// Whether custom validators attached to the schema should be
    /// re-analyzed for this component
    pub fn must_validate(&self) -> bool {
        self.declared_schema.is_some() && !self.ignore_validation
    }

    /// Display string for reports
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new(PathBuf::from("test.jsx"), 1, 1, 0, 10)
    }

    #[test]
    fn test_owner_key_display() {
        assert_eq!(OwnerKey::Component(7).to_string(), "component:7");
        assert_eq!(OwnerKey::Ungrouped(7).to_string(), "ungrouped:7");
        assert!(OwnerKey::Component(7).is_component());
        assert!(!OwnerKey::Ungrouped(7).is_component());
    }

    #[test]
    fn test_usage_record_root() {
        let record = UsageRecord::new(
            "theme".to_string(),
            vec!["config".to_string(), "theme".to_string()],
            location(),
        );
        assert_eq!(record.root(), "config");
    }

    #[test]
    fn test_must_validate() {
        let mut component = Component::new(
            OwnerKey::Component(1),
            Some("App".to_string()),
            ComponentKind::Function,
            location(),
        );
        assert!(!component.must_validate());

        component.declared_schema = Some(DeclaredSchema::default());
        assert!(component.must_validate());

        component.ignore_validation = true;
        assert!(!component.must_validate());
    }
}
