// Analysis module - issue model shared by all detectors
#![allow(dead_code)]

pub mod detectors;

pub use detectors::{Detector, UndeclaredPropsDetector, UnusedPropsDetector};

use crate::components::Location;

/// A prop validation finding
#[derive(Debug, Clone)]
pub struct PropIssue {
    /// Prop name the finding is about
    pub prop: String,

    /// Full dotted path for nested reads, e.g. `config.theme`
    pub path: Vec<String>,

    /// Name of the component involved, when known
    pub component: Option<String>,

    /// The kind of issue
    pub issue: PropIssueKind,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Position to report
    pub location: Location,
}

impl PropIssue {
    pub fn new(
        prop: String,
        path: Vec<String>,
        component: Option<String>,
        issue: PropIssueKind,
        location: Location,
    ) -> Self {
        let severity = issue.default_severity();
        let message = issue.default_message(&prop, component.as_deref());
        Self {
            prop,
            path,
            component,
            issue,
            severity,
            message,
            location,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Types of prop validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropIssueKind {
    /// Prop is read by the component but missing from its propTypes
    UndeclaredProp,

    /// Prop is declared in propTypes but never read
    UnusedProp,
}

impl PropIssueKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            PropIssueKind::UndeclaredProp => Severity::Error,
            PropIssueKind::UnusedProp => Severity::Warning,
        }
    }

    pub fn default_message(&self, prop: &str, component: Option<&str>) -> String {
        let component = component.unwrap_or("<anonymous>");
        match self {
            PropIssueKind::UndeclaredProp => {
                format!(
                    "'{}' is missing in props validation of '{}'",
                    prop, component
                )
            }
            PropIssueKind::UnusedProp => {
                format!(
                    "'{}' PropType is defined but prop is never used in '{}'",
                    prop, component
                )
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PropIssueKind::UndeclaredProp => "PS001",
            PropIssueKind::UnusedProp => "PS002",
        }
    }
}

/// Severity levels for prop issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_codes() {
        assert_eq!(PropIssueKind::UndeclaredProp.code(), "PS001");
        assert_eq!(PropIssueKind::UnusedProp.code(), "PS002");
    }

    #[test]
    fn test_default_messages() {
        let message = PropIssueKind::UnusedProp.default_message("title", Some("Card"));
        assert!(message.contains("title"));
        assert!(message.contains("Card"));
    }
}
