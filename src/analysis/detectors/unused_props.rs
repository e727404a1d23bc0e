//! Unused declared prop detection
//!
//! Flags propTypes entries whose prop is never read by the component. A
//! component whose suppress flag was set during usage marking (spread
//! forwarding, computed keys, rest bindings) is skipped entirely: static
//! enumeration of its reads is incomplete, and a false negative is better
//! than a false positive.

use super::Detector;
use crate::analysis::{PropIssue, PropIssueKind};
use crate::engine::UnitAnalysis;
use std::collections::HashSet;

/// Detector for declared-but-unused props
pub struct UnusedPropsDetector {
    /// Skip props whose declaration carries a custom validator; the
    /// validator body may use the value in ways marking cannot see
    skip_custom_validators: bool,
}

impl UnusedPropsDetector {
    pub fn new() -> Self {
        Self {
            skip_custom_validators: false,
        }
    }

    #[allow(dead_code)] // Builder method for callers that want laxer checks
    pub fn with_skip_custom_validators(mut self, skip: bool) -> Self {
        self.skip_custom_validators = skip;
        self
    }
}

impl Detector for UnusedPropsDetector {
    fn detect(&self, units: &[UnitAnalysis]) -> Vec<PropIssue> {
        let mut issues = Vec::new();

        for unit in units {
            for component in &unit.components {
                let Some(ref schema) = component.declared_schema else {
                    continue;
                };
                if component.suppress_unused_check || component.ignore_validation {
                    continue;
                }

                let used_roots: HashSet<&str> = component
                    .used_properties
                    .iter()
                    .map(|record| record.root())
                    .collect();

                for declared in &schema.props {
                    if used_roots.contains(declared.name.as_str()) {
                        continue;
                    }
                    if self.skip_custom_validators && declared.has_custom_validator {
                        continue;
                    }
                    issues.push(PropIssue::new(
                        declared.name.clone(),
                        vec![declared.name.clone()],
                        component.name.clone(),
                        PropIssueKind::UnusedProp,
                        declared.location.clone(),
                    ));
                }
            }
        }

        issues
    }
}

impl Default for UnusedPropsDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{analyze_source, EngineConfig};
    use std::path::Path;

    fn analyze(source: &str) -> UnitAnalysis {
        analyze_source(Path::new("test.jsx"), source, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_reports_unused_declared_prop() {
        let unit = analyze(
            r#"
            function Card(props) {
                return <div>{props.title}</div>;
            }
            Card.propTypes = {
                title: PropTypes.string,
                subtitle: PropTypes.string,
            };
            "#,
        );

        let issues = UnusedPropsDetector::new().detect(&[unit]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].prop, "subtitle");
        assert_eq!(issues[0].issue, PropIssueKind::UnusedProp);
    }

    #[test]
    fn test_suppressed_component_is_skipped() {
        let unit = analyze(
            r#"
            function Card(props) {
                return <Inner {...props} />;
            }
            Card.propTypes = {
                title: PropTypes.string,
            };
            "#,
        );

        let issues = UnusedPropsDetector::new().detect(&[unit]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_nested_read_marks_root_used() {
        let unit = analyze(
            r#"
            function Card(props) {
                return <div>{props.config.theme}</div>;
            }
            Card.propTypes = {
                config: PropTypes.object,
            };
            "#,
        );

        let issues = UnusedPropsDetector::new().detect(&[unit]);
        assert!(issues.is_empty());
    }
}
