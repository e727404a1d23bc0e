//! Undeclared used prop detection
//!
//! Flags prop reads whose top-level name is missing from the component's
//! declared propTypes. Reported per usage record at the recorded position,
//! deduplicated per exact location so one read yields one finding.

use super::Detector;
use crate::analysis::{PropIssue, PropIssueKind};
use crate::engine::UnitAnalysis;
use std::collections::HashSet;

/// Detector for used-but-undeclared props
pub struct UndeclaredPropsDetector;

impl UndeclaredPropsDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for UndeclaredPropsDetector {
    fn detect(&self, units: &[UnitAnalysis]) -> Vec<PropIssue> {
        let mut issues = Vec::new();

        for unit in units {
            for component in &unit.components {
                let Some(ref schema) = component.declared_schema else {
                    continue;
                };
                if component.ignore_validation {
                    continue;
                }

                let mut seen = HashSet::new();
                for record in &component.used_properties {
                    if schema.contains(record.root()) {
                        continue;
                    }
                    if !seen.insert((record.root().to_string(), record.location.clone())) {
                        continue;
                    }
                    issues.push(PropIssue::new(
                        record.root().to_string(),
                        record.path.clone(),
                        component.name.clone(),
                        PropIssueKind::UndeclaredProp,
                        record.location.clone(),
                    ));
                }
            }
        }

        issues
    }
}

impl Default for UndeclaredPropsDetector {
    fn default() -> Self {
        Self::new()
    }
}
