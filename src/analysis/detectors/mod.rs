// Detectors cross-checking used props against declared schemas

mod undeclared_props;
mod unused_props;

pub use undeclared_props::UndeclaredPropsDetector;
pub use unused_props::UnusedPropsDetector;

use crate::analysis::PropIssue;
use crate::engine::UnitAnalysis;

/// Trait for prop validation detectors
pub trait Detector {
    /// Run the detector over analyzed source units and return found issues
    fn detect(&self, units: &[UnitAnalysis]) -> Vec<PropIssue>;
}
