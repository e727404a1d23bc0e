// Usage-tracking engine
#![allow(dead_code)]

mod context;
mod driver;
mod marker;
mod resolver;

pub use context::{ContextClassifier, ASYNC_SAFE_LIFECYCLE_METHODS, LIFECYCLE_METHODS};
pub use driver::TraversalDriver;
pub use marker::UsageMarker;
pub use resolver::{PropName, PropPathResolver, Resolution};

use crate::components::Component;
use crate::parser::JsParser;
use miette::Result;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// The lexical root names a props bundle can appear under: the current
/// props, the incoming props of an update, and the previous snapshot
pub const PROP_ROOT_NAMES: [&str; 3] = ["props", "nextProps", "prevProps"];

/// Engine configuration, resolved once before traversal begins
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Treat the async-safe lifecycle names (`getDerivedStateFromProps`,
    /// `UNSAFE_*`) as lifecycle methods. Gated on React `>= 16.3`.
    pub check_async_safe_lifecycles: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            check_async_safe_lifecycles: true,
        }
    }
}

impl EngineConfig {
    /// Resolve the configuration from a configured React version.
    /// An unknown version assumes a current React.
    pub fn from_react_version(version: Option<&str>) -> Self {
        let check_async_safe_lifecycles = version
            .map(|v| version_at_least(v, 16, 3))
            .unwrap_or(true);
        Self {
            check_async_safe_lifecycles,
        }
    }
}

fn version_at_least(version: &str, major: u32, minor: u32) -> bool {
    let mut parts = version
        .split('.')
        .map(|part| part.trim().parse::<u32>().unwrap_or(0));
    let maj = parts.next().unwrap_or(0);
    let min = parts.next().unwrap_or(0);
    maj > major || (maj == major && min >= minor)
}

/// Contract violations inside the engine.
///
/// These indicate a routing bug between the traversal driver and the
/// marker, not a property of the analyzed source, and abort the current
/// source unit.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("node kind `{kind}` is not handled by the usage marker")]
    UnsupportedNode { kind: String },
}

/// Analysis result for one source unit
#[derive(Debug)]
pub struct UnitAnalysis {
    /// Path of the analyzed file
    pub path: PathBuf,

    /// Components discovered in the unit, in registration order
    pub components: Vec<Component>,
}

impl UnitAnalysis {
    /// Components that declare a prop schema
    pub fn components_with_schema(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| c.declared_schema.is_some())
    }
}

/// Parse and analyze a single source unit
pub fn analyze_source(path: &Path, contents: &str, config: &EngineConfig) -> Result<UnitAnalysis> {
    let mut parser = JsParser::new();
    let tree = parser.parse(path, contents)?;

    let mut driver = TraversalDriver::new(path, contents, config);
    driver.run(tree.root_node())?;
    let components = driver.into_components();

    debug!(
        "Analyzed {}: {} component entries",
        path.display(),
        components.len()
    );

    Ok(UnitAnalysis {
        path: path.to_path_buf(),
        components,
    })
}
