//! propscan - Fast React prop usage analysis for JavaScript/JSX
//!
//! This library statically tracks which props a React component actually
//! reads and cross-checks that set against the component's declared
//! propTypes.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .js/.jsx files
//! 2. **Parsing** - Parse source files using tree-sitter
//! 3. **Usage Marking** - Walk each tree once, classifying components and
//!    accumulating prop reads per component
//! 4. **Cross-Checking** - Compare used props against declared propTypes
//! 5. **Reporting** - Output results in terminal or JSON form

pub mod analysis;
pub mod components;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod parser;
pub mod report;
pub mod watch;

pub use analysis::{Detector, PropIssue, PropIssueKind, Severity, UndeclaredPropsDetector, UnusedPropsDetector};
pub use components::{Component, ComponentKind, ComponentRegistry, DeclaredProp, DeclaredSchema, Location, OwnerKey, UsageRecord};
pub use config::Config;
pub use discovery::{FileFinder, FileType, SourceFile};
pub use engine::{analyze_source, EngineConfig, UnitAnalysis};
pub use parser::JsParser;
pub use report::{ReportFormat, Reporter};
pub use watch::FileWatcher;
