use crate::analysis::{PropIssue, Severity};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, issues: &[PropIssue]) -> Result<()> {
        let report = JsonReport::from_issues(issues);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total_issues: usize,
    issues: Vec<JsonIssue>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonIssue {
    code: &'static str,
    severity: &'static str,
    message: String,
    prop: String,
    path: Vec<String>,
    component: Option<String>,
    file: String,
    line: usize,
    column: usize,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    infos: usize,
}

impl JsonReport {
    fn from_issues(issues: &[PropIssue]) -> Self {
        let mut errors = 0;
        let mut warnings = 0;
        let mut infos = 0;

        let json_issues = issues
            .iter()
            .map(|issue| {
                match issue.severity {
                    Severity::Error => errors += 1,
                    Severity::Warning => warnings += 1,
                    Severity::Info => infos += 1,
                }

                JsonIssue {
                    code: issue.issue.code(),
                    severity: issue.severity.as_str(),
                    message: issue.message.clone(),
                    prop: issue.prop.clone(),
                    path: issue.path.clone(),
                    component: issue.component.clone(),
                    file: issue.location.file.display().to_string(),
                    line: issue.location.line,
                    column: issue.location.column,
                }
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION"),
            total_issues: issues.len(),
            issues: json_issues,
            summary: JsonSummary {
                errors,
                warnings,
                infos,
            },
        }
    }
}
