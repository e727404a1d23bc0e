use crate::analysis::{PropIssue, Severity};
use colored::Colorize;
use miette::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Show a per-severity summary at the end
    show_summary: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_summary: true }
    }

    #[allow(dead_code)] // Builder pattern method for future use
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    pub fn report(&self, issues: &[PropIssue]) -> Result<()> {
        if issues.is_empty() {
            println!("{}", "No prop issues found!".green().bold());
            return Ok(());
        }

        // Group by file
        let mut by_file: HashMap<PathBuf, Vec<&PropIssue>> = HashMap::new();
        for issue in issues {
            by_file
                .entry(issue.location.file.clone())
                .or_default()
                .push(issue);
        }

        println!();
        println!(
            "{}",
            format!("Found {} prop issues:", issues.len()).yellow().bold()
        );
        println!();

        let mut files: Vec<_> = by_file.keys().cloned().collect();
        files.sort();

        for file in files {
            let items = &by_file[&file];

            println!("{}", file.display().to_string().cyan().bold());
            for issue in items {
                self.print_issue(issue);
            }
            println!();
        }

        if self.show_summary {
            self.print_summary(issues);
        }

        Ok(())
    }

    fn print_issue(&self, issue: &PropIssue) {
        let severity_str = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };

        let location = format!("{}:{}", issue.location.line, issue.location.column);

        println!(
            "  {} {} [{}] {}",
            location.dimmed(),
            severity_str,
            issue.issue.code().dimmed(),
            issue.message
        );
    }

    fn print_summary(&self, issues: &[PropIssue]) {
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warnings = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count();
        let infos = issues.iter().filter(|i| i.severity == Severity::Info).count();

        println!(
            "{} {} {} {} {} {}",
            "Summary:".bold(),
            format!("{} errors", errors).red(),
            "·".dimmed(),
            format!("{} warnings", warnings).yellow(),
            "·".dimmed(),
            format!("{} infos", infos).blue()
        );
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
