use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::Result;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

mod analysis;
mod components;
mod config;
mod discovery;
mod engine;
mod parser;
mod report;
mod watch;

use analysis::{Detector, PropIssue, UndeclaredPropsDetector, UnusedPropsDetector};
use config::Config;
use discovery::FileFinder;
use engine::{analyze_source, EngineConfig, UnitAnalysis};
use report::Reporter;

/// propscan - Fast React prop usage analysis for JavaScript/JSX
#[derive(Parser, Debug)]
#[command(name = "propscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target directories to analyze (can be specified multiple times)
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// React version of the analyzed project (e.g. "16.2.0")
    #[arg(long, value_name = "VERSION")]
    react_version: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable unused declared prop detection
    #[arg(long)]
    no_unused: bool,

    /// Disable undeclared used prop detection
    #[arg(long)]
    no_undeclared: bool,

    /// Watch mode - continuously monitor for changes
    #[arg(long)]
    watch: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for report::ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => report::ReportFormat::Terminal,
            OutputFormat::Json => report::ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("propscan v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    if cli.watch {
        run_watch_mode(&config, &cli)?;
    } else {
        let issue_count = run_analysis(&config, &cli)?;
        if issue_count > 0 {
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run_watch_mode(config: &Config, cli: &Cli) -> Result<()> {
    use watch::FileWatcher;

    let watcher = FileWatcher::new();
    let config = config.clone();
    let cli_path = cli.path.clone();
    let cli_format = cli.format.clone();
    let cli_output = cli.output.clone();
    let cli_no_unused = cli.no_unused;
    let cli_no_undeclared = cli.no_undeclared;
    let cli_quiet = cli.quiet;

    watcher
        .watch(&cli.path, move || {
            let result = run_analysis_internal(
                &config,
                &cli_path,
                cli_format.clone(),
                cli_output.clone(),
                cli_no_unused,
                cli_no_undeclared,
                cli_quiet,
            );
            match result {
                Ok(_) => {
                    println!();
                    println!("{}", "Analysis complete. Waiting for changes...".green());
                    true
                }
                Err(e) => {
                    eprintln!("{}: {}", "Analysis error".red(), e);
                    true // Continue watching
                }
            }
        })
        .map_err(|e| miette::miette!("Watch error: {}", e))?;

    Ok(())
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<usize> {
    run_analysis_internal(
        config,
        &cli.path,
        cli.format.clone(),
        cli.output.clone(),
        cli.no_unused,
        cli.no_undeclared,
        cli.quiet,
    )
}

fn run_analysis_internal(
    config: &Config,
    path: &PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    no_unused: bool,
    no_undeclared: bool,
    quiet: bool,
) -> Result<usize> {
    let start_time = std::time::Instant::now();

    let finder = FileFinder::new(config);
    let files = finder.find_files(path)?;

    if files.is_empty() {
        if !quiet {
            println!("{}", "No JavaScript/JSX files found.".yellow());
        }
        return Ok(0);
    }

    let engine_config = EngineConfig::from_react_version(config.react.version.as_deref());

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .expect("valid progress template")
                .progress_chars("=> "),
        );
        bar
    };

    // Each file gets its own registry; units never share state, so the
    // per-file analyses are free to run in parallel
    let mut units: Vec<UnitAnalysis> = files
        .par_iter()
        .filter_map(|file| {
            let contents = match file.read_contents() {
                Ok(contents) => contents,
                Err(e) => {
                    progress.suspend(|| {
                        eprintln!("{}: {}: {}", "warning".yellow(), file.path.display(), e);
                    });
                    progress.inc(1);
                    return None;
                }
            };
            let unit = analyze_source(&file.path, &contents, &engine_config);
            progress.inc(1);
            match unit {
                Ok(unit) => Some(unit),
                Err(e) => {
                    progress.suspend(|| {
                        eprintln!("{}: {}: {}", "warning".yellow(), file.path.display(), e);
                    });
                    None
                }
            }
        })
        .collect();
    progress.finish_and_clear();

    units.sort_by(|a, b| a.path.cmp(&b.path));

    let mut issues: Vec<PropIssue> = Vec::new();
    if config.detection.undeclared_props && !no_undeclared {
        issues.extend(UndeclaredPropsDetector::new().detect(&units));
    }
    if config.detection.unused_props && !no_unused {
        issues.extend(UnusedPropsDetector::new().detect(&units));
    }

    if !quiet {
        let component_count: usize = units
            .iter()
            .map(|u| u.components.iter().filter(|c| !matches!(c.kind, components::ComponentKind::Ungrouped)).count())
            .sum();
        println!(
            "{}",
            format!(
                "Analyzed {} files, {} components in {:.2?}",
                units.len(),
                component_count,
                start_time.elapsed()
            )
            .dimmed()
        );
    }

    let reporter = Reporter::new(format.into(), output);
    reporter.report(&issues)?;

    Ok(issues.len())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_default_locations(&cli.path)?,
    };

    // CLI flags override file configuration
    if !cli.target.is_empty() {
        config.targets = cli.target.clone();
    }
    config.exclude.extend(cli.exclude.iter().cloned());
    if cli.react_version.is_some() {
        config.react.version = cli.react_version.clone();
    }

    Ok(config)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
