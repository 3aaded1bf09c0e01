//! idier - move project folders nobody has touched in a while into an archive.
//!
//! Usage:
//!   idier                     Archive projects untouched for more than 180 days
//!   idier --age 90 --yes      Archive without asking
//!   idier --projects          List projects and archives, then exit
//!   idier --help              Show help

mod prompt;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use idier_analyze::{format_elapsed, ProjectAggregator, ProjectAnalysis, ProjectOrder, ScanReport};
use idier_core::{parse_age_days, ArchiveConfig, ExclusionMatcher, DEFAULT_AGE_DAYS};
use idier_ops::{ArchiveEvent, Archivist, AutoConfirm, Confirmation};
use idier_scan::TreeCollector;

use crate::prompt::PromptConfirmation;

#[derive(Parser)]
#[command(
    name = "idier",
    version,
    about = "Move projects untouched for a while into an archive folder",
    long_about = "idier looks at every folder directly under the root, finds the most \
                  recently modified file in each, and moves folders older than the \
                  threshold into the archive. It asks before moving anything unless \
                  --yes is given."
)]
struct Cli {
    /// Archive projects if files have been untouched for more than this many days
    #[arg(
        long,
        visible_alias = "days",
        value_name = "DAYS",
        value_parser = parse_age_days,
        default_value_t = DEFAULT_AGE_DAYS
    )]
    age: u64,

    /// Use this directory as the root for project folders
    #[arg(long, value_name = "PATH", default_value = ".")]
    root: PathBuf,

    /// Use this directory as the archive folder (defaults to ROOT/_Archive)
    #[arg(long, value_name = "PATH")]
    archive: Option<PathBuf>,

    /// Additional glob patterns to skip while scanning (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Do not prompt to confirm the archive
    #[arg(short, long)]
    yes: bool,

    /// Print the list of projects and archives with their ages, then exit
    #[arg(long)]
    projects: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;

    let mut builder = ArchiveConfig::builder();
    builder
        .root(cli.root)
        .age_threshold_days(cli.age)
        .exclude_patterns(cli.exclude)
        .auto_confirm(cli.yes)
        .list_only(cli.projects);
    if let Some(archive) = cli.archive {
        builder.archive(archive);
    }
    let config = builder
        .build()
        .map_err(idier_core::ConfigError::from)?
        .resolve(&cwd)?;
    tracing::debug!(?config, "starting run");

    if config.list_only {
        run_listing(&config, cli.format)
    } else {
        run_archive(&config, cli.format)
    }
}

/// Log to stderr so reports on stdout stay clean. `RUST_LOG` overrides the level.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();
}

/// Walk the root and aggregate its projects.
fn analyze_root(config: &ArchiveConfig) -> Result<ProjectAnalysis> {
    let matcher = config.matcher()?;
    let listing = TreeCollector::new()
        .collect(&config.root, &matcher)
        .context("Scan failed")?;

    Ok(ProjectAnalysis::from_listing(
        &ProjectAggregator::new(),
        &listing,
        &config.archive_path(),
        config.age_threshold_days,
    ))
}

/// Walk the archive itself. A missing archive is empty, never created.
fn analyze_archive(config: &ArchiveConfig, matcher: &ExclusionMatcher) -> Result<Option<ProjectAnalysis>> {
    let archive = config.archive_path();
    if !archive.is_dir() {
        return Ok(None);
    }

    let listing = TreeCollector::new()
        .collect(&archive, &matcher.without_archive())
        .context("Archive scan failed")?;

    // Archived projects have nowhere further to go; destinations stay inside the archive.
    Ok(Some(ProjectAnalysis::from_listing(
        &ProjectAggregator::new(),
        &listing,
        &archive,
        config.age_threshold_days,
    )))
}

#[derive(Serialize)]
struct ListingOutput {
    archive: Option<ScanReport>,
    projects: ScanReport,
}

/// List archived and live projects, then exit.
fn run_listing(config: &ArchiveConfig, format: OutputFormat) -> Result<()> {
    let matcher = config.matcher()?;
    let archived = analyze_archive(config, &matcher)?;
    let live = analyze_root(config)?;

    let output = ListingOutput {
        archive: archived.map(|a| a.report(ProjectOrder::StalestFirst)),
        projects: live.report(ProjectOrder::Alphabetical),
    };

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            let empty = Vec::new();
            let (archived_projects, archived_files, archived_elapsed) = match &output.archive {
                Some(report) => (&report.projects, report.files_scanned, report.elapsed_ms),
                None => (&empty, 0, 0),
            };
            print_projects(&mut out, "Archives Oldest -> Newest", archived_projects)?;
            print_summary(&mut out, archived_files, archived_projects.len(), archived_elapsed)?;

            print_projects(&mut out, "Projects", &output.projects.projects)?;
            print_summary(
                &mut out,
                output.projects.files_scanned,
                output.projects.project_count,
                output.projects.elapsed_ms,
            )?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ArchiveOutput {
    scan: ScanReport,
    confirmed: bool,
    archive_created: bool,
    moved: Vec<MovedProject>,
}

#[derive(Serialize)]
struct MovedProject {
    from: PathBuf,
    to: PathBuf,
}

/// Report stale projects and, once confirmed, move them into the archive.
fn run_archive(config: &ArchiveConfig, format: OutputFormat) -> Result<()> {
    let analysis = analyze_root(config)?;
    let report = analysis.report(ProjectOrder::Alphabetical);
    // Moves follow selection order, which is walk order.
    let stale = &analysis.stale;
    let threshold = config.age_threshold_days;

    if format == OutputFormat::Text {
        let mut out = io::stdout().lock();
        print_summary(&mut out, report.files_scanned, report.project_count, report.elapsed_ms)?;
        if stale.is_empty() {
            writeln!(out, "No projects untouched for more than {threshold} days. Nothing to do!")?;
            return Ok(());
        }
        writeln!(out, "Projects untouched for more than {threshold} days:")?;
        for project in &report.stale {
            writeln!(out, "  {} ({} days ago) -> WILL ARCHIVE", project.name, project.age_days)?;
        }
        writeln!(out)?;
    }

    // JSON output is for scripts: it never waits on a prompt.
    let mut gate: Box<dyn Confirmation> = if config.auto_confirm || format == OutputFormat::Json {
        Box::new(AutoConfirm(config.auto_confirm))
    } else {
        Box::new(PromptConfirmation::new(io::stdin().lock(), io::stdout()))
    };

    let mut archivist = Archivist::new(config.archive_path());
    let outcome = archivist
        .archive_confirmed(stale, gate.as_mut(), |event| {
            if format == OutputFormat::Text {
                if let ArchiveEvent::Moving { from, destination } = event {
                    println!("moving {} -> {}", from.display(), destination.display());
                }
            }
        })
        .context("Archive failed")?;

    if format == OutputFormat::Json {
        let output = ArchiveOutput {
            scan: report,
            confirmed: outcome.confirmed,
            archive_created: outcome.archive_created,
            moved: outcome
                .moved
                .into_iter()
                .map(|(from, to)| MovedProject { from, to })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

fn print_projects(out: &mut impl Write, heading: &str, projects: &[idier_core::ProjectSummary]) -> io::Result<()> {
    writeln!(out, "{heading}:")?;
    for project in projects {
        writeln!(out, "  {} ({} days ago)", project.name, project.age_days)?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, files: usize, projects: usize, elapsed_ms: u64) -> io::Result<()> {
    writeln!(
        out,
        "Analyzed {files} files in {projects} projects in {}",
        format_elapsed(std::time::Duration::from_millis(elapsed_ms))
    )?;
    writeln!(out)
}
