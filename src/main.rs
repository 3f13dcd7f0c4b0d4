// src/main.rs
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use mortgage_sections::config::{CollapsePolicy, IdentifierConfig};
use mortgage_sections::extractors::{extract_loan_fields, SectionIdentifier};
use mortgage_sections::input;
use mortgage_sections::models::PageText;
use mortgage_sections::storage::{self, DocumentReport, ReportWriter};
use mortgage_sections::utils::{self, AppError};

const MIN_CONFIDENCE_ENV: &str = "SECTION_MIN_CONFIDENCE";

/// Command Line Interface for the mortgage package section identifier
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Extracted page text: a .json page array or form-feed separated text
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON configuration overriding weights, threshold or section profiles
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON report per document into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Minimum confidence (0-100) for a match to be reported
    #[arg(short, long)]
    min_confidence: Option<u8>,

    /// Report every matching page instead of merging consecutive pages
    #[arg(long)]
    no_collapse: bool,

    /// Surface only the best match of each section type
    #[arg(long)]
    best_per_type: bool,

    /// Debug mode - verbose logging and annotated HTML views (requires --output-dir)
    #[arg(short, long)]
    debug: bool,
}

/// One analyzed document, ready to print and save
struct Analyzed {
    document: String,
    pages: Vec<PageText>,
    report: DocumentReport,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Build the identifier once; it is shared read-only by every document task
    let config = build_config(&args)?;
    let identifier = Arc::new(SectionIdentifier::new(config)?);

    // 4. Initialize storage if reports were requested
    let writer = match &args.output_dir {
        Some(dir) => Some(ReportWriter::new(dir)?),
        None => None,
    };
    if args.debug && writer.is_none() {
        tracing::warn!("--debug given without --output-dir; debug HTML will not be written");
    }

    // 5. Analyze every document concurrently
    let names = storage::document_names(&args.inputs);
    let mut tasks = Vec::with_capacity(args.inputs.len());
    for (path, document) in args.inputs.clone().into_iter().zip(names) {
        let identifier = Arc::clone(&identifier);
        tasks.push(tokio::spawn(async move {
            let outcome = analyze_document(&path, document, &identifier).await;
            (path, outcome)
        }));
    }

    // 6. Report results in input order
    let mut success_count = 0;
    let mut failure_count = 0;

    for task in tasks {
        let (path, outcome) = task
            .await
            .map_err(|e| AppError::Processing(format!("Analysis task failed: {}", e)))?;

        match outcome {
            Ok(analyzed) => {
                success_count += 1;
                print_report(&analyzed.report);

                if let Some(writer) = &writer {
                    match writer.save_report(&analyzed.report) {
                        Ok(path) => tracing::info!("Saved report to: {}", path.display()),
                        Err(e) => tracing::error!("Failed to save report: {}", e),
                    }
                    match writer.save_report_metadata(&analyzed.report) {
                        Ok(path) => tracing::info!("Saved report metadata to: {}", path.display()),
                        Err(e) => tracing::error!("Failed to save report metadata: {}", e),
                    }
                    if args.debug {
                        let debug_path = writer.base_dir().join(format!("{}_annotated.html", analyzed.document));
                        if let Err(e) = utils::html_debug::save_debug_html(
                            &debug_path,
                            &analyzed.document,
                            &analyzed.pages,
                            &identifier,
                        ) {
                            tracing::warn!("Failed to create debug HTML: {}", e);
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!("Failed to analyze {}: {}", path.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to analyze any of {} documents",
            failure_count
        )));
    }

    Ok(())
}

/// Config file (if any), then CLI flags, then the `SECTION_MIN_CONFIDENCE` fallback
fn build_config(args: &Args) -> Result<IdentifierConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => IdentifierConfig::from_json_file(path)?,
        None => IdentifierConfig::default(),
    };

    if let Some(min) = args.min_confidence {
        tracing::debug!("Setting min confidence to {} from command-line argument", min);
        config.min_confidence = min;
    } else if let Ok(raw) = std::env::var(MIN_CONFIDENCE_ENV) {
        match raw.trim().parse::<u8>() {
            Ok(min) => {
                tracing::debug!("Using {}={}", MIN_CONFIDENCE_ENV, min);
                config.min_confidence = min;
            }
            Err(_) => tracing::warn!("Ignoring unparsable {}='{}'", MIN_CONFIDENCE_ENV, raw),
        }
    }

    if args.no_collapse {
        config.collapse = CollapsePolicy::None;
    }
    if args.best_per_type {
        config.best_per_type = true;
    }

    config.validate()?;
    Ok(config)
}

async fn analyze_document(
    path: &Path,
    document: String,
    identifier: &SectionIdentifier,
) -> Result<Analyzed, AppError> {
    let pages = input::load_pages(path).await?;
    let result = identifier.identify(&pages)?;

    let full_text = pages.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join("\n");
    let loan_fields = extract_loan_fields(&full_text);

    let report = DocumentReport::new(document.clone(), &result, loan_fields);
    Ok(Analyzed {
        document,
        pages,
        report,
    })
}

fn print_report(report: &DocumentReport) {
    println!(
        "{}: {} sections across {} pages (overall confidence {:.0}%)",
        report.document,
        report.summary.section_count,
        report.summary.pages_scanned,
        report.summary.overall_confidence
    );
    for reported in &report.sections {
        let pages = if reported.page_count > 1 {
            format!("pp. {}-{}", reported.section.page_number, reported.section.end_page)
        } else {
            format!("p. {}", reported.section.page_number)
        };
        println!(
            "  [{:>2}] {:<52} {:<10} {:>3}%",
            reported.section.priority, reported.name, pages, reported.section.confidence
        );
    }
}
