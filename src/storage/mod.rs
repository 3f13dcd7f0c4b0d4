// src/storage/mod.rs
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::extractors::fields::LoanFields;
use crate::models::{AnalysisResult, AnalysisSummary, SectionMatch};
use crate::utils::error::StorageError;

/// Everything reported for one analyzed document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub document: String, // File stem of the analyzed input
    pub summary: AnalysisSummary,
    pub sections: Vec<ReportedSection>,
    pub loan_fields: LoanFields,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportedSection {
    pub name: &'static str,
    #[serde(flatten)]
    pub section: SectionMatch,
    pub page_count: u32,
    pub filename: String, // Suggested name when the package is split per section
}

impl DocumentReport {
    pub fn new(document: impl Into<String>, result: &AnalysisResult, loan_fields: LoanFields) -> Self {
        let sections = result
            .matches
            .iter()
            .map(|m| ReportedSection {
                name: m.section_type.name(),
                section: m.clone(),
                page_count: m.page_count(),
                filename: m.section_type.split_filename(),
            })
            .collect();
        Self {
            document: document.into(),
            summary: result.summary(),
            sections,
            loan_fields,
        }
    }
}

/// Report names for a batch of inputs: the file stem, with `_2`, `_3`, ...
/// appended when an earlier input already claimed it, so no two documents
/// share output files.
pub fn document_names(paths: &[PathBuf]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string());
            let mut name = stem.clone();
            let mut n = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}_{}", stem, n);
                n += 1;
            }
            if name != stem {
                tracing::warn!("{} shares its name with an earlier input; reporting it as {}", path.display(), name);
            }
            name
        })
        .collect()
}

pub struct ReportWriter {
    base_dir: PathBuf,
}

impl ReportWriter {
    /// Creates a new ReportWriter with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves the full report as pretty JSON: `<STEM>_sections.json`
    pub fn save_report(&self, report: &DocumentReport) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_sections.json", report.document));

        let json = serde_json::to_string_pretty(report)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json)?;

        tracing::info!("Saved report to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves run metadata next to the report: `<STEM>_sections_meta.json`
    pub fn save_report_metadata(&self, report: &DocumentReport) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_sections_meta.json", report.document));

        let metadata = serde_json::json!({
            "document": report.document,
            "pages_scanned": report.summary.pages_scanned,
            "section_count": report.summary.section_count,
            "overall_confidence": report.summary.overall_confidence,
            "loan_fields_found": !report.loan_fields.is_empty(),
            "analysis_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}
