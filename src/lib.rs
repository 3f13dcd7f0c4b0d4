// src/lib.rs
//! Identifies the sections of a mortgage closing package from per-page text.
//!
//! ```no_run
//! use mortgage_sections::{IdentifierConfig, PageText, SectionIdentifier};
//!
//! let identifier = SectionIdentifier::new(IdentifierConfig::default())?;
//! let pages = vec![PageText::new(1, "MORTGAGE This Mortgage is made this day...")];
//! for (section, page, confidence) in identifier.identify(&pages)?.triples() {
//!     println!("{} p.{} ({}%)", section, page, confidence);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod extractors;
pub mod input;
pub mod models;
pub mod storage;
pub mod utils;

pub use catalog::{SectionProfile, SectionType};
pub use config::{CollapsePolicy, IdentifierConfig, ScoringWeights};
pub use extractors::{extract_loan_fields, LoanFields, SectionIdentifier};
pub use models::{AnalysisResult, AnalysisSummary, PageText, SectionMatch};
pub use utils::error::{ConfigError, IdentifyError};
