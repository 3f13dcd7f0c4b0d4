// src/extractors/mod.rs
pub mod fields;
pub mod scoring;
pub mod section;

// Re-export key identification types for convenience
pub use fields::{extract_loan_fields, LoanFields};
pub use section::SectionIdentifier;
