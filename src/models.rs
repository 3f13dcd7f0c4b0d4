// src/models.rs
use serde::{Deserialize, Serialize};

use crate::catalog::SectionType;

/// Extracted plain text of one page, as produced by the upstream extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32, // 1-based
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// A detected section occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMatch {
    pub section_type: SectionType,
    pub priority: u8,
    pub page_number: u32,
    pub end_page: u32,       // Last page of a collapsed run, equal to page_number otherwise
    pub confidence: u8,      // 0-100
    pub matched_text: String, // The span the primary pattern matched
    pub context: String,     // The line containing the match
}

impl SectionMatch {
    pub fn page_count(&self) -> u32 {
        self.end_page - self.page_number + 1
    }
}

/// Ranked output of one analysis run. Lives only as long as the run's caller keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub matches: Vec<SectionMatch>,
    pub pages_scanned: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub section_count: usize,
    pub pages_scanned: usize,
    pub overall_confidence: f32, // Mean match confidence, 0 when nothing matched
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// (section type, page, confidence) triples in rank order.
    pub fn triples(&self) -> Vec<(SectionType, u32, u8)> {
        self.matches
            .iter()
            .map(|m| (m.section_type, m.page_number, m.confidence))
            .collect()
    }

    pub fn summary(&self) -> AnalysisSummary {
        let overall_confidence = if self.matches.is_empty() {
            0.0
        } else {
            let total: u32 = self.matches.iter().map(|m| u32::from(m.confidence)).sum();
            total as f32 / self.matches.len() as f32
        };
        AnalysisSummary {
            section_count: self.matches.len(),
            pages_scanned: self.pages_scanned,
            overall_confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(section_type: SectionType, page: u32, confidence: u8) -> SectionMatch {
        SectionMatch {
            section_type,
            priority: section_type.default_priority(),
            page_number: page,
            end_page: page,
            confidence,
            matched_text: String::new(),
            context: String::new(),
        }
    }

    #[test]
    fn test_summary_of_empty_result() {
        let result = AnalysisResult {
            matches: vec![],
            pages_scanned: 3,
        };
        let summary = result.summary();
        assert_eq!(summary.section_count, 0);
        assert_eq!(summary.pages_scanned, 3);
        assert_eq!(summary.overall_confidence, 0.0);
    }

    #[test]
    fn test_summary_averages_confidence() {
        let result = AnalysisResult {
            matches: vec![section(SectionType::Mortgage, 1, 90), section(SectionType::Deed, 4, 60)],
            pages_scanned: 5,
        };
        assert_eq!(result.summary().overall_confidence, 75.0);
        assert_eq!(
            result.triples(),
            vec![(SectionType::Mortgage, 1, 90), (SectionType::Deed, 4, 60)]
        );
    }

    #[test]
    fn test_page_count_spans_run() {
        let mut m = section(SectionType::PromissoryNote, 2, 80);
        m.end_page = 4;
        assert_eq!(m.page_count(), 3);
    }
}
