// src/catalog/mod.rs
//! The fixed catalog of mortgage package section types.

pub mod patterns;

use serde::{Deserialize, Serialize};
use std::fmt;

use patterns::PatternTable;

/// One of the 16 recognized mortgage document categories.
///
/// Declaration order is the catalog order, used as the last ranking tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Mortgage,
    PromissoryNote,
    SecurityInstrument,
    SettlementStatement,
    LendersClosingInstructionsGuaranty,
    SignedClosingInstructions,
    Deed,
    FundingRequest,
    WireInstructions,
    EstimatedDisbursementStatement,
    StatementOfAntiCoercionFlorida,
    CorrectionAgreementAndLimitedPowerOfAttorney,
    FloodHazardDetermination,
    AllPurposeAcknowledgment,
    AutomaticPaymentsAuthorization,
    TaxRecordInformation,
}

impl SectionType {
    pub const ALL: [SectionType; 16] = [
        SectionType::Mortgage,
        SectionType::PromissoryNote,
        SectionType::SecurityInstrument,
        SectionType::SettlementStatement,
        SectionType::LendersClosingInstructionsGuaranty,
        SectionType::SignedClosingInstructions,
        SectionType::Deed,
        SectionType::FundingRequest,
        SectionType::WireInstructions,
        SectionType::EstimatedDisbursementStatement,
        SectionType::StatementOfAntiCoercionFlorida,
        SectionType::CorrectionAgreementAndLimitedPowerOfAttorney,
        SectionType::FloodHazardDetermination,
        SectionType::AllPurposeAcknowledgment,
        SectionType::AutomaticPaymentsAuthorization,
        SectionType::TaxRecordInformation,
    ];

    /// Display name, as shown in a table of contents.
    pub fn name(self) -> &'static str {
        match self {
            SectionType::Mortgage => "Mortgage",
            SectionType::PromissoryNote => "Promissory Note",
            SectionType::SecurityInstrument => "Security Instrument",
            SectionType::SettlementStatement => "Settlement Statement",
            SectionType::LendersClosingInstructionsGuaranty => "Lenders Closing Instructions Guaranty",
            SectionType::SignedClosingInstructions => "Signed Closing Instructions",
            SectionType::Deed => "Deed",
            SectionType::FundingRequest => "Funding Request",
            SectionType::WireInstructions => "Wire Instructions",
            SectionType::EstimatedDisbursementStatement => "Estimated Disbursement Statement",
            SectionType::StatementOfAntiCoercionFlorida => "Statement of Anti Coercion Florida",
            SectionType::CorrectionAgreementAndLimitedPowerOfAttorney => {
                "Correction Agreement and Limited Power of Attorney"
            }
            SectionType::FloodHazardDetermination => "Flood Hazard Determination",
            SectionType::AllPurposeAcknowledgment => "All Purpose Acknowledgment",
            SectionType::AutomaticPaymentsAuthorization => "Automatic Payments Authorization",
            SectionType::TaxRecordInformation => "Tax Record Information",
        }
    }

    /// Default priority, 5 (lowest) to 10 (highest).
    pub fn default_priority(self) -> u8 {
        match self {
            SectionType::Mortgage | SectionType::PromissoryNote => 10,
            SectionType::SecurityInstrument
            | SectionType::SettlementStatement
            | SectionType::LendersClosingInstructionsGuaranty => 9,
            SectionType::SignedClosingInstructions
            | SectionType::Deed
            | SectionType::FundingRequest
            | SectionType::WireInstructions
            | SectionType::EstimatedDisbursementStatement => 8,
            SectionType::StatementOfAntiCoercionFlorida
            | SectionType::CorrectionAgreementAndLimitedPowerOfAttorney
            | SectionType::FloodHazardDetermination => 7,
            SectionType::AllPurposeAcknowledgment | SectionType::AutomaticPaymentsAuthorization => 6,
            SectionType::TaxRecordInformation => 5,
        }
    }

    fn pattern_table(self) -> &'static PatternTable {
        match self {
            SectionType::Mortgage => &patterns::MORTGAGE,
            SectionType::PromissoryNote => &patterns::PROMISSORY_NOTE,
            SectionType::SecurityInstrument => &patterns::SECURITY_INSTRUMENT,
            SectionType::SettlementStatement => &patterns::SETTLEMENT_STATEMENT,
            SectionType::LendersClosingInstructionsGuaranty => &patterns::LENDERS_CLOSING_INSTRUCTIONS,
            SectionType::SignedClosingInstructions => &patterns::SIGNED_CLOSING_INSTRUCTIONS,
            SectionType::Deed => &patterns::DEED,
            SectionType::FundingRequest => &patterns::FUNDING_REQUEST,
            SectionType::WireInstructions => &patterns::WIRE_INSTRUCTIONS,
            SectionType::EstimatedDisbursementStatement => &patterns::ESTIMATED_DISBURSEMENT_STATEMENT,
            SectionType::StatementOfAntiCoercionFlorida => &patterns::ANTI_COERCION,
            SectionType::CorrectionAgreementAndLimitedPowerOfAttorney => &patterns::CORRECTION_AGREEMENT,
            SectionType::FloodHazardDetermination => &patterns::FLOOD_HAZARD,
            SectionType::AllPurposeAcknowledgment => &patterns::ACKNOWLEDGMENT,
            SectionType::AutomaticPaymentsAuthorization => &patterns::AUTOMATIC_PAYMENTS,
            SectionType::TaxRecordInformation => &patterns::TAX_RECORD,
        }
    }

    /// The built-in matching profile for this type.
    pub fn default_profile(self) -> SectionProfile {
        let table = self.pattern_table();
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        SectionProfile {
            priority: self.default_priority(),
            patterns: owned(table.patterns),
            corroborating: owned(table.corroborating),
            negating: owned(table.negating),
        }
    }

    /// Suggested filename when the package is split per section,
    /// e.g. `PROMISSORYNOTE.pdf`.
    pub fn split_filename(self) -> String {
        let stem = self
            .name()
            .to_uppercase()
            .replace([' ', ','], "")
            .replace('&', "AND");
        format!("{}.pdf", stem)
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Matching profile for one section type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProfile {
    /// 5 (lowest) to 10 (highest)
    pub priority: u8,
    /// Title/header regexes; any hit makes the page a candidate
    pub patterns: Vec<String>,
    /// Supporting phrases, each distinct one raises confidence
    #[serde(default)]
    pub corroborating: Vec<String>,
    /// Phrases marking the page as a cross-reference rather than the section itself
    #[serde(default)]
    pub negating: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_sixteen_distinct_types() {
        let unique: HashSet<_> = SectionType::ALL.iter().collect();
        assert_eq!(unique.len(), 16);
        let names: HashSet<_> = SectionType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn test_priorities_within_range() {
        for ty in SectionType::ALL {
            let p = ty.default_priority();
            assert!((5..=10).contains(&p), "{} has priority {}", ty, p);
        }
        assert_eq!(SectionType::Mortgage.default_priority(), 10);
        assert_eq!(SectionType::TaxRecordInformation.default_priority(), 5);
    }

    #[test]
    fn test_split_filename() {
        assert_eq!(SectionType::Mortgage.split_filename(), "MORTGAGE.pdf");
        assert_eq!(SectionType::PromissoryNote.split_filename(), "PROMISSORYNOTE.pdf");
        assert_eq!(
            SectionType::CorrectionAgreementAndLimitedPowerOfAttorney.split_filename(),
            "CORRECTIONAGREEMENTANDLIMITEDPOWEROFATTORNEY.pdf"
        );
    }

    #[test]
    fn test_section_type_serializes_snake_case() {
        let json = serde_json::to_string(&SectionType::PromissoryNote).unwrap();
        assert_eq!(json, "\"promissory_note\"");
        let back: SectionType = serde_json::from_str("\"tax_record_information\"").unwrap();
        assert_eq!(back, SectionType::TaxRecordInformation);
    }
}
