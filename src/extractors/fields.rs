// src/extractors/fields.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// --- Constants ---
const MIN_LOAN_AMOUNT: f64 = 1_000.0;
const MAX_LOAN_AMOUNT: f64 = 10_000_000.0;
const MAX_FIELD_CHARS: usize = 100;
const MAX_DATES: usize = 5;

// --- Regex Patterns (Lazy Static) ---
static LOAN_AMOUNT_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\$([\d,]+(?:\.\d+)?)",
        r"(?i)amount[:\s]+\$?([\d,]+(?:\.\d+)?)",
        r"(?i)loan[:\s]+\$?([\d,]+(?:\.\d+)?)",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static BORROWER_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)borrower[:\s]+([A-Za-z][A-Za-z ]*)",
        r"(?i)applicant[:\s]+([A-Za-z][A-Za-z ]*)",
        r"(?i)mortgagor[:\s]+([A-Za-z][A-Za-z ]*)",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static ADDRESS_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)property(?:\s+address)?[:\s]+([^\n\r]+)",
        r"(?i)address[:\s]+([^\n\r]+)",
        r"(?i)located at[:\s]+([^\n\r]+)",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static LENDER_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)lender[:\s]+([^\n\r]+)",
        r"(?i)bank[:\s]+([^\n\r]+)",
        r"(?i)mortgage company[:\s]+([^\n\r]+)",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b\d{1,2}\s+(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{2,4}\b|\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{2,4}\b",
    )
    .expect("Failed to compile DATE_RE")
});

static HAS_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("Failed to compile HAS_DIGIT_RE"));

// --- Data Structures ---
/// Loan-level fields pulled from the document text. Every field is best effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub important_dates: Vec<String>,
}

impl LoanFields {
    pub fn is_empty(&self) -> bool {
        self.loan_amount.is_none()
            && self.borrower_name.is_none()
            && self.property_address.is_none()
            && self.lender.is_none()
            && self.important_dates.is_empty()
    }
}

/// Extracts loan fields from the full document text.
pub fn extract_loan_fields(text: &str) -> LoanFields {
    let fields = LoanFields {
        loan_amount: find_loan_amount(text),
        borrower_name: find_borrower_name(text),
        property_address: find_property_address(text),
        lender: find_lender(text),
        important_dates: find_dates(text),
    };
    tracing::debug!("Extracted loan fields: {:?}", fields);
    fields
}

fn find_loan_amount(text: &str) -> Option<String> {
    for re in LOAN_AMOUNT_RE.iter() {
        for caps in re.captures_iter(text) {
            let digits = caps[1].replace(',', "");
            let Ok(value) = digits.parse::<f64>() else {
                continue;
            };
            if (MIN_LOAN_AMOUNT..=MAX_LOAN_AMOUNT).contains(&value) {
                return Some(format!("${}", &caps[1]));
            }
            tracing::trace!("Skipping implausible loan amount {}", &caps[1]);
        }
    }
    None
}

fn find_borrower_name(text: &str) -> Option<String> {
    for re in BORROWER_RE.iter() {
        for caps in re.captures_iter(text) {
            let name = caps[1].trim();
            let words: Vec<&str> = name.split_whitespace().collect();
            if (2..=4).contains(&words.len()) && words.iter().all(|w| w.chars().count() >= 2) {
                return Some(words.join(" "));
            }
        }
    }
    None
}

fn find_property_address(text: &str) -> Option<String> {
    for re in ADDRESS_RE.iter() {
        for caps in re.captures_iter(text) {
            let address = caps[1].trim();
            if HAS_DIGIT_RE.is_match(address) && address.split_whitespace().count() >= 3 {
                return Some(truncate(address));
            }
        }
    }
    None
}

fn find_lender(text: &str) -> Option<String> {
    for re in LENDER_RE.iter() {
        for caps in re.captures_iter(text) {
            let lender = caps[1].trim();
            if lender.split_whitespace().count() >= 2 {
                return Some(truncate(lender));
            }
        }
    }
    None
}

/// Distinct dates in document order, at most five.
fn find_dates(text: &str) -> Vec<String> {
    let mut dates: Vec<String> = Vec::new();
    for m in DATE_RE.find_iter(text) {
        let date = m.as_str().to_string();
        if !dates.contains(&date) {
            dates.push(date);
        }
        if dates.len() == MAX_DATES {
            break;
        }
    }
    dates
}

fn truncate(value: &str) -> String {
    value.chars().take(MAX_FIELD_CHARS).collect()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "PROMISSORY NOTE\n\
        Date: March 3, 2024\n\
        Borrower: Jane Quinn Smith\n\
        Lender: First Coastal Bank, N.A.\n\
        Property Address: 1200 Ocean Drive, Miami, FL 33139\n\
        In return for a loan of $250,000.00 I promise to pay. First payment due 04/01/2024.\n";

    #[test]
    fn test_extracts_all_fields() {
        let fields = extract_loan_fields(SAMPLE);
        assert_eq!(fields.loan_amount.as_deref(), Some("$250,000.00"));
        assert_eq!(fields.borrower_name.as_deref(), Some("Jane Quinn Smith"));
        assert_eq!(fields.lender.as_deref(), Some("First Coastal Bank, N.A."));
        assert_eq!(
            fields.property_address.as_deref(),
            Some("1200 Ocean Drive, Miami, FL 33139")
        );
        assert_eq!(fields.important_dates, vec!["March 3, 2024", "04/01/2024"]);
        assert!(!fields.is_empty());
    }

    #[test]
    fn test_implausible_amounts_skipped() {
        assert_eq!(find_loan_amount("Recording fee $35.00"), None);
        assert_eq!(
            find_loan_amount("Fee $35.00 then principal $180,500"),
            Some("$180,500".to_string())
        );
    }

    #[test]
    fn test_borrower_requires_two_to_four_words() {
        assert_eq!(find_borrower_name("Borrower: Cher"), None);
        assert_eq!(
            find_borrower_name("BORROWER John Smith\n"),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_dates_deduplicated_and_capped() {
        let text = "1/1/2024 1/1/2024 2/1/2024 3/1/2024 4/1/2024 5/1/2024 6/1/2024";
        let dates = find_dates(text);
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], "1/1/2024");
        assert_eq!(dates[1], "2/1/2024");
    }

    #[test]
    fn test_empty_text_yields_empty_fields() {
        assert!(extract_loan_fields("").is_empty());
    }
}
