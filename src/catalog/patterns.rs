// src/catalog/patterns.rs
//! Default pattern tables for the mortgage section catalog.
//!
//! Primary patterns are regular expressions compiled case-insensitive and
//! multi-line, so `^`/`$` anchor to lines of the page. Corroborating and
//! negating entries are plain lowercase phrases matched with `contains`.

pub struct PatternTable {
    pub patterns: &'static [&'static str],
    pub corroborating: &'static [&'static str],
    pub negating: &'static [&'static str],
}

pub const MORTGAGE: PatternTable = PatternTable {
    patterns: &[r"\bMORTGAGE\b", r"\bDEED\s+OF\s+TRUST\b"],
    corroborating: &[
        "this mortgage",
        "this security instrument",
        "mortgagor",
        "mortgagee",
        "mortgage electronic registration",
        "transfer of rights in the property",
        "riders to this security instrument",
        "is made this",
    ],
    negating: &["satisfaction of mortgage", "release of mortgage"],
};

pub const PROMISSORY_NOTE: PatternTable = PatternTable {
    patterns: &[
        r"\bPROMISSORY\s+NOTE\b",
        r"^[ \t]*(?:ADJUSTABLE\s+RATE\s+|FIXED\s+RATE\s+|BALLOON\s+)?NOTE[ \t]*$",
    ],
    corroborating: &[
        "promise to pay",
        "note holder",
        "in return for a loan",
        "principal",
        "interest",
        "monthly payment",
        "maturity date",
    ],
    negating: &[],
};

pub const SECURITY_INSTRUMENT: PatternTable = PatternTable {
    patterns: &[r"\bSECURITY\s+INSTRUMENT\b"],
    corroborating: &[
        "this security instrument",
        "uniform covenants",
        "non-uniform covenants",
        "borrower covenants",
        "secures to lender",
    ],
    negating: &[],
};

pub const SETTLEMENT_STATEMENT: PatternTable = PatternTable {
    patterns: &[
        r"\bSETTLEMENT\s+STATEMENT\b",
        r"\bCLOSING\s+DISCLOSURE\b",
        r"\bHUD-?1\b",
    ],
    corroborating: &[
        "settlement agent",
        "settlement date",
        "borrower's transaction",
        "seller's transaction",
        "gross amount due",
        "disbursement date",
        "paid by borrower",
    ],
    negating: &["estimated disbursement statement"],
};

pub const LENDERS_CLOSING_INSTRUCTIONS: PatternTable = PatternTable {
    patterns: &[
        r"\bLENDER'?S?\s+CLOSING\s+INSTRUCTIONS\b",
        r"\bCLOSING\s+INSTRUCTIONS\b",
    ],
    corroborating: &[
        "guaranty",
        "guarantee",
        "settlement agent",
        "closing agent",
        "title insurance",
        "lender requires",
    ],
    negating: &["signed closing instructions"],
};

pub const SIGNED_CLOSING_INSTRUCTIONS: PatternTable = PatternTable {
    patterns: &[r"\bSIGNED\s+CLOSING\s+INSTRUCTIONS\b"],
    corroborating: &[
        "signature",
        "acknowledge receipt",
        "closing agent",
        "date signed",
        "settlement agent",
    ],
    negating: &[],
};

pub const DEED: PatternTable = PatternTable {
    patterns: &[r"\bDEED\b"],
    corroborating: &[
        "grantor",
        "grantee",
        "hereby grant",
        "convey",
        "warranty deed",
        "quitclaim",
        "legal description",
    ],
    negating: &["deed of trust"],
};

pub const FUNDING_REQUEST: PatternTable = PatternTable {
    patterns: &[r"\bFUNDING\s+REQUEST\b", r"\bREQUEST\s+FOR\s+FUNDING\b"],
    corroborating: &[
        "funding date",
        "loan amount",
        "wire",
        "disbursement",
        "requested by",
    ],
    negating: &[],
};

pub const WIRE_INSTRUCTIONS: PatternTable = PatternTable {
    patterns: &[r"\bWIRE\s+(?:TRANSFER\s+)?INSTRUCTIONS\b"],
    corroborating: &[
        "aba number",
        "aba routing",
        "routing number",
        "account number",
        "beneficiary",
        "bank name",
        "wire fraud",
    ],
    negating: &[],
};

pub const ESTIMATED_DISBURSEMENT_STATEMENT: PatternTable = PatternTable {
    patterns: &[r"\bESTIMATED\s+DISBURSEMENT\s+STATEMENT\b"],
    corroborating: &[
        "disbursement",
        "payoff",
        "net proceeds",
        "closing costs",
        "estimated",
    ],
    negating: &[],
};

pub const ANTI_COERCION: PatternTable = PatternTable {
    patterns: &[r"\bANTI.?COERCION\b"],
    corroborating: &[
        "florida",
        "insurance agent",
        "coerc",
        "hazard insurance",
        "homeowner's insurance",
        "free choice",
    ],
    negating: &[],
};

pub const CORRECTION_AGREEMENT: PatternTable = PatternTable {
    patterns: &[
        r"\bCORRECTION\s+AGREEMENT\b",
        r"\bLIMITED\s+POWER\s+OF\s+ATTORNEY\b",
        r"\bPOWER\s+OF\s+ATTORNEY\b",
    ],
    corroborating: &[
        "clerical error",
        "misstated",
        "re-execute",
        "attorney-in-fact",
        "to correct",
        "closing agent",
    ],
    negating: &[],
};

pub const FLOOD_HAZARD: PatternTable = PatternTable {
    patterns: &[
        r"\bFLOOD\s+HAZARD\b",
        r"\bFLOOD\s+(?:ZONE\s+)?DETERMINATION\b",
    ],
    corroborating: &[
        "fema",
        "special flood hazard area",
        "nfip",
        "community number",
        "flood zone",
        "map panel",
    ],
    negating: &[],
};

pub const ACKNOWLEDGMENT: PatternTable = PatternTable {
    patterns: &[
        r"\bALL[\s-]+PURPOSE\s+ACKNOWLEDGE?MENT\b",
        r"\bACKNOWLEDGE?MENT\b",
    ],
    corroborating: &[
        "notary public",
        "personally appeared",
        "state of",
        "county of",
        "my commission expires",
        "subscribed",
    ],
    negating: &["acknowledgment of receipt", "acknowledgement of receipt"],
};

pub const AUTOMATIC_PAYMENTS: PatternTable = PatternTable {
    patterns: &[
        r"\bAUTOMATIC\s+PAYMENTS?\b",
        r"\bACH\s+AUTHORIZATION\b",
        r"\bAUTO(?:MATIC)?[\s-]?(?:DEBIT|DRAFT)\b",
    ],
    corroborating: &[
        "routing number",
        "account number",
        "checking",
        "savings",
        "authorize",
        "monthly payment",
    ],
    negating: &[],
};

pub const TAX_RECORD: PatternTable = PatternTable {
    patterns: &[
        r"\bTAX\s+RECORDS?\b",
        r"\bTAX\s+(?:CERTIFICATE|INFORMATION)\b",
    ],
    corroborating: &[
        "parcel",
        "assessed value",
        "tax year",
        "millage",
        "property appraiser",
        "tax collector",
        "folio",
    ],
    negating: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    const ALL_TABLES: &[&PatternTable] = &[
        &MORTGAGE,
        &PROMISSORY_NOTE,
        &SECURITY_INSTRUMENT,
        &SETTLEMENT_STATEMENT,
        &LENDERS_CLOSING_INSTRUCTIONS,
        &SIGNED_CLOSING_INSTRUCTIONS,
        &DEED,
        &FUNDING_REQUEST,
        &WIRE_INSTRUCTIONS,
        &ESTIMATED_DISBURSEMENT_STATEMENT,
        &ANTI_COERCION,
        &CORRECTION_AGREEMENT,
        &FLOOD_HAZARD,
        &ACKNOWLEDGMENT,
        &AUTOMATIC_PAYMENTS,
        &TAX_RECORD,
    ];

    #[test]
    fn test_every_default_pattern_compiles() {
        for table in ALL_TABLES {
            assert!(!table.patterns.is_empty());
            for pat in table.patterns {
                assert!(
                    RegexBuilder::new(pat).case_insensitive(true).multi_line(true).build().is_ok(),
                    "pattern failed to compile: {}",
                    pat
                );
            }
        }
    }

    #[test]
    fn test_phrases_are_lowercase() {
        for table in ALL_TABLES {
            for phrase in table.corroborating.iter().chain(table.negating.iter()) {
                assert_eq!(*phrase, phrase.to_lowercase().as_str());
            }
        }
    }
}
