// src/extractors/scoring.rs

// --- Imports ---
use crate::catalog::{SectionProfile, SectionType};
use crate::config::ScoringWeights;
use crate::utils::error::ConfigError;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

// --- Constants ---
const CONTEXT_MAX_CHARS: usize = 160;

// --- Regex Patterns (Lazy Static) ---
// A reference cue in the same sentence before a hit means the page is
// talking *about* the section ("see the Mortgage", "secured by a Deed of
// Trust"), not presenting it. `$` anchors the cue's sentence to the hit.
static REFERENCE_CUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:see|refer(?:red)?\s+to|referenced\s+in|pursuant\s+to|secured\s+by|described\s+in|defined\s+in|set\s+forth\s+in|in\s+accordance\s+with|under\s+the\s+terms\s+of|attached)\b[^.\n]*$",
    )
    .expect("Failed to compile REFERENCE_CUE_RE")
});

/// A section profile with its patterns compiled, ready to scan pages.
#[derive(Debug)]
pub struct CompiledProfile {
    pub section_type: SectionType,
    pub priority: u8,
    patterns: Vec<Regex>,
    corroborating: Vec<String>,
    negating: Vec<String>,
}

/// Best-scoring evidence for one section type on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageScore {
    pub confidence: u8,
    pub matched_text: String,
    pub context: String,
    pub hits: usize,
}

impl CompiledProfile {
    pub fn compile(section_type: SectionType, profile: &SectionProfile) -> Result<Self, ConfigError> {
        let patterns = profile
            .patterns
            .iter()
            .map(|pat| {
                RegexBuilder::new(pat)
                    .case_insensitive(true)
                    .multi_line(true)
                    .build()
                    .map_err(|e| ConfigError::InvalidPattern {
                        section: section_type.name().to_string(),
                        pattern: pat.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            section_type,
            priority: profile.priority,
            patterns,
            corroborating: profile.corroborating.iter().map(|s| s.to_lowercase()).collect(),
            negating: profile.negating.iter().map(|s| s.to_lowercase()).collect(),
        })
    }

    /// Byte ranges of every primary pattern hit, in text order, overlaps dropped.
    pub fn find_hits(&self, text: &str) -> Vec<(usize, usize)> {
        let mut hits: Vec<(usize, usize)> = self
            .patterns
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
            .filter(|(start, end)| end > start)
            .collect();
        hits.sort_unstable();

        let mut kept: Vec<(usize, usize)> = Vec::with_capacity(hits.len());
        for hit in hits {
            match kept.last() {
                Some(&(_, prev_end)) if hit.0 < prev_end => continue,
                _ => kept.push(hit),
            }
        }
        kept
    }

    /// Scores the page for this section type; `None` when no primary pattern hits.
    pub fn score_page(&self, text: &str, weights: &ScoringWeights) -> Option<PageScore> {
        let hits = self.find_hits(text);
        if hits.is_empty() {
            return None;
        }

        let lower = text.to_lowercase();
        let corroborating = self.corroborating.iter().filter(|k| lower.contains(k.as_str())).count();
        let page_negated = self.negating.iter().any(|k| lower.contains(k.as_str()));

        // Weights come from user config; saturate rather than overflow
        let corroboration_bonus = weighted(corroborating, weights.corroboration).min(i64::from(weights.max_corroboration));
        let repetition_bonus = weighted(hits.len() - 1, weights.repetition).min(i64::from(weights.max_repetition));

        let mut best: Option<(i64, (usize, usize))> = None;
        for &(start, end) in &hits {
            let mut score = i64::from(weights.base) + corroboration_bonus + repetition_bonus;

            if in_heading(text, start, weights) {
                score += i64::from(weights.heading);
            }
            if is_uppercase(&text[start..end]) {
                score += i64::from(weights.uppercase);
            }
            if page_negated || preceded_by_reference(text, start, weights.negation_window) {
                score -= i64::from(weights.negation);
            }

            tracing::trace!(
                "{} hit '{}' at {}: score {}",
                self.section_type,
                &text[start..end],
                start,
                score
            );

            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, (start, end)));
            }
        }

        let (score, (start, end)) = best?;
        Some(PageScore {
            confidence: score.clamp(0, 100) as u8,
            matched_text: text[start..end].to_string(),
            context: line_around(text, start),
            hits: hits.len(),
        })
    }
}

fn weighted(count: usize, weight: u32) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX).saturating_mul(i64::from(weight))
}

/// Is the hit on a short line within the first `heading_lines` non-blank lines?
fn in_heading(text: &str, start: usize, weights: &ScoringWeights) -> bool {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let preceding = text[..line_start].lines().filter(|l| !l.trim().is_empty()).count();
    if preceding >= weights.heading_lines {
        return false;
    }
    let line_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
    text[line_start..line_end].split_whitespace().count() <= weights.heading_max_words
}

fn is_uppercase(span: &str) -> bool {
    let mut letters = span.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

fn preceded_by_reference(text: &str, start: usize, window: usize) -> bool {
    if window == 0 {
        return false;
    }
    let mut from = start.saturating_sub(window);
    while !text.is_char_boundary(from) {
        from += 1;
    }
    REFERENCE_CUE_RE.is_match(&text[from..start])
}

fn line_around(text: &str, start: usize) -> String {
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
    text[line_start..line_end].trim().chars().take(CONTEXT_MAX_CHARS).collect()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(section_type: SectionType) -> CompiledProfile {
        CompiledProfile::compile(section_type, &section_type.default_profile()).unwrap()
    }

    #[test]
    fn test_header_scores_higher_than_cross_reference() {
        let profile = compiled(SectionType::Mortgage);
        let weights = ScoringWeights::default();

        let header = profile
            .score_page("MORTGAGE\nTHIS MORTGAGE is made this 3rd day of May.", &weights)
            .expect("header page should hit");
        let reference = profile
            .score_page("Closing checklist\nBorrower should see the Mortgage section for escrow terms.", &weights)
            .expect("reference page still hits the pattern");

        assert!(
            header.confidence > reference.confidence,
            "header {} should beat reference {}",
            header.confidence,
            reference.confidence
        );
        assert!(reference.confidence < 50, "cross-reference scored {}", reference.confidence);
        assert_eq!(header.matched_text, "MORTGAGE");
        assert_eq!(header.hits, 2);
    }

    #[test]
    fn test_negating_phrase_penalizes_page() {
        let profile = compiled(SectionType::Deed);
        let weights = ScoringWeights::default();
        let deed = profile.score_page("DEED\nRecorded in the county records.", &weights).unwrap();
        let trust = profile.score_page("DEED OF TRUST\nRecorded in the county records.", &weights).unwrap();
        assert_eq!(deed.confidence, 80);
        assert_eq!(deed.confidence - trust.confidence, weights.negation as u8);
    }

    #[test]
    fn test_heading_requires_short_line() {
        let weights = ScoringWeights::default();
        let text = "This long opening line mentions a mortgage somewhere in the middle of a very wordy paragraph";
        let start = text.find("mortgage").unwrap();
        assert!(!in_heading(text, start, &weights));
        assert!(in_heading("Cover\n\nMORTGAGE", 7, &weights));
    }

    #[test]
    fn test_heading_limited_to_leading_lines() {
        let weights = ScoringWeights::default();
        let text = "a\nb\nc\nd\ne\nMORTGAGE";
        assert!(!in_heading(text, text.find("MORTGAGE").unwrap(), &weights));
    }

    #[test]
    fn test_confidence_clamped_to_hundred() {
        let profile = compiled(SectionType::PromissoryNote);
        let weights = ScoringWeights {
            base: 90,
            ..ScoringWeights::default()
        };
        let score = profile
            .score_page("PROMISSORY NOTE\nI promise to pay the principal and interest.", &weights)
            .unwrap();
        assert_eq!(score.confidence, 100);
    }

    #[test]
    fn test_huge_weights_saturate_instead_of_overflowing() {
        let profile = compiled(SectionType::Mortgage);
        let weights = ScoringWeights {
            corroboration: 3_000_000_000,
            max_corroboration: 100,
            repetition: u32::MAX,
            max_repetition: u32::MAX,
            ..ScoringWeights::default()
        };
        let score = profile
            .score_page("MORTGAGE This Mortgage is made this day, mortgagor", &weights)
            .unwrap();
        assert_eq!(score.confidence, 100);
    }

    #[test]
    fn test_standalone_note_title_span() {
        let profile = compiled(SectionType::PromissoryNote);
        let score = profile
            .score_page(
                "Loan 123\n\nNOTE\n\nIn return for a loan that I have received, I promise to pay principal and interest.",
                &ScoringWeights::default(),
            )
            .unwrap();
        assert_eq!(score.matched_text, "NOTE");
        assert_eq!(score.context, "NOTE");
        assert_eq!(score.confidence, 100);
        assert_eq!(profile.find_hits("  ADJUSTABLE RATE NOTE  \n"), vec![(0, 24)]);
    }

    #[test]
    fn test_overlapping_hits_counted_once() {
        let profile = compiled(SectionType::CorrectionAgreementAndLimitedPowerOfAttorney);
        // Matches both the limited and the plain power of attorney pattern
        assert_eq!(profile.find_hits("LIMITED POWER OF ATTORNEY").len(), 1);
    }

    #[test]
    fn test_no_hit_returns_none() {
        let profile = compiled(SectionType::WireInstructions);
        assert!(profile.score_page("Nothing to see here.", &ScoringWeights::default()).is_none());
        assert!(profile.score_page("", &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_reference_window_respects_char_boundaries() {
        let text = "Réf. voir — see the ñ MORTGAGE";
        let start = text.find("MORTGAGE").unwrap();
        // Window start lands inside multi-byte characters for some widths
        for window in 1..30 {
            let _ = preceded_by_reference(text, start, window);
        }
        assert!(preceded_by_reference(text, start, 40));
    }
}
