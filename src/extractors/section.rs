// src/extractors/section.rs

// --- Imports ---
use crate::catalog::SectionType;
use crate::config::{CollapsePolicy, IdentifierConfig};
use crate::extractors::scoring::CompiledProfile;
use crate::models::{AnalysisResult, PageText, SectionMatch};
use crate::utils::error::{ConfigError, IdentifyError};
use std::cmp::Reverse;
use std::collections::HashSet;

// --- Main Identifier Structure ---
/// Scans per-page text for the catalog's section types.
///
/// Built once from an [`IdentifierConfig`]; holds no mutable state, so one
/// instance can serve concurrent analyses behind an `Arc`.
#[derive(Debug)]
pub struct SectionIdentifier {
    profiles: Vec<CompiledProfile>, // Catalog order
    config: IdentifierConfig,
}

impl SectionIdentifier {
    /// Compiles every section profile of the configuration.
    pub fn new(config: IdentifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let profiles = SectionType::ALL
            .iter()
            .map(|&section_type| CompiledProfile::compile(section_type, &config.profile(section_type)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Compiled {} section profiles (min confidence {}, collapse {:?})",
            profiles.len(),
            config.min_confidence,
            config.collapse
        );
        Ok(Self { profiles, config })
    }

    /// Identifies sections in an ordered sequence of pages.
    ///
    /// Fails only on malformed input; a document with no recognizable
    /// section yields an empty result.
    pub fn identify(&self, pages: &[PageText]) -> Result<AnalysisResult, IdentifyError> {
        validate_pages(pages)?;
        tracing::info!("Identifying sections across {} pages", pages.len());

        // 1. Score every (page, type) pair, dropping those under the threshold
        let mut matches: Vec<SectionMatch> = pages.iter().flat_map(|page| self.scan_page(page)).collect();
        tracing::debug!("{} page-level matches above threshold", matches.len());

        // 2. Merge multi-page runs
        if self.config.collapse == CollapsePolicy::Adjacent {
            matches = collapse_adjacent(matches);
        }

        // 3. Rank
        rank(&mut matches);

        // 4. Optionally surface only the best occurrence of each type
        if self.config.best_per_type {
            let mut seen = HashSet::new();
            matches.retain(|m| seen.insert(m.section_type));
        }

        tracing::info!("Identified {} sections", matches.len());
        Ok(AnalysisResult {
            matches,
            pages_scanned: pages.len(),
        })
    }

    fn scan_page(&self, page: &PageText) -> Vec<SectionMatch> {
        if page.text.trim().is_empty() {
            tracing::debug!("Page {} has no text, skipping", page.page_number);
            return Vec::new();
        }

        let mut found = Vec::new();
        for profile in &self.profiles {
            let Some(score) = profile.score_page(&page.text, &self.config.weights) else {
                continue;
            };

            if score.confidence < self.config.min_confidence {
                tracing::debug!(
                    "Page {}: {} scored {} (below {}), dropped",
                    page.page_number,
                    profile.section_type,
                    score.confidence,
                    self.config.min_confidence
                );
                continue;
            }

            tracing::debug!(
                "Page {}: {} confidence {} ({} hits, matched '{}')",
                page.page_number,
                profile.section_type,
                score.confidence,
                score.hits,
                score.matched_text
            );
            found.push(SectionMatch {
                section_type: profile.section_type,
                priority: profile.priority,
                page_number: page.page_number,
                end_page: page.page_number,
                confidence: score.confidence,
                matched_text: score.matched_text,
                context: score.context,
            });
        }
        found
    }

    /// Byte ranges of every primary pattern hit on a page, for debug highlighting.
    pub fn highlights(&self, text: &str) -> Vec<(usize, usize, SectionType)> {
        self.profiles
            .iter()
            .flat_map(|profile| {
                profile
                    .find_hits(text)
                    .into_iter()
                    .map(move |(start, end)| (start, end, profile.section_type))
            })
            .collect()
    }
}

/// Rejects empty sequences, page 0 and non-increasing page numbers.
fn validate_pages(pages: &[PageText]) -> Result<(), IdentifyError> {
    if pages.is_empty() {
        return Err(IdentifyError::InvalidInput("no pages supplied".to_string()));
    }

    let mut previous: Option<u32> = None;
    for (idx, page) in pages.iter().enumerate() {
        if page.page_number == 0 {
            return Err(IdentifyError::InvalidInput(format!(
                "page numbers are 1-based, got 0 at position {}",
                idx
            )));
        }
        if let Some(prev) = previous {
            if page.page_number <= prev {
                return Err(IdentifyError::InvalidInput(format!(
                    "page {} follows page {}; pages must be in increasing order without duplicates",
                    page.page_number, prev
                )));
            }
        }
        previous = Some(page.page_number);
    }
    Ok(())
}

/// Merges matches of one type on consecutive pages into a single match
/// anchored at the first page, carrying the run's highest confidence.
fn collapse_adjacent(mut matches: Vec<SectionMatch>) -> Vec<SectionMatch> {
    matches.sort_by_key(|m| (m.section_type, m.page_number));

    let mut collapsed: Vec<SectionMatch> = Vec::with_capacity(matches.len());
    for m in matches {
        match collapsed.last_mut() {
            Some(run) if run.section_type == m.section_type && run.end_page + 1 == m.page_number => {
                tracing::trace!("Extending {} run from page {} to {}", run.section_type, run.page_number, m.page_number);
                run.end_page = m.page_number;
                run.confidence = run.confidence.max(m.confidence);
            }
            _ => collapsed.push(m),
        }
    }
    collapsed
}

/// Priority desc, confidence desc, page asc, then catalog order.
fn rank(matches: &mut [SectionMatch]) {
    matches.sort_by_key(|m| (Reverse(m.priority), Reverse(m.confidence), m.page_number, m.section_type));
}
