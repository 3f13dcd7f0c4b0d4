// src/config.rs
//! Configuration for section identification.
//!
//! The catalog's default profiles are built in; a JSON file can tune the
//! scoring weights and threshold or replace the profile of individual
//! section types. The configuration is read once and never mutated after an
//! identifier has been built from it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{SectionProfile, SectionType};
use crate::utils::error::ConfigError;

pub const DEFAULT_MIN_CONFIDENCE: u8 = 50;

/// How matches of one type on consecutive pages are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsePolicy {
    /// Merge runs on consecutive pages into one match anchored at the first page
    Adjacent,
    /// Report every matching page separately
    None,
}

/// Weights of the confidence heuristic. Scores are summed and clamped to 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Score for any primary pattern hit (default: 40)
    pub base: u32,

    /// Bonus when the hit sits within the first `heading_lines` non-blank lines (default: 30)
    pub heading: u32,

    /// Number of leading non-blank lines treated as the page header (default: 5)
    pub heading_lines: usize,

    /// Longest line, in words, that still counts as a title for the heading bonus (default: 12)
    pub heading_max_words: usize,

    /// Bonus when the matched text is written in capitals (default: 10)
    pub uppercase: u32,

    /// Bonus per distinct corroborating phrase on the page (default: 8)
    pub corroboration: u32,

    /// Cap for the total corroboration bonus (default: 24)
    pub max_corroboration: u32,

    /// Bonus per additional primary hit on the page (default: 2)
    pub repetition: u32,

    /// Cap for the total repetition bonus (default: 10)
    pub max_repetition: u32,

    /// Penalty for a reference cue before the hit or a negating phrase on the page (default: 35)
    pub negation: u32,

    /// Characters before the hit searched for a reference cue (default: 40)
    pub negation_window: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 40,
            heading: 30,
            heading_lines: 5,
            heading_max_words: 12,
            uppercase: 10,
            corroboration: 8,
            max_corroboration: 24,
            repetition: 2,
            max_repetition: 10,
            negation: 35,
            negation_window: 40,
        }
    }
}

/// Identifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Matches scoring below this are dropped (default: 50)
    pub min_confidence: u8,

    /// Multi-page collapse behavior (default: Adjacent)
    pub collapse: CollapsePolicy,

    /// Keep only the best-ranked match of each section type (default: false)
    pub best_per_type: bool,

    pub weights: ScoringWeights,

    /// Replacement profiles keyed by section type; other types keep their defaults
    pub profile_overrides: BTreeMap<SectionType, SectionProfile>,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            collapse: CollapsePolicy::Adjacent,
            best_per_type: false,
            weights: ScoringWeights::default(),
            profile_overrides: BTreeMap::new(),
        }
    }
}

impl IdentifierConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: IdentifierConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading identifier config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The effective profile for a section type.
    pub fn profile(&self, section_type: SectionType) -> SectionProfile {
        self.profile_overrides
            .get(&section_type)
            .cloned()
            .unwrap_or_else(|| section_type.default_profile())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_confidence > 100 {
            return Err(ConfigError::InvalidValue(format!(
                "min_confidence must be within 0-100, got {}",
                self.min_confidence
            )));
        }
        for (section_type, profile) in &self.profile_overrides {
            if !(5..=10).contains(&profile.priority) {
                return Err(ConfigError::InvalidValue(format!(
                    "priority for {} must be within 5-10, got {}",
                    section_type, profile.priority
                )));
            }
            if profile.patterns.is_empty() {
                tracing::warn!("Profile override for {} has no patterns; it will never match", section_type);
            }
        }
        Ok(())
    }
}
