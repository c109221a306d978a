//! Ranking & Scoring System
//!
//! Score constants, distance bands and the signal cascade order. A score
//! starts at the ceiling and a matching signal subtracts its bonus; lower is
//! better and nothing ever scores above the ceiling.

use serde::{Deserialize, Serialize};

/// Match signals evaluated by the global search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Normalized name equals the query
    Exact,
    /// Name contains the query
    NameSubstring,
    /// Joined linked-entity names contain the query
    LinkedSubstring,
    /// Description contains the query
    DescriptionSubstring,
    /// Whole name within edit distance
    NameFuzzy,
    /// One name word within edit distance
    NameWordFuzzy,
    /// One description word within edit distance
    DescriptionWordFuzzy,
    /// One word of a linked-entity name within edit distance
    LinkedWordFuzzy,
}

/// Order in which signals are tried; the first one that matches decides the score
pub const SIGNAL_PRIORITY_ORDER: [Signal; 8] = [
    Signal::Exact,
    Signal::NameSubstring,
    Signal::LinkedSubstring,
    Signal::DescriptionSubstring,
    Signal::NameFuzzy,
    Signal::NameWordFuzzy,
    Signal::DescriptionWordFuzzy,
    Signal::LinkedWordFuzzy,
];

/// Maximum tolerated edit distance per query-length band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceBands {
    /// Queries up to this many characters use `short`
    pub short_max_len: usize,
    /// Queries up to this many characters use `medium`
    pub medium_max_len: usize,
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl DistanceBands {
    /// Bands used by the global search
    pub const fn global() -> Self {
        Self {
            short_max_len: 3,
            medium_max_len: 6,
            short: 1,
            medium: 2,
            long: 3,
        }
    }

    /// Bands used by the per-entity-type listings
    pub const fn scoped() -> Self {
        Self {
            short_max_len: 3,
            medium_max_len: 6,
            short: 1,
            medium: 3,
            long: 4,
        }
    }

    /// Maximum distance for a query of `query_len` normalized characters
    pub fn max_distance(&self, query_len: usize) -> usize {
        if query_len <= self.short_max_len {
            self.short
        } else if query_len <= self.medium_max_len {
            self.medium
        } else {
            self.long
        }
    }
}

impl Default for DistanceBands {
    fn default() -> Self {
        Self::global()
    }
}

/// Bonus for a fuzzy signal: `base - step * distance`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyDelta {
    pub base: u32,
    pub step: u32,
}

impl FuzzyDelta {
    pub const fn new(base: u32, step: u32) -> Self {
        Self { base, step }
    }

    /// Bonus earned at `distance`; closer matches earn more
    pub fn bonus(&self, distance: usize) -> u32 {
        let distance = u32::try_from(distance).unwrap_or(u32::MAX);
        self.base.saturating_sub(self.step.saturating_mul(distance))
    }
}

/// Per-signal bonuses subtracted from the ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalDeltas {
    pub exact: u32,
    pub name_substring: u32,
    pub linked_substring: u32,
    pub description_substring: u32,
    pub name_fuzzy: FuzzyDelta,
    pub name_word_fuzzy: FuzzyDelta,
    pub description_word_fuzzy: FuzzyDelta,
    pub linked_word_fuzzy: FuzzyDelta,
}

impl Default for SignalDeltas {
    fn default() -> Self {
        Self {
            exact: 500,
            name_substring: 200,
            linked_substring: 100,
            description_substring: 50,
            name_fuzzy: FuzzyDelta::new(100, 10),
            name_word_fuzzy: FuzzyDelta::new(90, 10),
            description_word_fuzzy: FuzzyDelta::new(50, 5),
            linked_word_fuzzy: FuzzyDelta::new(80, 8),
        }
    }
}

impl SignalDeltas {
    /// Bonus for `signal`; `distance` is ignored by substring signals
    pub fn bonus(&self, signal: Signal, distance: usize) -> u32 {
        match signal {
            Signal::Exact => self.exact,
            Signal::NameSubstring => self.name_substring,
            Signal::LinkedSubstring => self.linked_substring,
            Signal::DescriptionSubstring => self.description_substring,
            Signal::NameFuzzy => self.name_fuzzy.bonus(distance),
            Signal::NameWordFuzzy => self.name_word_fuzzy.bonus(distance),
            Signal::DescriptionWordFuzzy => self.description_word_fuzzy.bonus(distance),
            Signal::LinkedWordFuzzy => self.linked_word_fuzzy.bonus(distance),
        }
    }
}

/// All tunable search constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Starting (worst) score for anything that matched
    pub ceiling: u32,
    pub deltas: SignalDeltas,
    /// Distance bands for the global search
    pub global_bands: DistanceBands,
    /// Distance bands for the per-entity-type listings
    pub scoped_bands: DistanceBands,
    /// Maximum number of global search results
    pub result_cap: usize,
    /// Maximum number of linked names attached to a global search hit
    pub linked_display_cap: usize,
    /// Shorter name and description words are skipped by word-level fuzzy matching
    pub min_word_len: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ceiling: 1000,
            deltas: SignalDeltas::default(),
            global_bands: DistanceBands::global(),
            scoped_bands: DistanceBands::scoped(),
            result_cap: 20,
            linked_display_cap: 5,
            min_word_len: 3,
        }
    }
}

/// Ordinal relevance score, lower is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Score(pub u32);

impl Score {
    pub fn from_bonus(ceiling: u32, bonus: u32) -> Self {
        Self(ceiling.saturating_sub(bonus))
    }
}

/// Signal that decided a candidate's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub signal: Signal,
    /// Edit distance for fuzzy signals, zero for substring signals
    pub distance: usize,
    pub score: Score,
}

impl MatchScore {
    pub fn calculate(signal: Signal, distance: usize, config: &ScoringConfig) -> Self {
        let bonus = config.deltas.bonus(signal, distance);
        Self {
            signal,
            distance,
            score: Score::from_bonus(config.ceiling, bonus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.ceiling, 1000);
        assert_eq!(config.result_cap, 20);
        assert_eq!(config.linked_display_cap, 5);
        assert_eq!(config.deltas.exact, 500);
    }

    #[test]
    fn test_global_bands() {
        let bands = DistanceBands::global();
        assert_eq!(bands.max_distance(0), 1);
        assert_eq!(bands.max_distance(3), 1);
        assert_eq!(bands.max_distance(4), 2);
        assert_eq!(bands.max_distance(6), 2);
        assert_eq!(bands.max_distance(7), 3);
        assert_eq!(bands.max_distance(40), 3);
    }

    #[test]
    fn test_scoped_bands_differ_from_global() {
        let scoped = DistanceBands::scoped();
        assert_eq!(scoped.max_distance(3), 1);
        assert_eq!(scoped.max_distance(5), 3);
        assert_eq!(scoped.max_distance(12), 4);
        assert_ne!(scoped, DistanceBands::global());
    }

    #[test]
    fn test_fuzzy_bonus_decreases_with_distance() {
        let delta = FuzzyDelta::new(100, 10);
        assert_eq!(delta.bonus(1), 90);
        assert_eq!(delta.bonus(3), 70);
        assert_eq!(delta.bonus(50), 0);
    }

    #[test]
    fn test_signal_scores() {
        let config = ScoringConfig::default();
        let score = |signal, distance| MatchScore::calculate(signal, distance, &config).score.0;

        assert_eq!(score(Signal::Exact, 0), 500);
        assert_eq!(score(Signal::NameSubstring, 0), 800);
        assert_eq!(score(Signal::LinkedSubstring, 0), 900);
        assert_eq!(score(Signal::DescriptionSubstring, 0), 950);
        assert_eq!(score(Signal::NameFuzzy, 1), 910);
        assert_eq!(score(Signal::NameWordFuzzy, 2), 930);
        assert_eq!(score(Signal::DescriptionWordFuzzy, 1), 955);
        assert_eq!(score(Signal::LinkedWordFuzzy, 1), 928);
    }

    #[test]
    fn test_score_never_exceeds_ceiling() {
        let mut config = ScoringConfig::default();
        config.ceiling = 10;
        let score = MatchScore::calculate(Signal::Exact, 0, &config);
        assert_eq!(score.score, Score(0));
    }

    #[test]
    fn test_priority_order_starts_with_exact() {
        assert_eq!(SIGNAL_PRIORITY_ORDER[0], Signal::Exact);
        assert_eq!(SIGNAL_PRIORITY_ORDER.len(), 8);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ScoringConfig = serde_json::from_str(r#"{"result_cap": 5}"#).unwrap();
        assert_eq!(config.result_cap, 5);
        assert_eq!(config.ceiling, 1000);
        assert_eq!(config.scoped_bands, DistanceBands::scoped());
    }
}
