//! Search Engine Integration
//!
//! Global search: normalizes the query once, runs the signal cascade over
//! every candidate, then sorts best-first and truncates.

use super::candidate::{Candidate, SearchHit};
use super::distance;
use super::normalize::{char_len, normalize, normalize_opt, words};
use super::ranking::{DistanceBands, MatchScore, ScoringConfig, Signal, SIGNAL_PRIORITY_ORDER};
use tracing::debug;

/// Query after normalization, with its maximum edit distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    pub term: String,
    pub max_dist: usize,
}

impl PreparedQuery {
    /// Normalize `query` and pick its distance band; `None` when nothing is left to search for
    pub fn new(query: &str, bands: &DistanceBands) -> Option<Self> {
        let term = normalize(query);
        if term.is_empty() {
            return None;
        }
        let max_dist = bands.max_distance(char_len(&term));
        Some(Self { term, max_dist })
    }
}

/// Normalized text of one candidate, computed once per search
struct CandidateText {
    name: String,
    description: String,
    linked: Vec<String>,
    linked_joined: String,
}

impl CandidateText {
    fn new(candidate: &Candidate) -> Self {
        let linked: Vec<String> = candidate
            .linked_entities
            .iter()
            .map(|name| normalize(name))
            .filter(|name| !name.is_empty())
            .collect();
        let linked_joined = linked.join(",");

        Self {
            name: normalize_opt(candidate.name.as_deref()),
            description: normalize_opt(candidate.description.as_deref()),
            linked,
            linked_joined,
        }
    }
}

/// Global search over a campaign's candidates
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: ScoringConfig,
}

impl SearchEngine {
    /// Create a new search engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create search engine with custom constants
    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn prepare(&self, query: &str) -> Option<PreparedQuery> {
        PreparedQuery::new(query, &self.config.global_bands)
    }

    /// Search candidates with a query string
    ///
    /// Returns at most `result_cap` hits, best first. Equal scores keep the
    /// order the candidates were given in.
    pub fn search(&self, query: &str, candidates: &[Candidate]) -> Vec<SearchHit> {
        let Some(prepared) = self.prepare(query) else {
            return Vec::new();
        };

        let mut scored: Vec<(MatchScore, &Candidate)> = candidates
            .iter()
            .filter_map(|candidate| {
                self.score_prepared(&prepared, candidate)
                    .map(|score| (score, candidate))
            })
            .collect();

        let matched = scored.len();
        scored.sort_by_key(|(score, _)| score.score);
        scored.truncate(self.config.result_cap);

        debug!(
            "Search '{}' (max distance {}): {} of {} candidates matched, returning {}",
            prepared.term,
            prepared.max_dist,
            matched,
            candidates.len(),
            scored.len()
        );

        scored
            .into_iter()
            .map(|(_, candidate)| SearchHit {
                candidate: candidate.clone(),
                linked_entities: display_linked_names(
                    &candidate.linked_entities,
                    self.config.linked_display_cap,
                ),
            })
            .collect()
    }

    /// Score a single candidate; `None` when no signal matches
    pub fn score_candidate(&self, query: &str, candidate: &Candidate) -> Option<MatchScore> {
        let prepared = self.prepare(query)?;
        self.score_prepared(&prepared, candidate)
    }

    fn score_prepared(&self, prepared: &PreparedQuery, candidate: &Candidate) -> Option<MatchScore> {
        let text = CandidateText::new(candidate);

        SIGNAL_PRIORITY_ORDER.iter().find_map(|&signal| {
            self.evaluate(signal, prepared, &text)
                .map(|distance| MatchScore::calculate(signal, distance, &self.config))
        })
    }

    /// Distance at which `signal` matches (zero for substring signals)
    fn evaluate(&self, signal: Signal, prepared: &PreparedQuery, text: &CandidateText) -> Option<usize> {
        let term = prepared.term.as_str();
        let max = prepared.max_dist;
        let min_len = self.config.min_word_len;

        match signal {
            Signal::Exact => (text.name == term).then_some(0),
            Signal::NameSubstring => text.name.contains(term).then_some(0),
            Signal::LinkedSubstring => text.linked_joined.contains(term).then_some(0),
            Signal::DescriptionSubstring => text.description.contains(term).then_some(0),
            Signal::NameFuzzy => {
                if text.name.is_empty() {
                    return None;
                }
                distance::within(term, &text.name, max)
            }
            Signal::NameWordFuzzy => best_word_distance(words(&text.name), term, max, min_len),
            Signal::DescriptionWordFuzzy => {
                best_word_distance(words(&text.description), term, max, min_len)
            }
            Signal::LinkedWordFuzzy => best_word_distance(
                text.linked.iter().flat_map(|name| words(name)),
                term,
                max,
                1,
            ),
        }
    }
}

/// Smallest distance from `term` to any word of at least `min_len` characters
pub(crate) fn best_word_distance<'a>(
    candidates: impl Iterator<Item = &'a str>,
    term: &str,
    max: usize,
    min_len: usize,
) -> Option<usize> {
    candidates
        .filter(|word| char_len(word) >= min_len)
        .filter_map(|word| distance::within(term, word, max))
        .min()
}

/// Linked names as shown on a hit: trimmed, non-empty, deduplicated
/// ignoring case and accents, at most `cap` of them
pub fn display_linked_names(names: &[String], cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(normalize(name)))
        .take(cap)
        .map(str::to_string)
        .collect()
}
