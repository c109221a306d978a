//! Fuzzy entity search
//!
//! Normalizer, Levenshtein matcher, the global relevance-scored search and
//! the entity-type-scoped listing filter with cross-entity expansion.

pub mod candidate;
pub mod distance;
pub mod engine;
pub mod graph;
pub mod normalize;
pub mod ranking;
pub mod scoped;


pub use candidate::{Candidate, SearchHit};
pub use engine::{display_linked_names, PreparedQuery, SearchEngine};
pub use graph::{Neighbor, RelationGraph};
pub use ranking::{
    DistanceBands, FuzzyDelta, MatchScore, Score, ScoringConfig, Signal, SignalDeltas,
    SIGNAL_PRIORITY_ORDER,
};
pub use scoped::{FieldPolicy, ScopedSearch};
