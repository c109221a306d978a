//! Entity-type-scoped search
//!
//! Listing filter for a single entity type. Phase 1 keeps targets that match
//! the query themselves, in storage order. Phase 2 finds other-type entities
//! whose names match and appends every target related to one of them.

use super::candidate::Candidate;
use super::distance;
use super::engine::{best_word_distance, PreparedQuery};
use super::graph::RelationGraph;
use super::normalize::{normalize, normalize_opt, words};
use super::ranking::ScoringConfig;
use crate::campaign::EntityType;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Which fields besides the name a listing filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub description: bool,
    pub metadata: bool,
}

impl FieldPolicy {
    pub fn for_type(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Player => Self {
                description: true,
                metadata: true,
            },
            EntityType::Npc
            | EntityType::Location
            | EntityType::Item
            | EntityType::Faction
            | EntityType::Lore => Self {
                description: true,
                metadata: false,
            },
        }
    }
}

/// Filter for one entity type's listing
#[derive(Debug, Clone)]
pub struct ScopedSearch {
    entity_type: EntityType,
    policy: FieldPolicy,
    config: ScoringConfig,
}

impl ScopedSearch {
    pub fn new(entity_type: EntityType) -> Self {
        Self::with_config(entity_type, ScoringConfig::default())
    }

    pub fn with_config(entity_type: EntityType, config: ScoringConfig) -> Self {
        Self {
            entity_type,
            policy: FieldPolicy::for_type(entity_type),
            config,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Run both phases
    ///
    /// `targets` are this type's candidates in listing order, `others` are
    /// the remaining candidates of the campaign. Without a query every target
    /// is returned unchanged.
    pub fn run<G: RelationGraph>(
        &self,
        query: Option<&str>,
        targets: &[Candidate],
        others: &[Candidate],
        graph: &G,
    ) -> Vec<Candidate> {
        let Some(prepared) = query.and_then(|q| PreparedQuery::new(q, &self.config.scoped_bands))
        else {
            return targets.to_vec();
        };

        let mut included: HashSet<i64> = HashSet::new();
        let mut results: Vec<Candidate> = targets
            .iter()
            .filter(|candidate| self.matches_directly(&prepared, candidate))
            .filter(|candidate| included.insert(candidate.id))
            .cloned()
            .collect();
        let direct = results.len();

        let by_id: HashMap<i64, &Candidate> = targets.iter().map(|c| (c.id, c)).collect();
        let seeds = others
            .iter()
            .filter(|candidate| candidate.entity_type != self.entity_type)
            .filter(|candidate| self.name_matches(&prepared, candidate));

        for seed in seeds {
            for neighbor in graph.neighbors(seed.id) {
                if neighbor.entity_type != self.entity_type {
                    continue;
                }
                if let Some(target) = by_id.get(&neighbor.id) {
                    if included.insert(target.id) {
                        results.push((*target).clone());
                    }
                }
            }
        }

        debug!(
            "{} listing '{}': {} direct, {} via related entities",
            self.entity_type,
            prepared.term,
            direct,
            results.len() - direct
        );

        results
    }

    /// Phase 1 predicate
    pub fn matches_directly(&self, prepared: &PreparedQuery, candidate: &Candidate) -> bool {
        if self.name_matches(prepared, candidate) {
            return true;
        }

        let term = prepared.term.as_str();
        if self.policy.description
            && normalize_opt(candidate.description.as_deref()).contains(term)
        {
            return true;
        }
        if self.policy.metadata
            && candidate
                .metadata_strings()
                .into_iter()
                .any(|value| normalize(value).contains(term))
        {
            return true;
        }

        false
    }

    /// Name substring, whole-name distance or name-word distance
    pub fn name_matches(&self, prepared: &PreparedQuery, candidate: &Candidate) -> bool {
        let name = normalize_opt(candidate.name.as_deref());
        if name.is_empty() {
            return false;
        }

        let term = prepared.term.as_str();
        name.contains(term)
            || distance::within(term, &name, prepared.max_dist).is_some()
            || best_word_distance(words(&name), term, prepared.max_dist, self.config.min_word_len)
                .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::graph::Neighbor;
    use serde_json::json;

    /// Undirected adjacency list for tests
    #[derive(Default)]
    struct TestGraph {
        nodes: HashMap<i64, (String, EntityType)>,
        edges: Vec<(i64, i64)>,
    }

    impl TestGraph {
        fn node(mut self, candidate: &Candidate) -> Self {
            self.nodes.insert(
                candidate.id,
                (candidate.display_name().to_string(), candidate.entity_type),
            );
            self
        }

        fn edge(mut self, from: i64, to: i64) -> Self {
            self.edges.push((from, to));
            self
        }
    }

    impl RelationGraph for TestGraph {
        fn neighbors(&self, entity_id: i64) -> Vec<Neighbor> {
            self.edges
                .iter()
                .filter_map(|&(a, b)| match (a == entity_id, b == entity_id) {
                    (true, _) => Some(b),
                    (_, true) => Some(a),
                    _ => None,
                })
                .filter_map(|id| {
                    self.nodes.get(&id).map(|(name, entity_type)| Neighbor {
                        id,
                        name: Some(name.clone()),
                        entity_type: *entity_type,
                    })
                })
                .collect()
        }
    }

    fn ids(results: &[Candidate]) -> Vec<i64> {
        results.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_cross_entity_expansion() {
        let elara = Candidate::new(1, "Elara", EntityType::Player);
        let temple = Candidate::new(10, "Sunken Temple", EntityType::Lore);
        let chronicle = Candidate::new(11, "Chronicle of Elara", EntityType::Lore);
        let unrelated = Candidate::new(12, "Iron Crown", EntityType::Lore);
        let graph = TestGraph::default()
            .node(&elara)
            .node(&temple)
            .edge(10, 1);

        let search = ScopedSearch::new(EntityType::Lore);
        let targets = vec![temple, chronicle, unrelated];
        let results = search.run(Some("Elara"), &targets, &[elara], &graph);

        // Direct match first, related entry appended
        assert_eq!(ids(&results), vec![11, 10]);
    }

    #[test]
    fn test_no_duplicate_when_direct_and_related() {
        let elara = Candidate::new(1, "Elara", EntityType::Player);
        let chronicle = Candidate::new(11, "Chronicle of Elara", EntityType::Lore);
        let graph = TestGraph::default()
            .node(&elara)
            .node(&chronicle)
            .edge(1, 11);

        let search = ScopedSearch::new(EntityType::Lore);
        let results = search.run(Some("elara"), &[chronicle], &[elara], &graph);

        assert_eq!(ids(&results), vec![11]);
    }

    #[test]
    fn test_expansion_ignores_other_types() {
        let elara = Candidate::new(1, "Elara", EntityType::Player);
        let tavern = Candidate::new(20, "Rusty Anchor", EntityType::Location);
        let graph = TestGraph::default().node(&elara).node(&tavern).edge(1, 20);

        let search = ScopedSearch::new(EntityType::Lore);
        let results = search.run(Some("elara"), &[], &[elara, tavern], &graph);

        assert!(results.is_empty());
    }

    #[test]
    fn test_expansion_only_reaches_listed_targets() {
        // The neighbor is a Lore entry that is not among the targets (deleted or another campaign)
        let elara = Candidate::new(1, "Elara", EntityType::Player);
        let hidden = Candidate::new(30, "Forgotten Tome", EntityType::Lore);
        let graph = TestGraph::default().node(&elara).node(&hidden).edge(1, 30);

        let search = ScopedSearch::new(EntityType::Lore);
        let results = search.run(Some("elara"), &[], &[elara], &graph);

        assert!(results.is_empty());
    }

    #[test]
    fn test_no_query_lists_everything_in_order() {
        let targets = vec![
            Candidate::new(3, "Zed", EntityType::Npc),
            Candidate::new(1, "Anna", EntityType::Npc),
        ];
        let search = ScopedSearch::new(EntityType::Npc);
        let graph = TestGraph::default();

        assert_eq!(ids(&search.run(None, &targets, &[], &graph)), vec![3, 1]);
        assert_eq!(ids(&search.run(Some("  "), &targets, &[], &graph)), vec![3, 1]);
    }

    #[test]
    fn test_direct_results_keep_storage_order() {
        let targets = vec![
            Candidate::new(1, "Goblin Scout", EntityType::Npc),
            Candidate::new(2, "Goblin", EntityType::Npc),
            Candidate::new(3, "Hobgoblin", EntityType::Npc),
        ];
        let search = ScopedSearch::new(EntityType::Npc);

        let results = search.run(Some("goblin"), &targets, &[], &TestGraph::default());

        // Not relevance ranked: the exact name does not move first
        assert_eq!(ids(&results), vec![1, 2, 3]);
    }

    #[test]
    fn test_scoped_bands_are_wider() {
        // "bramok" has six characters: scoped medium band is 3, global is 2
        let search = ScopedSearch::new(EntityType::Npc);
        let prepared = PreparedQuery::new("bramok", &ScoringConfig::default().scoped_bands).unwrap();
        assert_eq!(prepared.max_dist, 3);

        let candidate = Candidate::new(1, "Brannock", EntityType::Npc);
        // distance("bramok", "brannock") == 3: outside the global band, inside the scoped one
        assert!(search.matches_directly(&prepared, &candidate));
        let global = PreparedQuery::new("bramok", &ScoringConfig::default().global_bands).unwrap();
        assert!(!search.matches_directly(&global, &candidate));

        // distance("bramok", "delvok") == 4: one past the scoped band
        let too_far = Candidate::new(2, "Delvok", EntityType::Npc);
        assert!(!search.matches_directly(&prepared, &too_far));
    }

    #[test]
    fn test_description_policy() {
        let candidate = Candidate::new(1, "Rusty Anchor", EntityType::Location)
            .with_description("A cozy tavern by the docks");
        let search = ScopedSearch::new(EntityType::Location);
        let results = search.run(Some("tavern"), &[candidate], &[], &TestGraph::default());
        assert_eq!(ids(&results), vec![1]);
    }

    #[test]
    fn test_player_metadata_policy() {
        let player = Candidate::new(1, "Elara", EntityType::Player)
            .with_metadata(json!({"playerName": "Samira", "class": "Ranger"}));
        let npc = Candidate::new(2, "Old Tom", EntityType::Npc)
            .with_metadata(json!({"occupation": "Samira's butler"}));

        let players = ScopedSearch::new(EntityType::Player);
        let npcs = ScopedSearch::new(EntityType::Npc);
        let graph = TestGraph::default();

        assert_eq!(ids(&players.run(Some("samira"), &[player], &[], &graph)), vec![1]);
        assert!(npcs.run(Some("samira"), &[npc], &[], &graph).is_empty());
    }

    #[test]
    fn test_unnamed_target_only_matches_other_fields() {
        let search = ScopedSearch::new(EntityType::Item);
        let prepared = PreparedQuery::new("a", &ScoringConfig::default().scoped_bands).unwrap();
        let candidate = Candidate::unnamed(1, EntityType::Item);
        assert!(!search.name_matches(&prepared, &candidate));
        assert!(!search.matches_directly(&prepared, &candidate));
    }
}
