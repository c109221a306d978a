//! In-memory campaign store
//!
//! Holds one snapshot of campaigns, entities and relations and turns it into
//! search candidates. Relations are indexed both ways so neighbor lookups
//! never scan the whole relation list.

use super::error::CampaignError;
use super::types::{Campaign, CampaignSnapshot, Entity, EntityType, Relation};
use crate::search::normalize::normalize_opt;
use crate::search::{Candidate, Neighbor, RelationGraph};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct CampaignStore {
    campaigns: Vec<Campaign>,
    entities: Vec<Entity>,
    relations: Vec<Relation>,
    /// entity id -> index into `entities`
    entity_index: HashMap<i64, usize>,
    /// entity id -> indices into `relations` where it is the source
    outgoing: HashMap<i64, Vec<usize>>,
    /// entity id -> indices into `relations` where it is the target
    incoming: HashMap<i64, Vec<usize>>,
}

impl CampaignStore {
    /// Read and validate a JSON snapshot from disk
    pub fn load(path: &Path) -> Result<Self, CampaignError> {
        let data = fs::read_to_string(path).map_err(|source| CampaignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: CampaignSnapshot = serde_json::from_str(&data)?;
        let store = Self::from_snapshot(snapshot)?;

        info!(
            "Loaded campaign data from {}: {} campaigns, {} entities, {} relations",
            path.display(),
            store.campaigns.len(),
            store.entities.len(),
            store.relations.len()
        );

        Ok(store)
    }

    /// Validate and index a snapshot
    pub fn from_snapshot(snapshot: CampaignSnapshot) -> Result<Self, CampaignError> {
        let CampaignSnapshot {
            campaigns,
            entities,
            relations,
        } = snapshot;

        let mut campaign_ids = HashSet::new();
        for campaign in &campaigns {
            if !campaign_ids.insert(campaign.id) {
                return Err(CampaignError::DuplicateCampaign(campaign.id));
            }
        }

        let mut entity_index = HashMap::with_capacity(entities.len());
        for (idx, entity) in entities.iter().enumerate() {
            if !campaign_ids.contains(&entity.campaign_id) {
                return Err(CampaignError::UnknownCampaign {
                    entity_id: entity.id,
                    campaign_id: entity.campaign_id,
                });
            }
            if entity_index.insert(entity.id, idx).is_some() {
                return Err(CampaignError::DuplicateEntity(entity.id));
            }
        }

        let mut outgoing: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut incoming: HashMap<i64, Vec<usize>> = HashMap::new();
        for (idx, relation) in relations.iter().enumerate() {
            let (from, to) = (relation.from_entity_id, relation.to_entity_id);
            let (Some(&from_idx), Some(&to_idx)) = (entity_index.get(&from), entity_index.get(&to))
            else {
                return Err(CampaignError::DanglingRelation { from, to });
            };
            if entities[from_idx].campaign_id != entities[to_idx].campaign_id {
                return Err(CampaignError::CrossCampaignRelation { from, to });
            }
            if from == to {
                warn!("Skipping relation of entity {} to itself", from);
                continue;
            }
            outgoing.entry(from).or_default().push(idx);
            incoming.entry(to).or_default().push(idx);
        }

        Ok(Self {
            campaigns,
            entities,
            relations,
            entity_index,
            outgoing,
            incoming,
        })
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn campaign(&self, id: i64) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn entity(&self, id: i64) -> Option<&Entity> {
        self.entity_index.get(&id).map(|&idx| &self.entities[idx])
    }

    /// Live entities of a campaign in storage order
    fn live_entities(&self, campaign_id: i64) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.campaign_id == campaign_id && !e.is_deleted())
    }

    /// Every live entity of the campaign, in storage order, with linked names
    pub fn candidates(&self, campaign_id: i64) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = self
            .live_entities(campaign_id)
            .map(|entity| self.to_candidate(entity))
            .collect();
        debug!(
            "Built {} candidates for campaign {}",
            candidates.len(),
            campaign_id
        );
        candidates
    }

    /// One type's candidates in listing order: Lore newest first, everything else by name
    pub fn candidates_of_type(&self, campaign_id: i64, entity_type: EntityType) -> Vec<Candidate> {
        let mut entities: Vec<&Entity> = self
            .live_entities(campaign_id)
            .filter(|e| e.entity_type == entity_type)
            .collect();

        match entity_type {
            EntityType::Lore => entities.sort_by_key(|e| (Reverse(e.created_at), e.id)),
            _ => entities.sort_by_cached_key(|e| (normalize_opt(e.name.as_deref()), e.id)),
        }

        entities.into_iter().map(|e| self.to_candidate(e)).collect()
    }

    /// Live candidates of every other type, in storage order
    pub fn candidates_excluding_type(
        &self,
        campaign_id: i64,
        entity_type: EntityType,
    ) -> Vec<Candidate> {
        self.live_entities(campaign_id)
            .filter(|e| e.entity_type != entity_type)
            .map(|e| self.to_candidate(e))
            .collect()
    }

    fn to_candidate(&self, entity: &Entity) -> Candidate {
        let mut seen = HashSet::new();
        let linked_entities = self
            .neighbors(entity.id)
            .into_iter()
            .filter_map(|n| n.name)
            .filter(|name| seen.insert(name.clone()))
            .collect();

        Candidate {
            id: entity.id,
            name: entity.name.clone(),
            description: entity.description.clone(),
            entity_type: entity.entity_type,
            icon: entity.entity_type.icon(),
            color: entity.entity_type.color(),
            metadata: entity.metadata.clone(),
            linked_entities,
        }
    }
}

impl RelationGraph for CampaignStore {
    /// Outgoing relations first, then incoming, each in storage order
    fn neighbors(&self, entity_id: i64) -> Vec<Neighbor> {
        let outgoing = self
            .outgoing
            .get(&entity_id)
            .into_iter()
            .flatten()
            .map(|&idx| self.relations[idx].to_entity_id);
        let incoming = self
            .incoming
            .get(&entity_id)
            .into_iter()
            .flatten()
            .map(|&idx| self.relations[idx].from_entity_id);

        let mut seen = HashSet::new();
        outgoing
            .chain(incoming)
            .filter(|&id| id != entity_id && seen.insert(id))
            .filter_map(|id| self.entity(id))
            .filter(|e| !e.is_deleted())
            .map(|e| Neighbor {
                id: e.id,
                name: e.name.clone(),
                entity_type: e.entity_type,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    fn entity(id: i64, campaign_id: i64, entity_type: EntityType, name: &str) -> Entity {
        Entity {
            id,
            campaign_id,
            entity_type,
            name: Some(name.to_string()),
            description: None,
            metadata: None,
            created_at: None,
            deleted_at: None,
        }
    }

    fn relation(from: i64, to: i64) -> Relation {
        Relation {
            from_entity_id: from,
            to_entity_id: to,
            relation_type: None,
            notes: None,
        }
    }

    fn campaign(id: i64) -> Campaign {
        Campaign {
            id,
            name: format!("Campaign {}", id),
        }
    }

    fn sample_store() -> CampaignStore {
        let mut deleted = entity(5, 1, EntityType::Npc, "Ghost");
        deleted.deleted_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let mut older_lore = entity(3, 1, EntityType::Lore, "Sunken Temple");
        older_lore.created_at = Some(Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap());
        let mut newer_lore = entity(4, 1, EntityType::Lore, "Age of Ash");
        newer_lore.created_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        CampaignStore::from_snapshot(CampaignSnapshot {
            campaigns: vec![campaign(1), campaign(2)],
            entities: vec![
                entity(1, 1, EntityType::Player, "Elara"),
                entity(2, 1, EntityType::Npc, "Captain Vex"),
                older_lore,
                newer_lore,
                deleted,
                entity(6, 2, EntityType::Npc, "Stranger"),
            ],
            relations: vec![relation(3, 1), relation(1, 2), relation(2, 1), relation(5, 1)],
        })
        .unwrap()
    }

    #[test]
    fn test_neighbors_both_directions() {
        let store = sample_store();
        let ids: Vec<i64> = store.neighbors(1).iter().map(|n| n.id).collect();
        // outgoing (1 -> 2) first, then incoming (3 -> 1); 2 -> 1 deduplicated; deleted 5 skipped
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_candidates_scope_and_links() {
        let store = sample_store();
        let candidates = store.candidates(1);
        let ids: Vec<i64> = candidates.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let elara = &candidates[0];
        assert_eq!(elara.linked_entities, vec!["Captain Vex", "Sunken Temple"]);
        assert_eq!(elara.icon, EntityType::Player.icon());

        assert_eq!(store.candidates(2).len(), 1);
        assert!(store.candidates(99).is_empty());
    }

    #[test]
    fn test_lore_listing_newest_first() {
        let store = sample_store();
        let lore = store.candidates_of_type(1, EntityType::Lore);
        let names: Vec<&str> = lore.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, vec!["Age of Ash", "Sunken Temple"]);
    }

    #[test]
    fn test_listing_by_name() {
        let store = CampaignStore::from_snapshot(CampaignSnapshot {
            campaigns: vec![campaign(1)],
            entities: vec![
                entity(1, 1, EntityType::Npc, "zed"),
                entity(2, 1, EntityType::Npc, "Émile"),
                entity(3, 1, EntityType::Npc, "Brannock"),
            ],
            relations: vec![],
        })
        .unwrap();
        let names: Vec<String> = store
            .candidates_of_type(1, EntityType::Npc)
            .into_iter()
            .map(|c| c.display_name().to_string())
            .collect();
        assert_eq!(names, vec!["Brannock", "Émile", "zed"]);
    }

    #[test]
    fn test_excluding_type() {
        let store = sample_store();
        let others = store.candidates_excluding_type(1, EntityType::Lore);
        assert!(others.iter().all(|c| c.entity_type != EntityType::Lore));
        assert_eq!(others.len(), 2);
    }

    #[test]
    fn test_validation_errors() {
        let duplicate = CampaignStore::from_snapshot(CampaignSnapshot {
            campaigns: vec![campaign(1)],
            entities: vec![
                entity(1, 1, EntityType::Npc, "A"),
                entity(1, 1, EntityType::Npc, "B"),
            ],
            relations: vec![],
        });
        assert!(matches!(duplicate, Err(CampaignError::DuplicateEntity(1))));

        let unknown_campaign = CampaignStore::from_snapshot(CampaignSnapshot {
            campaigns: vec![campaign(1)],
            entities: vec![entity(1, 7, EntityType::Npc, "A")],
            relations: vec![],
        });
        assert!(matches!(
            unknown_campaign,
            Err(CampaignError::UnknownCampaign { campaign_id: 7, .. })
        ));

        let dangling = CampaignStore::from_snapshot(CampaignSnapshot {
            campaigns: vec![campaign(1)],
            entities: vec![entity(1, 1, EntityType::Npc, "A")],
            relations: vec![relation(1, 42)],
        });
        assert!(matches!(
            dangling,
            Err(CampaignError::DanglingRelation { from: 1, to: 42 })
        ));

        let cross = CampaignStore::from_snapshot(CampaignSnapshot {
            campaigns: vec![campaign(1), campaign(2)],
            entities: vec![
                entity(1, 1, EntityType::Npc, "A"),
                entity(2, 2, EntityType::Npc, "B"),
            ],
            relations: vec![relation(1, 2)],
        });
        assert!(matches!(
            cross,
            Err(CampaignError::CrossCampaignRelation { .. })
        ));
    }

    #[test]
    fn test_self_relation_is_skipped() {
        let store = CampaignStore::from_snapshot(CampaignSnapshot {
            campaigns: vec![campaign(1)],
            entities: vec![entity(1, 1, EntityType::Npc, "Narcissus")],
            relations: vec![relation(1, 1)],
        })
        .unwrap();
        assert!(store.neighbors(1).is_empty());
        assert!(store.candidates(1)[0].linked_entities.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "campaigns": [{{"id": 1, "name": "Shattered Coast"}}],
                "entities": [
                    {{"id": 1, "campaignId": 1, "type": "player", "name": "Elara"}},
                    {{"id": 2, "campaignId": 1, "type": "lore", "name": "Sunken Temple"}}
                ],
                "relations": [{{"fromEntityId": 2, "toEntityId": 1, "relationType": "mentions"}}]
            }}"#
        )
        .unwrap();

        let store = CampaignStore::load(file.path()).unwrap();
        assert_eq!(store.campaign(1).map(|c| c.name.as_str()), Some("Shattered Coast"));
        assert_eq!(store.candidates(1)[1].linked_entities, vec!["Elara"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = CampaignStore::load(Path::new("/nonexistent/campaign.json"));
        assert!(matches!(result, Err(CampaignError::Io { .. })));
    }
}
