///! Catalog loading and validation
///!
///! Reads the creature catalog exported by the storage layer (a JSON array of
///! creature definitions) and checks it before it is handed to the engine.

use finder_common::CreatureDefinition;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate creature id '{0}' in catalog")]
    DuplicateId(String),
}

/// Immutable, validated creature catalog in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    creatures: Vec<CreatureDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// Entries with an empty month set or window list are kept but logged;
    /// the matcher never selects them.
    pub fn from_creatures(creatures: Vec<CreatureDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(creatures.len());

        for (position, creature) in creatures.iter().enumerate() {
            if index.insert(creature.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(creature.id.clone()));
            }

            let degenerate = creature
                .north
                .iter()
                .chain(creature.south.iter())
                .filter(|season| season.is_degenerate())
                .count();
            if degenerate > 0 {
                warn!(
                    "Creature '{}' has {} seasonal window(s) with no months or no hours; they will never match",
                    creature.id, degenerate
                );
            }
        }

        Ok(Self { creatures, index })
    }

    pub fn creatures(&self) -> &[CreatureDefinition] {
        &self.creatures
    }

    pub fn get(&self, id: &str) -> Option<&CreatureDefinition> {
        self.index.get(id).map(|&i| &self.creatures[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}

pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let creatures: Vec<CreatureDefinition> = serde_json::from_str(json)?;
    debug!("Parsed {} catalog entries", creatures.len());
    Catalog::from_creatures(creatures)
}

pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let catalog = parse_catalog(&content)?;
    info!("Loaded {} creatures from {:?}", catalog.len(), path);
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_FISH: &str = r#"[
        {
            "fish_id": "4-dace",
            "name": "Dace",
            "sell_price": 240,
            "shadow_size": "Medium",
            "location": "River",
            "north_availability": [{"months": [1,2,3,4,5,6,7,8,9,10,11,12], "time_ranges": [{"start": "16:00", "end": "09:00"}]}],
            "south_availability": [{"months": [1,2,3,4,5,6,7,8,9,10,11,12], "time_ranges": [{"start": "16:00", "end": "09:00"}]}]
        },
        {
            "fish_id": "2-pale-chub",
            "name": "Pale Chub",
            "sell_price": 200,
            "shadow_size": "Tiny",
            "location": "River",
            "north_availability": [{"months": [1,2,3,4,5,6,7,8,9,10,11,12], "time_ranges": [{"start": "09:00", "end": "16:00"}]}],
            "south_availability": []
        }
    ]"#;

    #[test]
    fn test_parse_keeps_file_order() {
        let catalog = parse_catalog(TWO_FISH).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.creatures()[0].id, "4-dace");
        assert_eq!(catalog.creatures()[1].id, "2-pale-chub");
        assert_eq!(catalog.get("2-pale-chub").unwrap().display.name, "Pale Chub");
        assert!(catalog.contains("4-dace"));
        assert!(!catalog.contains("5-carp"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"fish_id": "a", "name": "A"}, {"fish_id": "a", "name": "Again"}]"#;
        match parse_catalog(json) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_entries_are_kept() {
        let json = r#"[{"fish_id": "a", "name": "A",
            "north_availability": [{"months": [], "time_ranges": [{"start": "00:00", "end": "23:59"}]}]}]"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_bad_month_is_a_parse_error() {
        let json = r#"[{"fish_id": "a", "name": "A",
            "north_availability": [{"months": [13], "time_ranges": [{"start": "00:00", "end": "23:59"}]}]}]"#;
        assert!(matches!(parse_catalog(json), Err(CatalogError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fish.json");
        std::fs::write(&path, TWO_FISH).unwrap();

        let catalog = load_catalog(&path).await.unwrap();
        assert_eq!(catalog.len(), 2);

        let missing = load_catalog(&temp_dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(CatalogError::Io { .. })));
    }

    #[tokio::test]
    async fn test_bundled_sample_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/fish.json");
        let catalog = load_catalog(&path).await.unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains("1-bitterling"));
    }
}
