//! Static content tables: weapons, enemy archetypes, maps and game modes
//!
//! All tables are process-wide and immutable. Lookups hand out `&'static`
//! references so simulation code never copies and mutates a definition.

pub mod enemies;
pub mod maps;
pub mod modes;
pub mod weapons;

pub use enemies::{archetype, EnemyArchetype, EnemyBehavior, ARCHETYPES};
pub use maps::{map, MapDefinition, MapObject, MapObjectKind, MAPS};
pub use modes::{mode, Difficulty, GameMode, MODES};
pub use weapons::{weapon, Weapon, WeaponKind, WeaponStatBlock, WEAPONS};

/// Map used when a requested map id is unknown
pub const FALLBACK_MAP_ID: &str = "training";
/// Mode used when a requested mode id is unknown
pub const FALLBACK_MODE_ID: &str = "deathmatch";
/// Archetype spawned by match start and respawns
pub const DEFAULT_ENEMY_ID: &str = "basic";

/// Content lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("Unknown map: {0}")]
    UnknownMap(String),

    #[error("Unknown game mode: {0}")]
    UnknownMode(String),

    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),

    #[error("Unknown enemy archetype: {0}")]
    UnknownArchetype(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_ids_are_unique() {
        let weapon_ids: HashSet<_> = WEAPONS.iter().map(|w| w.id).collect();
        assert_eq!(weapon_ids.len(), WEAPONS.len());

        let enemy_ids: HashSet<_> = ARCHETYPES.iter().map(|a| a.id).collect();
        assert_eq!(enemy_ids.len(), ARCHETYPES.len());

        let map_ids: HashSet<_> = MAPS.iter().map(|m| m.id).collect();
        assert_eq!(map_ids.len(), MAPS.len());

        let mode_ids: HashSet<_> = MODES.iter().map(|m| m.id).collect();
        assert_eq!(mode_ids.len(), MODES.len());
    }

    #[test]
    fn fallbacks_resolve() {
        assert!(map(FALLBACK_MAP_ID).is_ok());
        assert!(mode(FALLBACK_MODE_ID).is_ok());
        assert!(archetype(DEFAULT_ENEMY_ID).is_ok());
    }

    #[test]
    fn unknown_ids_report_the_id() {
        assert_eq!(
            weapon("railgun").unwrap_err(),
            ContentError::UnknownWeapon("railgun".to_string())
        );
        assert_eq!(
            map("moonbase").unwrap_err().to_string(),
            "Unknown map: moonbase"
        );
    }
}
