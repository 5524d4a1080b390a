//! Enemy archetype table

use serde::Serialize;

use super::ContentError;

/// Movement policy of an archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyBehavior {
    /// Never moves
    Stationary,
    /// Random walk until the player is near
    Patrol,
    /// Closes in as soon as the player is detected
    Aggressive,
    /// Engages only once the player is inside attack range
    Defensive,
}

/// Static enemy template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyArchetype {
    pub id: &'static str,
    pub name: &'static str,
    pub health: u32,
    pub damage: u32,
    /// World units per second
    pub speed: f32,
    pub attack_range: f32,
    /// Attacks per second
    pub attack_rate: f32,
    pub detection_range: f32,
    /// 0-1 scale. Not consulted by attack resolution.
    pub accuracy: f32,
    pub behavior: EnemyBehavior,
    /// Score for a kill under the archetype scoring policy
    pub points: u32,
    /// Backs away from the player when closer than this
    pub kite_distance: Option<f32>,
}

impl EnemyArchetype {
    /// Minimum seconds between two attacks
    pub fn attack_interval(&self) -> f32 {
        if self.attack_rate > 0.0 {
            1.0 / self.attack_rate
        } else {
            f32::INFINITY
        }
    }

    /// Attacks beyond melee reach are performed with bullets
    pub fn is_ranged(&self) -> bool {
        self.attack_range > RANGED_THRESHOLD
    }
}

/// Attack ranges above this spawn bullets instead of striking directly
pub const RANGED_THRESHOLD: f32 = 5.0;

/// Look up an archetype by id
pub fn archetype(id: &str) -> Result<&'static EnemyArchetype, ContentError> {
    ARCHETYPES
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| ContentError::UnknownArchetype(id.to_string()))
}

/// Every enemy archetype
pub static ARCHETYPES: &[EnemyArchetype] = &[
    EnemyArchetype {
        id: "basic",
        name: "Recruit",
        health: 100,
        damage: 10,
        speed: 3.0,
        attack_range: 15.0,
        attack_rate: 1.0,
        detection_range: 20.0,
        accuracy: 0.6,
        behavior: EnemyBehavior::Patrol,
        points: 100,
        kite_distance: None,
    },
    EnemyArchetype {
        id: "medium",
        name: "Soldier",
        health: 150,
        damage: 15,
        speed: 4.0,
        attack_range: 18.0,
        attack_rate: 1.5,
        detection_range: 25.0,
        accuracy: 0.7,
        behavior: EnemyBehavior::Aggressive,
        points: 200,
        kite_distance: None,
    },
    EnemyArchetype {
        id: "heavy",
        name: "Heavy Gunner",
        health: 250,
        damage: 20,
        speed: 2.0,
        attack_range: 20.0,
        attack_rate: 2.0,
        detection_range: 22.0,
        accuracy: 0.65,
        behavior: EnemyBehavior::Aggressive,
        points: 300,
        kite_distance: None,
    },
    EnemyArchetype {
        id: "sniper",
        name: "Sniper",
        health: 80,
        damage: 40,
        speed: 3.0,
        attack_range: 40.0,
        attack_rate: 0.5,
        detection_range: 50.0,
        accuracy: 0.9,
        behavior: EnemyBehavior::Stationary,
        points: 250,
        // half the attack range
        kite_distance: Some(20.0),
    },
    EnemyArchetype {
        id: "boss",
        name: "Commander",
        health: 500,
        damage: 25,
        speed: 2.5,
        attack_range: 25.0,
        attack_rate: 1.8,
        detection_range: 30.0,
        accuracy: 0.8,
        behavior: EnemyBehavior::Aggressive,
        points: 1000,
        kite_distance: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sniper_kites() {
        let kiters: Vec<_> = ARCHETYPES
            .iter()
            .filter(|a| a.kite_distance.is_some())
            .map(|a| a.id)
            .collect();
        assert_eq!(kiters, vec!["sniper"]);
    }

    #[test]
    fn every_archetype_attacks_at_range() {
        assert!(ARCHETYPES.iter().all(EnemyArchetype::is_ranged));
    }

    #[test]
    fn attack_interval_of_basic_is_one_second() {
        assert_eq!(archetype("basic").unwrap().attack_interval(), 1.0);
    }
}
