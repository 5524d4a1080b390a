//! Combat system - damage, healing, scoring and fire direction

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::content::EnemyArchetype;

/// Full player health
pub const MAX_PLAYER_HEALTH: u32 = 100;
/// Score for an elimination under the fixed policy
pub const FIXED_KILL_SCORE: u32 = 100;
/// Speed of bullets fired by ranged enemies
pub const ENEMY_BULLET_SPEED: f32 = 20.0;
/// Melee attacks only land inside this planar distance
pub const MELEE_REACH: f32 = 2.0;

/// How many points an elimination awards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Every kill is worth the same
    #[default]
    Fixed,
    /// Kills are worth the archetype's `points`
    Archetype,
}

impl ScorePolicy {
    pub fn score_for(self, archetype: &EnemyArchetype) -> u32 {
        match self {
            Self::Fixed => FIXED_KILL_SCORE,
            Self::Archetype => archetype.points,
        }
    }
}

/// Combat rules shared by the player, enemy and projectile simulations
pub struct CombatSystem;

impl CombatSystem {
    /// Apply damage to health, returns (new_health, is_dead)
    pub fn apply_damage(current_health: u32, damage: u32) -> (u32, bool) {
        let new_health = current_health.saturating_sub(damage);
        (new_health, new_health == 0)
    }

    /// Heal, capped at full health
    pub fn apply_heal(current_health: u32, amount: u32) -> u32 {
        current_health.saturating_add(amount).min(MAX_PLAYER_HEALTH)
    }

    /// Bullet direction for a yaw. Pitch does not affect the trajectory.
    pub fn fire_direction(yaw: f32) -> Vec3 {
        Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
    }

    /// Check if the player can fire given the last shot time
    pub fn can_fire(last_shot_at: Option<f32>, now: f32, shot_interval: f32) -> bool {
        match last_shot_at {
            Some(last) => now - last >= shot_interval,
            None => true,
        }
    }

    /// Whether an enemy has waited out its attack interval
    pub fn can_attack(last_attack_at: Option<f32>, now: f32, attack_interval: f32) -> bool {
        match last_attack_at {
            Some(last) => now - last > attack_interval,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::archetype;
    use approx::assert_relative_eq;

    #[test]
    fn damage_floors_at_zero() {
        assert_eq!(CombatSystem::apply_damage(10, 20), (0, true));
        assert_eq!(CombatSystem::apply_damage(50, 20), (30, false));
        assert_eq!(CombatSystem::apply_damage(0, 0), (0, true));
    }

    #[test]
    fn heal_caps_at_max() {
        assert_eq!(CombatSystem::apply_heal(90, 50), MAX_PLAYER_HEALTH);
        assert_eq!(CombatSystem::apply_heal(40, 10), 50);
        assert_eq!(CombatSystem::apply_heal(99, u32::MAX), MAX_PLAYER_HEALTH);
    }

    #[test]
    fn zero_yaw_fires_down_negative_z() {
        let dir = CombatSystem::fire_direction(0.0);
        assert_relative_eq!(dir.x, 0.0);
        assert_relative_eq!(dir.z, -1.0);
        assert_relative_eq!(CombatSystem::fire_direction(1.3).length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn score_policy_selects_points() {
        let boss = archetype("boss").unwrap();
        assert_eq!(ScorePolicy::Fixed.score_for(boss), 100);
        assert_eq!(ScorePolicy::Archetype.score_for(boss), 1000);
    }

    #[test]
    fn attack_gate_is_strict() {
        assert!(CombatSystem::can_attack(None, 0.0, 1.0));
        assert!(!CombatSystem::can_attack(Some(1.0), 2.0, 1.0));
        assert!(CombatSystem::can_attack(Some(1.0), 2.01, 1.0));
    }
}
