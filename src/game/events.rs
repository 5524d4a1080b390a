//! Gameplay events and operation outcomes

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::GamePhase;

/// Why a bullet left the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletExpiry {
    /// Exceeded its maximum lifetime
    Lifetime,
    /// Dropped below the ground plane
    Ground,
    /// Struck a target
    Impact,
}

/// Result of `damage_enemy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyDamage {
    /// No live enemy with that id
    Missing,
    /// Enemy survived
    Wounded { remaining: u32 },
    /// Enemy removed and the player credited
    Eliminated { score_awarded: u32 },
}

impl EnemyDamage {
    pub fn is_elimination(&self) -> bool {
        matches!(self, Self::Eliminated { .. })
    }
}

/// Something observable that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },

    MatchReset {
        map_id: String,
        mode_id: String,
        epoch: u64,
    },

    EnemySpawned {
        enemy_id: Uuid,
        archetype: String,
        position: Vec3,
    },

    ShotFired {
        bullet_id: Uuid,
        weapon_id: String,
        ammo_left: u32,
    },

    OutOfAmmo {
        weapon_id: String,
    },

    Reloaded {
        weapon_id: String,
        ammo: u32,
    },

    WeaponSwitched {
        weapon_id: String,
    },

    PlayerDamaged {
        amount: u32,
        health: u32,
    },

    PlayerHealed {
        amount: u32,
        health: u32,
    },

    PlayerDied {
        deaths: u32,
    },

    EnemyHit {
        enemy_id: Uuid,
        damage: u32,
        remaining: u32,
    },

    EnemyEliminated {
        enemy_id: Uuid,
        archetype: String,
        score_awarded: u32,
    },

    /// Ranged attacks spawn a bullet, melee attacks report whether they landed
    EnemyAttacked {
        enemy_id: Uuid,
        ranged: bool,
        landed: bool,
    },

    BulletExpired {
        bullet_id: Uuid,
        cause: BulletExpiry,
    },

    RespawnScheduled {
        due_at: f32,
    },

    TimerExpired,
}
