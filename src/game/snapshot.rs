//! Snapshot building for observers

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::time::unix_millis;

use super::events::GameEvent;
use super::phase::GamePhase;
use super::store::GameStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub health: u32,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
    pub position: Vec3,
    pub rotation: Vec3,
    pub weapon_id: String,
    pub ammo: u32,
    pub max_ammo: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub id: Uuid,
    pub archetype: String,
    pub health: u32,
    pub max_health: u32,
    pub position: Vec3,
    pub rotation: Vec3,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletSnapshot {
    pub id: Uuid,
    pub position: Vec3,
    pub direction: Vec3,
    pub from_player: bool,
}

/// Read model of a whole match at one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub frame: u64,
    pub generated_at_ms: u64,
    pub epoch: u64,
    pub phase: GamePhase,
    pub map_id: String,
    pub mode_id: String,
    pub timer: f32,
    pub player: PlayerSnapshot,
    pub enemies: Vec<EnemySnapshot>,
    pub bullets: Vec<BulletSnapshot>,
    /// Events since the previous snapshot
    pub events: Vec<GameEvent>,
}

/// Decides when to snapshot and accumulates events in between
pub struct SnapshotBuilder {
    /// Frames since last snapshot
    frames_since_snapshot: u32,
    /// Snapshot interval in frames
    snapshot_interval: u32,
    pending_events: Vec<GameEvent>,
}

impl SnapshotBuilder {
    pub fn new(snapshot_interval: u32) -> Self {
        Self {
            frames_since_snapshot: 0,
            snapshot_interval: snapshot_interval.max(1),
            pending_events: Vec::new(),
        }
    }

    /// Count a frame and check if it's time to send a snapshot
    pub fn should_send(&mut self) -> bool {
        self.frames_since_snapshot += 1;
        if self.frames_since_snapshot >= self.snapshot_interval {
            self.frames_since_snapshot = 0;
            true
        } else {
            false
        }
    }

    /// Force snapshot on next check (used for phase changes)
    pub fn force_next(&mut self) {
        self.frames_since_snapshot = self.snapshot_interval;
    }

    /// Hold events until the next snapshot. Phase changes force one.
    pub fn record(&mut self, events: Vec<GameEvent>) {
        if events.iter().any(|e| matches!(e, GameEvent::PhaseChanged { .. })) {
            self.force_next();
        }
        self.pending_events.extend(events);
    }

    /// Build a snapshot carrying the held events
    pub fn build(&mut self, frame: u64, store: &GameStore) -> MatchSnapshot {
        let player = store.player();
        let weapon = player.current_weapon;

        MatchSnapshot {
            frame,
            generated_at_ms: unix_millis(),
            epoch: store.epoch(),
            phase: store.phase(),
            map_id: store.map().id.to_string(),
            mode_id: store.mode().id.to_string(),
            timer: store.timer(),
            player: PlayerSnapshot {
                health: player.health,
                score: player.score,
                kills: player.kills,
                deaths: player.deaths,
                position: player.position,
                rotation: player.rotation,
                weapon_id: weapon.id.to_string(),
                ammo: player.ammo_for(weapon.id),
                max_ammo: weapon.max_ammo,
            },
            enemies: store
                .enemies()
                .iter()
                .map(|e| EnemySnapshot {
                    id: e.id,
                    archetype: e.archetype.id.to_string(),
                    health: e.health,
                    max_health: e.max_health,
                    position: e.position,
                    rotation: e.rotation,
                    is_active: e.is_active,
                })
                .collect(),
            bullets: store
                .bullets()
                .iter()
                .map(|b| BulletSnapshot {
                    id: b.id,
                    position: b.position,
                    direction: b.direction,
                    from_player: b.from_player,
                })
                .collect(),
            events: std::mem::take(&mut self.pending_events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameplayConfig;

    #[test]
    fn sends_every_interval() {
        let mut builder = SnapshotBuilder::new(3);
        let sent: Vec<bool> = (0..6).map(|_| builder.should_send()).collect();
        assert_eq!(sent, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn phase_change_forces_snapshot() {
        let mut builder = SnapshotBuilder::new(10);
        builder.record(vec![GameEvent::PhaseChanged {
            from: GamePhase::Menu,
            to: GamePhase::Loading,
        }]);
        assert!(builder.should_send());
    }

    #[test]
    fn build_hands_over_events_once() {
        let mut store = GameStore::new(GameplayConfig::default(), 4);
        store.start_game("training", "training");

        let mut builder = SnapshotBuilder::new(1);
        builder.record(store.drain_events());
        let first = builder.build(1, &store);
        assert_eq!(first.phase, GamePhase::Loading);
        assert_eq!(first.player.ammo, 30);
        assert!(!first.events.is_empty());

        let second = builder.build(2, &store);
        assert!(second.events.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let store = GameStore::new(GameplayConfig::default(), 4);
        let snapshot = SnapshotBuilder::new(1).build(0, &store);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "menu");
        assert_eq!(json["player"]["weapon_id"], "k5");
    }
}
