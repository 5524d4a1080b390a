//! Frame driver

use tracing::trace;

use super::enemy_ai::EnemyAiSystem;
use super::events::GameEvent;
use super::input::ControlInput;
use super::player::PlayerSimulation;
use super::projectile::ProjectileSystem;
use super::store::GameStore;

/// Runs the simulation components against a store, one frame at a time
#[derive(Debug, Default)]
pub struct Simulation {
    player: PlayerSimulation,
    frame: u64,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame of `dt` seconds. Order is fixed: clock and deferred
    /// tasks, player, enemies, projectiles, timer. Returns every event
    /// recorded since the previous frame, including host commands.
    pub fn tick(&mut self, store: &mut GameStore, input: &ControlInput, dt: f32) -> Vec<GameEvent> {
        self.frame += 1;
        store.advance_clock(dt);

        if store.phase().is_simulating() {
            self.player.update(store, input, dt);
            EnemyAiSystem::update(store, dt);

            let eliminated = ProjectileSystem::update(store, dt);
            if !eliminated.is_empty() {
                trace!(frame = self.frame, count = eliminated.len(), "Enemies shot down");
            }
        }

        store.tick_timer(dt);

        let mut events = store.drain_events();
        // Every elimination gets a replacement, whoever dealt the damage
        let eliminations = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyEliminated { .. }))
            .count();
        if eliminations > 0 {
            for _ in 0..eliminations {
                store.schedule_enemy_respawn();
            }
            events.extend(store.drain_events());
        }
        if !events.is_empty() {
            trace!(frame = self.frame, count = events.len(), "Frame events");
        }
        events
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
