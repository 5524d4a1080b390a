//! Player simulation - turns a frame of control input into store mutations

use glam::Vec3;

use super::input::ControlInput;
use super::physics::{PhysicsSystem, PlayerMotion};
use super::store::GameStore;

/// Per-match player state that lives outside the store (vertical motion)
#[derive(Debug, Default)]
pub struct PlayerSimulation {
    motion: Option<PlayerMotion>,
    epoch: u64,
}

impl PlayerSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame. No-op unless the match is playing.
    pub fn update(&mut self, store: &mut GameStore, input: &ControlInput, dt: f32) {
        if !store.phase().is_simulating() {
            return;
        }

        // A new epoch means a fresh spawn, so the floor moves with it
        if self.motion.is_none() || self.epoch != store.epoch() {
            self.motion = Some(PlayerMotion::new(store.player().position.y));
            self.epoch = store.epoch();
        }

        if let Some(slot) = input.keys.weapon_slot {
            let weapon_id = store.player().weapons.get(slot).map(|w| w.id);
            if let Some(weapon_id) = weapon_id {
                store.switch_weapon(weapon_id);
            }
        }

        let player = store.player();
        let movement = PhysicsSystem::combine_movement(input.keys.movement(), input.touch.movement);
        let speed = PhysicsSystem::select_speed(input.running(), input.crouching());
        let (yaw, pitch) = PhysicsSystem::apply_look(player.yaw(), player.pitch(), input.touch.camera);

        let step = PhysicsSystem::local_to_world(movement, yaw) * speed * dt;
        let mut position = player.position + Vec3::new(step.x, 0.0, step.y);

        if let Some(motion) = self.motion.as_mut() {
            position.y = motion.integrate(position.y, input.jumping(), dt);
        }

        store.move_player(position.x, position.y, position.z);
        store.rotate_player(pitch, yaw, 0.0);

        if input.shooting() {
            store.shoot_weapon();
        }
        if input.reloading() {
            store.reload_weapon();
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.motion.map_or(true, |m| m.grounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameplayConfig;
    use crate::game::input::KeyState;
    use crate::game::physics::{CROUCH_SPEED, WALK_SPEED};
    use crate::game::store::LOADING_DELAY;
    use approx::assert_relative_eq;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn playing_store() -> GameStore {
        let mut store = GameStore::new(GameplayConfig::default(), 11);
        store.start_game("training", "training");
        store.advance_clock(LOADING_DELAY);
        store
    }

    fn keys(keys: KeyState) -> ControlInput {
        ControlInput {
            keys,
            ..Default::default()
        }
    }

    #[test]
    fn forward_moves_down_negative_z() {
        let mut store = playing_store();
        let mut sim = PlayerSimulation::new();
        let input = keys(KeyState {
            forward: true,
            ..Default::default()
        });

        sim.update(&mut store, &input, DT);
        let position = store.player().position;
        assert_relative_eq!(position.z, -WALK_SPEED * DT, epsilon = 1e-6);
        assert_relative_eq!(position.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn diagonal_step_matches_straight_step() {
        let mut store = playing_store();
        let mut sim = PlayerSimulation::new();
        let input = keys(KeyState {
            forward: true,
            leftward: true,
            crouch: true,
            ..Default::default()
        });

        let before = store.player().position;
        sim.update(&mut store, &input, DT);
        let moved = (store.player().position - before).length();
        assert_relative_eq!(moved, CROUCH_SPEED * DT, epsilon = 1e-6);
    }

    #[test]
    fn touch_camera_turns_player() {
        let mut store = playing_store();
        let mut sim = PlayerSimulation::new();
        let mut input = ControlInput::default();
        input.touch.camera = Vec2::new(0.1, 0.0);

        sim.update(&mut store, &input, DT);
        assert_relative_eq!(store.player().yaw(), 0.5);
    }

    #[test]
    fn jump_leaves_and_returns_to_spawn_height() {
        let mut store = playing_store();
        let mut sim = PlayerSimulation::new();
        let jump = keys(KeyState {
            jump: true,
            ..Default::default()
        });

        sim.update(&mut store, &jump, DT);
        assert!(store.player().position.y > 1.0);
        assert!(!sim.is_grounded());

        for _ in 0..180 {
            sim.update(&mut store, &ControlInput::default(), DT);
        }
        assert_eq!(store.player().position.y, 1.0);
        assert!(sim.is_grounded());
    }

    #[test]
    fn held_trigger_fires_every_frame() {
        let mut store = playing_store();
        let mut sim = PlayerSimulation::new();
        let fire = keys(KeyState {
            shoot: true,
            ..Default::default()
        });

        for _ in 0..3 {
            sim.update(&mut store, &fire, DT);
        }
        assert_eq!(store.player().current_ammo(), 27);
        assert_eq!(store.bullets().len(), 3);
    }

    #[test]
    fn weapon_slot_switches_owned_weapon() {
        let mut store = playing_store();
        let mut sim = PlayerSimulation::new();

        sim.update(&mut store, &keys(KeyState { weapon_slot: Some(1), ..Default::default() }), DT);
        assert_eq!(store.player().current_weapon.id, "ak47");

        sim.update(&mut store, &keys(KeyState { weapon_slot: Some(3), ..Default::default() }), DT);
        assert_eq!(store.player().current_weapon.id, "ak47");
    }

    #[test]
    fn paused_match_ignores_input() {
        let mut store = playing_store();
        store.pause_game();
        let mut sim = PlayerSimulation::new();
        let input = keys(KeyState {
            forward: true,
            shoot: true,
            ..Default::default()
        });

        sim.update(&mut store, &input, DT);
        assert_eq!(store.player().position, Vec3::new(0.0, 1.0, 0.0));
        assert!(store.bullets().is_empty());
    }
}
