//! Autopilot that plays the headless match from snapshots

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::input::{ControlInput, KeyState};
use super::physics::{PhysicsSystem, CAMERA_GAIN};
use super::snapshot::MatchSnapshot;

/// Fraction of the aim error corrected per frame
const TURN_GAIN: f32 = 0.2;
/// Fire once the aim error is inside this (radians)
const FIRE_CONE: f32 = 0.05;
/// Walk toward targets farther than this
const ENGAGE_DISTANCE: f32 = 12.0;

/// What the autopilot is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutopilotState {
    /// No enemy to fight
    Idle,
    /// Turning or walking toward the nearest enemy
    Chase,
    /// Aligned and shooting
    Attack,
    /// Magazine empty
    Reload,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub state: AutopilotState,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            state: AutopilotState::Idle,
        }
    }

    /// Decide the control input to hold until the next snapshot
    pub fn steer(&mut self, snapshot: &MatchSnapshot) -> ControlInput {
        let player = &snapshot.player;
        if player.ammo == 0 {
            self.state = AutopilotState::Reload;
            return ControlInput {
                keys: KeyState {
                    reload: true,
                    ..Default::default()
                },
                ..Default::default()
            };
        }

        let target = snapshot
            .enemies
            .iter()
            .filter(|e| e.is_active)
            .map(|e| e.position)
            .min_by(|a, b| {
                let da = PhysicsSystem::planar_distance(player.position, *a);
                da.total_cmp(&PhysicsSystem::planar_distance(player.position, *b))
            });

        let Some(target) = target else {
            self.state = AutopilotState::Idle;
            return ControlInput::default();
        };

        let error = aim_error(player.rotation.y, player.position, target);
        let distance = PhysicsSystem::planar_distance(player.position, target);
        let aligned = error.abs() < FIRE_CONE;

        self.state = if aligned {
            AutopilotState::Attack
        } else {
            AutopilotState::Chase
        };

        let mut input = ControlInput::default();
        input.touch.camera = Vec2::new(error * TURN_GAIN / CAMERA_GAIN, 0.0);
        input.keys.shoot = aligned;
        input.keys.forward = distance > ENGAGE_DISTANCE && error.abs() < PI / 4.0;
        input
    }
}

/// Signed yaw change that points the gun at `target`, wrapped to [-PI, PI)
pub fn aim_error(yaw: f32, from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    // shots travel along (-sin yaw, -cos yaw)
    let desired = (-dx).atan2(-dz);
    (desired - yaw + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combat::CombatSystem;
    use approx::assert_relative_eq;

    #[test]
    fn aim_error_lines_up_shot() {
        let from = Vec3::new(0.0, 1.0, 0.0);
        let to = Vec3::new(5.0, 1.0, -5.0);
        let yaw = aim_error(0.0, from, to);

        let shot = CombatSystem::fire_direction(yaw);
        let wanted = (to - from).normalize();
        assert_relative_eq!(shot.x, wanted.x, epsilon = 1e-5);
        assert_relative_eq!(shot.z, wanted.z, epsilon = 1e-5);
    }

    #[test]
    fn aim_error_wraps() {
        let from = Vec3::ZERO;
        let ahead = Vec3::new(0.0, 0.0, -5.0);
        assert_relative_eq!(aim_error(TAU, from, ahead), 0.0, epsilon = 1e-5);
        assert!(aim_error(3.0, from, ahead).abs() <= PI);
    }
}
