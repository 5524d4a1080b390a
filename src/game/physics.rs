//! Player movement and vertical motion

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

/// Ground speed while walking (units per second)
pub const WALK_SPEED: f32 = 5.0;
/// Ground speed while sprinting or aiming
pub const RUN_SPEED: f32 = 8.0;
/// Ground speed while crouched
pub const CROUCH_SPEED: f32 = 2.5;
/// Upward velocity applied on jump
pub const JUMP_VELOCITY: f32 = 5.0;
/// Vertical acceleration while airborne
pub const GRAVITY: f32 = -9.8;
/// Touch camera deltas are scaled by this before they reach yaw/pitch
pub const CAMERA_GAIN: f32 = 5.0;
/// Pitch is clamped to +/- this to keep the camera from flipping
pub const PITCH_LIMIT: f32 = PI / 2.5;

/// Vertical state of the player between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    /// Units per second, positive up
    pub vertical_velocity: f32,
    pub grounded: bool,
    /// Height the player snaps back to. Always the spawn altitude.
    pub floor_y: f32,
}

impl PlayerMotion {
    pub fn new(floor_y: f32) -> Self {
        Self {
            vertical_velocity: 0.0,
            grounded: true,
            floor_y,
        }
    }

    /// Apply gravity or a jump and return the new height
    pub fn integrate(&mut self, y: f32, jump: bool, dt: f32) -> f32 {
        if !self.grounded {
            self.vertical_velocity += GRAVITY * dt;
        } else if jump {
            self.vertical_velocity = JUMP_VELOCITY;
            self.grounded = false;
        }

        let mut new_y = y + self.vertical_velocity * dt;
        if new_y < self.floor_y {
            new_y = self.floor_y;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        }
        new_y
    }
}

/// Physics helpers for the player simulation
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Sum both movement sources and normalize, so diagonals are not faster
    pub fn combine_movement(keys: Vec2, stick: Vec2) -> Vec2 {
        let combined = keys + stick;
        if combined.x != 0.0 || combined.y != 0.0 {
            combined / combined.length()
        } else {
            Vec2::ZERO
        }
    }

    /// Crouch beats sprint, sprint beats walk
    pub fn select_speed(running: bool, crouching: bool) -> f32 {
        let mut speed = WALK_SPEED;
        if running {
            speed = RUN_SPEED;
        }
        if crouching {
            speed = CROUCH_SPEED;
        }
        speed
    }

    /// Accumulate a camera delta into (yaw, pitch)
    pub fn apply_look(yaw: f32, pitch: f32, camera: Vec2) -> (f32, f32) {
        let new_yaw = yaw + camera.x * CAMERA_GAIN;
        let new_pitch = (pitch - camera.y * CAMERA_GAIN).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        (new_yaw, new_pitch)
    }

    /// Rotate local (x, z) movement by yaw into world space
    pub fn local_to_world(movement: Vec2, yaw: f32) -> Vec2 {
        let (sin, cos) = yaw.sin_cos();
        Vec2::new(
            movement.x * cos - movement.y * sin,
            movement.x * sin + movement.y * cos,
        )
    }

    /// Distance on the ground plane, ignoring height
    pub fn planar_distance(from: Vec3, to: Vec3) -> f32 {
        Self::planar_offset(from, to).length()
    }

    /// (dx, dz) from `from` towards `to`
    pub fn planar_offset(from: Vec3, to: Vec3) -> Vec2 {
        Vec2::new(to.x - from.x, to.z - from.z)
    }

    /// Yaw that faces along a planar offset
    pub fn facing_yaw(offset: Vec2) -> f32 {
        offset.x.atan2(offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Vec2::new(0.0, -1.0), Vec2::ZERO)]
    #[case(Vec2::new(1.0, -1.0), Vec2::ZERO)]
    #[case(Vec2::new(-1.0, 0.0), Vec2::new(0.3, 0.7))]
    #[case(Vec2::ZERO, Vec2::new(0.2, 0.2))]
    fn combined_movement_is_unit_length(#[case] keys: Vec2, #[case] stick: Vec2) {
        let combined = PhysicsSystem::combine_movement(keys, stick);
        assert_relative_eq!(combined.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn cancelling_input_produces_no_movement() {
        let combined = PhysicsSystem::combine_movement(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
        assert_eq!(combined, Vec2::ZERO);
    }

    #[test]
    fn crouch_wins_over_sprint() {
        assert_eq!(PhysicsSystem::select_speed(false, false), WALK_SPEED);
        assert_eq!(PhysicsSystem::select_speed(true, false), RUN_SPEED);
        assert_eq!(PhysicsSystem::select_speed(true, true), CROUCH_SPEED);
    }

    #[test]
    fn pitch_is_clamped() {
        let (_, pitch) = PhysicsSystem::apply_look(0.0, 0.0, Vec2::new(0.0, -10.0));
        assert_relative_eq!(pitch, PITCH_LIMIT);
        let (yaw, pitch) = PhysicsSystem::apply_look(0.0, 0.0, Vec2::new(0.1, 10.0));
        assert_relative_eq!(pitch, -PITCH_LIMIT);
        assert_relative_eq!(yaw, 0.5);
    }

    #[test]
    fn rotation_preserves_length() {
        let world = PhysicsSystem::local_to_world(Vec2::new(0.6, 0.8), 2.1);
        assert_relative_eq!(world.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn jump_lands_back_on_floor() {
        let mut motion = PlayerMotion::new(1.0);
        let mut y = motion.integrate(1.0, true, 1.0 / 60.0);
        assert!(y > 1.0);
        assert!(!motion.grounded);

        for _ in 0..240 {
            y = motion.integrate(y, false, 1.0 / 60.0);
        }
        assert_eq!(y, 1.0);
        assert!(motion.grounded);
        assert_eq!(motion.vertical_velocity, 0.0);
    }

    #[test]
    fn grounded_player_stays_put() {
        let mut motion = PlayerMotion::new(1.0);
        assert_eq!(motion.integrate(1.0, false, 0.5), 1.0);
        assert!(motion.grounded);
    }

    #[test]
    fn facing_yaw_points_at_target() {
        assert_relative_eq!(PhysicsSystem::facing_yaw(Vec2::new(0.0, 1.0)), 0.0);
        assert_relative_eq!(PhysicsSystem::facing_yaw(Vec2::new(1.0, 0.0)), PI / 2.0);
    }
}
