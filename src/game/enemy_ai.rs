//! Enemy AI - per enemy, per frame movement and attacks

use glam::{Vec2, Vec3};
use tracing::debug;
use uuid::Uuid;

use crate::content::{EnemyArchetype, EnemyBehavior};

use super::combat::{CombatSystem, ENEMY_BULLET_SPEED, MELEE_REACH};
use super::physics::PhysicsSystem;
use super::store::GameStore;

/// Patrol enemies engage inside this multiple of their attack range
const PATROL_ENGAGE_FACTOR: f32 = 1.5;

/// What an enemy does with its feet this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    /// Close the distance to the player
    Approach,
    /// Back away from the player
    Retreat,
    /// Stay put
    Hold,
    /// Random walk
    Wander,
}

/// Choose a maneuver from planar distance to the player
pub fn choose_maneuver(archetype: &EnemyArchetype, distance: f32) -> Maneuver {
    if distance > archetype.detection_range {
        return match archetype.behavior {
            EnemyBehavior::Patrol => Maneuver::Wander,
            _ => Maneuver::Hold,
        };
    }

    let engaged = match archetype.behavior {
        EnemyBehavior::Aggressive => true,
        EnemyBehavior::Defensive => distance <= archetype.attack_range,
        EnemyBehavior::Patrol => distance <= archetype.attack_range * PATROL_ENGAGE_FACTOR,
        EnemyBehavior::Stationary => false,
    };
    if !engaged {
        return Maneuver::Hold;
    }

    match archetype.kite_distance {
        Some(kite) if distance < kite => Maneuver::Retreat,
        _ if distance > archetype.attack_range => Maneuver::Approach,
        _ => Maneuver::Hold,
    }
}

/// Whether the player is close enough to attack
pub fn should_enemy_attack(archetype: &EnemyArchetype, distance: f32) -> bool {
    distance <= archetype.attack_range
}

/// Where a maneuver takes an enemy after `dt`. `random` yields samples in
/// [0, 1) for the random walk.
pub fn step_position(
    maneuver: Maneuver,
    archetype: &EnemyArchetype,
    position: Vec3,
    toward_player: Vec2,
    dt: f32,
    mut random: impl FnMut() -> f32,
) -> Vec3 {
    let stride = archetype.speed * dt;
    let delta = match maneuver {
        Maneuver::Approach => toward_player.normalize_or_zero() * stride,
        Maneuver::Retreat => -toward_player.normalize_or_zero() * stride,
        Maneuver::Hold => Vec2::ZERO,
        Maneuver::Wander => {
            let dx = (random() - 0.5) * stride;
            let dz = (random() - 0.5) * stride;
            Vec2::new(dx, dz)
        }
    };
    position + Vec3::new(delta.x, 0.0, delta.y)
}

/// Drives every active enemy against the store
pub struct EnemyAiSystem;

impl EnemyAiSystem {
    pub fn update(store: &mut GameStore, dt: f32) {
        if !store.phase().is_simulating() {
            return;
        }

        let roster: Vec<(Uuid, &'static EnemyArchetype, Vec3, Option<f32>)> = store
            .enemies()
            .iter()
            .filter(|e| e.is_active)
            .map(|e| (e.id, e.archetype, e.position, e.last_attack_at))
            .collect();

        for (id, archetype, position, last_attack_at) in roster {
            let target = store.player().position;
            let offset = PhysicsSystem::planar_offset(position, target);
            let distance = offset.length();

            let maneuver = choose_maneuver(archetype, distance);
            let position = step_position(maneuver, archetype, position, offset, dt, || store.random_unit());
            let yaw = PhysicsSystem::facing_yaw(offset);
            store.move_enemy(id, position, yaw);

            if should_enemy_attack(archetype, distance)
                && CombatSystem::can_attack(last_attack_at, store.clock(), archetype.attack_interval())
            {
                Self::attack(store, id, archetype, position, yaw, distance);
            }
        }
    }

    fn attack(
        store: &mut GameStore,
        id: Uuid,
        archetype: &'static EnemyArchetype,
        position: Vec3,
        yaw: f32,
        distance: f32,
    ) {
        store.record_enemy_attack(id);

        if archetype.is_ranged() {
            let facing = Vec3::new(yaw.sin(), 0.0, yaw.cos());
            let direction = (store.player().position - position).try_normalize().unwrap_or(facing);
            store.create_bullet(position, direction, ENEMY_BULLET_SPEED, archetype.damage, false);
            store.report_enemy_attack(id, true, false);
            debug!(enemy_id = %id, archetype = archetype.id, "Enemy fired");
            return;
        }

        let landed = distance < MELEE_REACH;
        if landed {
            store.damage_player(archetype.damage);
        }
        store.report_enemy_attack(id, false, landed);
        debug!(enemy_id = %id, archetype = archetype.id, landed, "Enemy struck");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameplayConfig;
    use crate::content::archetype;
    use crate::game::store::LOADING_DELAY;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn arena() -> GameStore {
        // free-for-all has no default wave
        let mut store = GameStore::new(GameplayConfig::default(), 21);
        store.start_game("training", "freeForAll");
        store.advance_clock(LOADING_DELAY);
        assert!(store.enemies().is_empty());
        store
    }

    #[rstest]
    #[case("medium", 24.0, Maneuver::Approach)]
    #[case("medium", 10.0, Maneuver::Hold)]
    #[case("medium", 30.0, Maneuver::Hold)]
    #[case("basic", 19.0, Maneuver::Approach)]
    #[case("basic", 21.0, Maneuver::Wander)]
    #[case("sniper", 10.0, Maneuver::Hold)]
    #[case("sniper", 60.0, Maneuver::Hold)]
    fn maneuver_table(#[case] id: &str, #[case] distance: f32, #[case] expected: Maneuver) {
        let archetype = archetype(id).unwrap();
        assert_eq!(choose_maneuver(archetype, distance), expected);
    }

    #[test]
    fn kiting_archetype_retreats_when_engaged() {
        let mut kiter = archetype("sniper").unwrap().clone();
        kiter.behavior = EnemyBehavior::Aggressive;
        assert_eq!(choose_maneuver(&kiter, 10.0), Maneuver::Retreat);
        assert_eq!(choose_maneuver(&kiter, 30.0), Maneuver::Hold);
        assert_eq!(choose_maneuver(&kiter, 45.0), Maneuver::Approach);
    }

    #[test]
    fn defensive_holds_until_player_in_range() {
        let mut guard = archetype("medium").unwrap().clone();
        guard.behavior = EnemyBehavior::Defensive;
        assert_eq!(choose_maneuver(&guard, 20.0), Maneuver::Hold);
        assert_eq!(choose_maneuver(&guard, 18.0), Maneuver::Hold);
    }

    #[test]
    fn approach_moves_at_archetype_speed() {
        let heavy = archetype("heavy").unwrap();
        let next = step_position(Maneuver::Approach, heavy, Vec3::ZERO, Vec2::new(3.0, 4.0), 0.5, || 0.0);
        assert_relative_eq!(next.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(next.x, 0.6, epsilon = 1e-6);
        assert_eq!(next.y, 0.0);
    }

    #[test]
    fn wander_is_bounded_by_half_stride() {
        let basic = archetype("basic").unwrap();
        let next = step_position(Maneuver::Wander, basic, Vec3::ZERO, Vec2::ZERO, 1.0, || 0.999);
        assert!(next.x <= 1.5 && next.z <= 1.5);
        let next = step_position(Maneuver::Wander, basic, Vec3::ZERO, Vec2::ZERO, 1.0, || 0.0);
        assert_relative_eq!(next.x, -1.5);
    }

    #[test]
    fn attack_is_inclusive_of_range() {
        let basic = archetype("basic").unwrap();
        assert!(should_enemy_attack(basic, 15.0));
        assert!(!should_enemy_attack(basic, 15.01));
    }

    #[test]
    fn ranged_enemy_fires_at_player() {
        let mut store = arena();
        let id = store.spawn_enemy("basic", Vec3::new(0.0, 1.0, -10.0));

        EnemyAiSystem::update(&mut store, 1.0 / 60.0);

        let bullet = store.bullets().iter().next().unwrap();
        assert!(!bullet.from_player);
        assert_eq!(bullet.speed, ENEMY_BULLET_SPEED);
        assert_eq!(bullet.damage, 10);
        assert!(bullet.direction.z > 0.99);
        assert!(store.enemy(id).unwrap().last_attack_at.is_some());
    }

    #[test]
    fn attacks_respect_attack_rate() {
        let mut store = arena();
        store.spawn_enemy("basic", Vec3::new(0.0, 1.0, -10.0));

        EnemyAiSystem::update(&mut store, 0.1);
        store.advance_clock(0.5);
        EnemyAiSystem::update(&mut store, 0.1);
        assert_eq!(store.bullets().len(), 1);

        store.advance_clock(0.6);
        EnemyAiSystem::update(&mut store, 0.1);
        assert_eq!(store.bullets().len(), 2);
    }

    #[test]
    fn melee_needs_reach() {
        let mut store = arena();
        let mut brawler = archetype("medium").unwrap().clone();
        brawler.attack_range = 4.0;
        assert!(!brawler.is_ranged());

        let id = store.spawn_enemy("medium", Vec3::new(0.0, 1.0, -1.5));
        let leaked: &'static EnemyArchetype = Box::leak(Box::new(brawler));
        EnemyAiSystem::attack(&mut store, id, leaked, Vec3::new(0.0, 1.0, -1.5), 0.0, 1.5);
        assert_eq!(store.player().health, 85);

        EnemyAiSystem::attack(&mut store, id, leaked, Vec3::new(0.0, 1.0, -3.0), 0.0, 3.0);
        assert_eq!(store.player().health, 85);
    }

    #[test]
    fn enemies_turn_to_face_player() {
        let mut store = arena();
        let id = store.spawn_enemy("sniper", Vec3::new(-10.0, 1.0, 0.0));
        EnemyAiSystem::update(&mut store, 1.0 / 60.0);

        let sniper = store.enemy(id).unwrap();
        assert_relative_eq!(sniper.yaw(), std::f32::consts::FRAC_PI_2);
        assert_eq!(sniper.position, Vec3::new(-10.0, 1.0, 0.0));
    }
}
