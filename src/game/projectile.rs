//! Projectile simulation - advance bullets and resolve hits

use uuid::Uuid;

use super::bullets::Bullet;
use super::events::BulletExpiry;
use super::store::GameStore;

pub struct ProjectileSystem;

impl ProjectileSystem {
    /// Advance every live bullet by `dt` and resolve hits. Returns the ids of
    /// enemies eliminated this frame.
    pub fn update(store: &mut GameStore, dt: f32) -> Vec<Uuid> {
        let mut eliminated = Vec::new();
        if !store.phase().is_simulating() {
            return eliminated;
        }

        for key in store.bullets().keys() {
            let Some(bullet) = store.advance_bullet(key, dt) else {
                continue;
            };

            if let Some(target) = Self::target_hit(store, &bullet) {
                match target {
                    Target::Enemy(id) => {
                        if store.damage_enemy(id, bullet.damage).is_elimination() {
                            eliminated.push(id);
                        }
                    }
                    Target::Player => store.damage_player(bullet.damage),
                }
                store.expire_bullet(key, BulletExpiry::Impact);
                continue;
            }

            if bullet.below_ground() {
                store.expire_bullet(key, BulletExpiry::Ground);
            }
        }

        eliminated
    }

    /// First target inside the hit sphere. Player bullets check enemies in
    /// collection order; enemy bullets only check the player.
    fn target_hit(store: &GameStore, bullet: &Bullet) -> Option<Target> {
        if bullet.from_player {
            store
                .enemies()
                .iter()
                .find(|e| e.is_active && bullet.hits(e.position))
                .map(|e| Target::Enemy(e.id))
        } else if bullet.hits(store.player().position) {
            Some(Target::Player)
        } else {
            None
        }
    }
}

enum Target {
    Enemy(Uuid),
    Player,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameplayConfig;
    use crate::game::store::LOADING_DELAY;
    use glam::Vec3;

    fn arena() -> GameStore {
        let mut store = GameStore::new(GameplayConfig::default(), 5);
        store.start_game("training", "freeForAll");
        store.advance_clock(LOADING_DELAY);
        store
    }

    #[test]
    fn hit_radius_is_exclusive() {
        let mut store = arena();
        let enemy = Vec3::new(5.0, 1.0, -5.0);
        let id = store.spawn_enemy("basic", enemy);

        store.create_bullet(enemy + Vec3::X * 1.05, Vec3::X, 0.0, 30, true);
        ProjectileSystem::update(&mut store, 0.016);
        assert_eq!(store.enemy(id).unwrap().health, 100);
        assert_eq!(store.bullets().len(), 1);

        store.create_bullet(enemy + Vec3::X * 0.9, Vec3::X, 0.0, 30, true);
        ProjectileSystem::update(&mut store, 0.016);
        assert_eq!(store.enemy(id).unwrap().health, 70);
        assert_eq!(store.bullets().len(), 1);
    }

    #[test]
    fn first_enemy_in_order_takes_the_hit() {
        let mut store = arena();
        let first = store.spawn_enemy("basic", Vec3::new(0.5, 1.0, -5.0));
        let second = store.spawn_enemy("basic", Vec3::new(0.0, 1.0, -5.0));

        store.create_bullet(Vec3::new(0.0, 1.0, -5.0), Vec3::NEG_Z, 0.0, 25, true);
        ProjectileSystem::update(&mut store, 0.016);

        assert_eq!(store.enemy(first).unwrap().health, 75);
        assert_eq!(store.enemy(second).unwrap().health, 100);
    }

    #[test]
    fn lethal_hit_reports_elimination() {
        let mut store = arena();
        let id = store.spawn_enemy("sniper", Vec3::new(0.0, 1.0, -3.0));
        store.create_bullet(Vec3::new(0.0, 1.0, -3.0), Vec3::NEG_Z, 0.0, 100, true);

        let eliminated = ProjectileSystem::update(&mut store, 0.016);
        assert_eq!(eliminated, vec![id]);
        assert!(store.enemies().is_empty());
        assert_eq!(store.player().kills, 1);
    }

    #[test]
    fn enemy_bullet_damages_player_only() {
        let mut store = arena();
        let enemy = store.spawn_enemy("basic", Vec3::new(0.0, 1.0, -0.5));
        store.create_bullet(Vec3::new(0.0, 1.0, -0.5), Vec3::Z, 0.0, 10, false);

        ProjectileSystem::update(&mut store, 0.016);
        assert_eq!(store.player().health, 90);
        assert_eq!(store.enemy(enemy).unwrap().health, 100);
        assert!(store.bullets().is_empty());
    }

    #[test]
    fn bullet_below_ground_is_removed() {
        let mut store = arena();
        store.create_bullet(Vec3::new(20.0, 0.05, 20.0), Vec3::NEG_Y, 10.0, 10, true);
        ProjectileSystem::update(&mut store, 0.016);
        assert!(store.bullets().is_empty());
    }

    #[test]
    fn bullet_expires_after_five_seconds() {
        let mut store = arena();
        store.create_bullet(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 30.0, 10, true);

        for _ in 0..20 {
            ProjectileSystem::update(&mut store, 0.25);
        }
        assert_eq!(store.bullets().len(), 1);

        ProjectileSystem::update(&mut store, 0.25);
        assert!(store.bullets().is_empty());
    }
}
