//! In-flight bullets and the slot pool that owns them

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seconds a bullet may fly before it is discarded
pub const BULLET_MAX_LIFETIME: f32 = 5.0;
/// Hit sphere radius around targets
pub const HIT_RADIUS: f32 = 1.0;
/// Bullets below this height hit the ground
pub const GROUND_LEVEL: f32 = 0.0;

/// Active bullet in the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: Uuid,
    pub position: Vec3,
    /// Unit vector
    pub direction: Vec3,
    /// World units per second
    pub speed: f32,
    pub damage: u32,
    /// Player bullets hit enemies; the rest hit the player
    pub from_player: bool,
    /// Seconds in flight
    pub age: f32,
}

impl Bullet {
    pub fn new(position: Vec3, direction: Vec3, speed: f32, damage: u32, from_player: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            direction,
            speed,
            damage,
            from_player,
            age: 0.0,
        }
    }

    /// Age and move the bullet, returns false once it has outlived its lifetime
    pub fn advance(&mut self, dt: f32) -> bool {
        self.age += dt;
        if self.age > BULLET_MAX_LIFETIME {
            return false;
        }
        self.position += self.direction * self.speed * dt;
        true
    }

    /// Sphere test against a target centre
    pub fn hits(&self, target: Vec3) -> bool {
        self.position.distance_squared(target) < HIT_RADIUS * HIT_RADIUS
    }

    pub fn below_ground(&self) -> bool {
        self.position.y < GROUND_LEVEL
    }
}

/// Handle to a pool slot. The generation guards against a reused slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulletKey {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    bullet: Option<Bullet>,
}

/// Slot-indexed bullet storage with slot reuse
#[derive(Debug, Default)]
pub struct BulletPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl BulletPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bullet: Bullet) -> BulletKey {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.bullet = Some(bullet);
            return BulletKey {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            bullet: Some(bullet),
        });
        BulletKey {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, key: BulletKey) -> Option<&Bullet> {
        self.slots
            .get(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.bullet.as_ref())
    }

    pub fn get_mut(&mut self, key: BulletKey) -> Option<&mut Bullet> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.bullet.as_mut())
    }

    /// Remove a bullet and release its slot
    pub fn remove(&mut self, key: BulletKey) -> Option<Bullet> {
        let slot = self.slots.get_mut(key.index as usize)?;
        if slot.generation != key.generation {
            return None;
        }
        let bullet = slot.bullet.take()?;
        self.free.push(key.index);
        self.live -= 1;
        Some(bullet)
    }

    /// Keys of live bullets in slot order
    pub fn keys(&self) -> Vec<BulletKey> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.bullet.is_some())
            .map(|(index, slot)| BulletKey {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter_map(|slot| slot.bullet.as_ref())
    }

    /// Drop all bullets but keep the allocation
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.bullet.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.live = 0;
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocated slots, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet_at(x: f32) -> Bullet {
        Bullet::new(Vec3::new(x, 1.0, 0.0), Vec3::NEG_Z, 10.0, 5, true)
    }

    #[test]
    fn removed_slots_are_reused() {
        let mut pool = BulletPool::new();
        let a = pool.insert(bullet_at(0.0));
        let _b = pool.insert(bullet_at(1.0));
        assert_eq!(pool.len(), 2);

        pool.remove(a);
        let c = pool.insert(bullet_at(2.0));
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.len(), 2);

        // the stale key must not see the new occupant
        assert!(pool.get(a).is_none());
        assert_eq!(pool.get(c).map(|b| b.position.x), Some(2.0));
    }

    #[test]
    fn clear_invalidates_keys() {
        let mut pool = BulletPool::new();
        let key = pool.insert(bullet_at(0.0));
        pool.clear();
        assert!(pool.is_empty());
        assert!(pool.get(key).is_none());
        assert!(pool.remove(key).is_none());
    }

    #[test]
    fn bullet_expires_after_max_lifetime() {
        let mut bullet = bullet_at(0.0);
        for _ in 0..10 {
            assert!(bullet.advance(0.5));
        }
        assert!(!bullet.advance(0.5));
    }

    #[test]
    fn advance_moves_along_direction() {
        let mut bullet = bullet_at(0.0);
        bullet.advance(0.1);
        assert!((bullet.position.z + 1.0).abs() < 1e-5);
    }
}
