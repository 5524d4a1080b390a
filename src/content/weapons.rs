//! Weapon table

use serde::Serialize;

use super::ContentError;

/// Weapon category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Pistol,
    Rifle,
    Shotgun,
    Sniper,
}

/// Normalized 0-100 stat block shown by the loadout UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeaponStatBlock {
    pub damage: u8,
    pub range: u8,
    pub accuracy: u8,
    pub fire_rate: u8,
    pub mobility: u8,
}

/// Static weapon definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weapon {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: WeaponKind,
    /// Damage per bullet
    pub damage: u32,
    /// Shots per second
    pub fire_rate: f32,
    /// Magazine size; reload restores exactly this many rounds
    pub max_ammo: u32,
    /// Seconds (display only)
    pub reload_time: f32,
    /// 0-1 scale
    pub accuracy: f32,
    /// 0-1 scale
    pub recoil: f32,
    /// World units per second
    pub bullet_speed: f32,
    /// Pellets per shot (shotguns)
    pub pellet_count: u32,
    pub range: f32,
    pub stats: WeaponStatBlock,
}

impl Weapon {
    /// Minimum seconds between two shots at the rated fire rate
    pub fn shot_interval(&self) -> f32 {
        if self.fire_rate > 0.0 {
            1.0 / self.fire_rate
        } else {
            0.0
        }
    }
}

/// Look up a weapon by id
pub fn weapon(id: &str) -> Result<&'static Weapon, ContentError> {
    WEAPONS
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| ContentError::UnknownWeapon(id.to_string()))
}

/// Every weapon in the game
pub static WEAPONS: &[Weapon] = &[
    Weapon {
        id: "k5",
        name: "K-5",
        kind: WeaponKind::Pistol,
        damage: 28,
        fire_rate: 2.8,
        max_ammo: 30,
        reload_time: 1.2,
        accuracy: 0.85,
        recoil: 0.18,
        bullet_speed: 30.0,
        pellet_count: 1,
        range: 45.0,
        stats: WeaponStatBlock { damage: 55, range: 40, accuracy: 75, fire_rate: 35, mobility: 95 },
    },
    Weapon {
        id: "d_eagle",
        name: "D-Eagle",
        kind: WeaponKind::Pistol,
        damage: 35,
        fire_rate: 2.2,
        max_ammo: 28,
        reload_time: 1.6,
        accuracy: 0.82,
        recoil: 0.25,
        bullet_speed: 32.0,
        pellet_count: 1,
        range: 50.0,
        stats: WeaponStatBlock { damage: 65, range: 45, accuracy: 70, fire_rate: 30, mobility: 90 },
    },
    Weapon {
        id: "k2",
        name: "K-2",
        kind: WeaponKind::Rifle,
        damage: 22,
        fire_rate: 10.5,
        max_ammo: 90,
        reload_time: 2.2,
        accuracy: 0.78,
        recoil: 0.38,
        bullet_speed: 40.0,
        pellet_count: 1,
        range: 80.0,
        stats: WeaponStatBlock { damage: 55, range: 70, accuracy: 65, fire_rate: 80, mobility: 65 },
    },
    Weapon {
        id: "ak47",
        name: "AK-47",
        kind: WeaponKind::Rifle,
        damage: 25,
        fire_rate: 9.0,
        max_ammo: 90,
        reload_time: 2.4,
        accuracy: 0.72,
        recoil: 0.45,
        bullet_speed: 38.0,
        pellet_count: 1,
        range: 75.0,
        stats: WeaponStatBlock { damage: 60, range: 65, accuracy: 60, fire_rate: 70, mobility: 60 },
    },
    // SMGs share the rifle category
    Weapon {
        id: "kriss",
        name: "Kriss",
        kind: WeaponKind::Rifle,
        damage: 18,
        fire_rate: 12.5,
        max_ammo: 120,
        reload_time: 1.8,
        accuracy: 0.70,
        recoil: 0.30,
        bullet_speed: 35.0,
        pellet_count: 1,
        range: 60.0,
        stats: WeaponStatBlock { damage: 45, range: 55, accuracy: 60, fire_rate: 90, mobility: 75 },
    },
    Weapon {
        id: "p90",
        name: "P90",
        kind: WeaponKind::Rifle,
        damage: 16,
        fire_rate: 13.2,
        max_ammo: 150,
        reload_time: 2.0,
        accuracy: 0.68,
        recoil: 0.28,
        bullet_speed: 35.0,
        pellet_count: 1,
        range: 55.0,
        stats: WeaponStatBlock { damage: 40, range: 50, accuracy: 55, fire_rate: 95, mobility: 80 },
    },
    Weapon {
        id: "spas12",
        name: "SPAS-12",
        kind: WeaponKind::Shotgun,
        damage: 16,
        fire_rate: 1.5,
        max_ammo: 20,
        reload_time: 2.5,
        accuracy: 0.6,
        recoil: 0.6,
        bullet_speed: 25.0,
        pellet_count: 8,
        range: 20.0,
        stats: WeaponStatBlock { damage: 90, range: 20, accuracy: 30, fire_rate: 20, mobility: 50 },
    },
    Weapon {
        id: "m1887",
        name: "M1887",
        kind: WeaponKind::Shotgun,
        damage: 18,
        fire_rate: 1.2,
        max_ammo: 16,
        reload_time: 2.8,
        accuracy: 0.55,
        recoil: 0.65,
        bullet_speed: 24.0,
        pellet_count: 9,
        range: 18.0,
        stats: WeaponStatBlock { damage: 95, range: 18, accuracy: 25, fire_rate: 15, mobility: 45 },
    },
    Weapon {
        id: "l96a1",
        name: "L96A1",
        kind: WeaponKind::Sniper,
        damage: 120,
        fire_rate: 0.8,
        max_ammo: 10,
        reload_time: 3.2,
        accuracy: 0.95,
        recoil: 0.8,
        bullet_speed: 50.0,
        pellet_count: 1,
        range: 150.0,
        stats: WeaponStatBlock { damage: 100, range: 100, accuracy: 95, fire_rate: 10, mobility: 30 },
    },
    Weapon {
        id: "awm",
        name: "AWM",
        kind: WeaponKind::Sniper,
        damage: 130,
        fire_rate: 0.7,
        max_ammo: 8,
        reload_time: 3.5,
        accuracy: 0.98,
        recoil: 0.85,
        bullet_speed: 55.0,
        pellet_count: 1,
        range: 160.0,
        stats: WeaponStatBlock { damage: 100, range: 100, accuracy: 98, fire_rate: 8, mobility: 25 },
    },
    Weapon {
        id: "cheytac",
        name: "CheyTac M200",
        kind: WeaponKind::Sniper,
        damage: 150,
        fire_rate: 0.6,
        max_ammo: 6,
        reload_time: 4.0,
        accuracy: 0.99,
        recoil: 0.9,
        bullet_speed: 60.0,
        pellet_count: 1,
        range: 180.0,
        stats: WeaponStatBlock { damage: 100, range: 100, accuracy: 100, fire_rate: 5, mobility: 20 },
    },
];
