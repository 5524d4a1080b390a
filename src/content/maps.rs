//! Map definitions: spawn points and static geometry descriptors

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use glam::Vec3;
use serde::Serialize;

use super::modes::Difficulty;
use super::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapObjectKind {
    Box,
    Cylinder,
    Plane,
}

/// Static geometry descriptor. Consumed by the renderer only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapObject {
    pub kind: MapObjectKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub texture: Option<&'static str>,
    pub is_collider: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Width and length in world units
    pub size: (f32, f32),
    pub difficulty: Difficulty,
    /// Player start; its Y is also the floor height for the player
    pub player_spawn: Vec3,
    pub enemy_spawns: &'static [Vec3],
    pub objects: &'static [MapObject],
    /// 0-1 scale
    pub ambient_light: f32,
}

/// Look up a map by id
pub fn map(id: &str) -> Result<&'static MapDefinition, ContentError> {
    MAPS.iter()
        .find(|m| m.id == id)
        .ok_or_else(|| ContentError::UnknownMap(id.to_string()))
}

const GROUND_PITCH: f32 = -FRAC_PI_2;

const fn ground(half_extent: f32, texture: &'static str) -> MapObject {
    MapObject {
        kind: MapObjectKind::Plane,
        position: Vec3::ZERO,
        rotation: Vec3::new(GROUND_PITCH, 0.0, 0.0),
        scale: Vec3::new(half_extent, half_extent, 1.0),
        texture: Some(texture),
        is_collider: true,
    }
}

const fn solid(
    kind: MapObjectKind,
    position: Vec3,
    yaw: f32,
    scale: Vec3,
    texture: &'static str,
) -> MapObject {
    MapObject {
        kind,
        position,
        rotation: Vec3::new(0.0, yaw, 0.0),
        scale,
        texture: Some(texture),
        is_collider: true,
    }
}

/// Every playable map
pub static MAPS: &[MapDefinition] = &[
    MapDefinition {
        id: "training",
        name: "Training Ground",
        description: "Flat practice range with a row of target lanes.",
        size: (60.0, 60.0),
        difficulty: Difficulty::Easy,
        player_spawn: Vec3::new(0.0, 1.0, 0.0),
        enemy_spawns: &[
            Vec3::new(-8.0, 0.0, -15.0),
            Vec3::new(-4.0, 0.0, -15.0),
            Vec3::new(0.0, 0.0, -15.0),
            Vec3::new(4.0, 0.0, -15.0),
            Vec3::new(8.0, 0.0, -15.0),
        ],
        objects: &[
            ground(30.0, "grass.png"),
            solid(MapObjectKind::Box, Vec3::new(0.0, 0.5, -10.0), 0.0, Vec3::new(20.0, 1.0, 0.5), "wood.jpg"),
        ],
        ambient_light: 0.8,
    },
    MapDefinition {
        id: "downtown",
        name: "Downtown",
        description: "Urban map with streets, buildings and tunnels.",
        size: (100.0, 100.0),
        difficulty: Difficulty::Medium,
        player_spawn: Vec3::new(0.0, 1.0, 0.0),
        enemy_spawns: &[
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(-10.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(20.0, 0.0, 20.0),
            Vec3::new(-20.0, 0.0, -20.0),
        ],
        objects: &[
            ground(50.0, "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(15.0, 5.0, 15.0), 0.0, Vec3::new(8.0, 10.0, 8.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(-15.0, 5.0, -15.0), 0.0, Vec3::new(8.0, 10.0, 8.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(0.0, 1.0, 0.0), FRAC_PI_4, Vec3::new(30.0, 0.2, 5.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(0.0, 2.0, 20.0), 0.0, Vec3::new(5.0, 4.0, 20.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(8.0, 1.0, 8.0), FRAC_PI_6, Vec3::new(1.0, 2.0, 4.0), "wood.jpg"),
            solid(MapObjectKind::Cylinder, Vec3::new(12.0, 1.5, -12.0), 0.0, Vec3::new(1.5, 1.5, 1.5), "asphalt.png"),
        ],
        ambient_light: 0.7,
    },
    MapDefinition {
        id: "crackdown",
        name: "Crackdown",
        description: "Military facility with levels and catwalks. Close to mid range combat.",
        size: (80.0, 80.0),
        difficulty: Difficulty::Medium,
        player_spawn: Vec3::new(0.0, 1.0, 15.0),
        enemy_spawns: &[
            Vec3::new(15.0, 0.0, -15.0),
            Vec3::new(-15.0, 0.0, -15.0),
            Vec3::new(15.0, 5.0, 0.0),
            Vec3::new(-15.0, 5.0, 0.0),
            Vec3::new(0.0, 10.0, -20.0),
        ],
        objects: &[
            ground(40.0, "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(15.0, 2.5, 0.0), 0.0, Vec3::new(10.0, 5.0, 10.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(-15.0, 2.5, 0.0), 0.0, Vec3::new(10.0, 5.0, 10.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(0.0, 5.0, -20.0), 0.0, Vec3::new(20.0, 10.0, 6.0), "asphalt.png"),
        ],
        ambient_light: 0.6,
    },
    MapDefinition {
        id: "luxville",
        name: "Luxville",
        description: "Upscale residential area with mansions, pools and gardens.",
        size: (120.0, 120.0),
        difficulty: Difficulty::Medium,
        player_spawn: Vec3::new(0.0, 1.0, 20.0),
        enemy_spawns: &[
            Vec3::new(20.0, 0.0, -20.0),
            Vec3::new(-20.0, 0.0, -20.0),
            Vec3::new(20.0, 0.0, 0.0),
            Vec3::new(-20.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, -20.0),
        ],
        objects: &[
            ground(60.0, "grass.png"),
            solid(MapObjectKind::Box, Vec3::new(0.0, 5.0, -20.0), 0.0, Vec3::new(16.0, 10.0, 12.0), "wood.jpg"),
            solid(MapObjectKind::Cylinder, Vec3::new(10.0, 1.5, 10.0), 0.0, Vec3::new(1.5, 3.0, 1.5), "asphalt.png"),
        ],
        ambient_light: 0.8,
    },
    MapDefinition {
        id: "midtown",
        name: "Midtown",
        description: "Shopping center with stores, corridors and open areas. Ideal for ambushes.",
        size: (100.0, 100.0),
        difficulty: Difficulty::Hard,
        player_spawn: Vec3::new(0.0, 1.0, 20.0),
        enemy_spawns: &[
            Vec3::new(15.0, 0.0, -15.0),
            Vec3::new(-15.0, 0.0, -15.0),
            Vec3::new(15.0, 0.0, 0.0),
            Vec3::new(-15.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -15.0),
        ],
        objects: &[
            ground(50.0, "asphalt.png"),
            solid(MapObjectKind::Cylinder, Vec3::new(0.0, 3.0, 0.0), 0.0, Vec3::new(4.0, 6.0, 4.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(20.0, 4.0, 0.0), 0.0, Vec3::new(8.0, 8.0, 20.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(-20.0, 4.0, 0.0), 0.0, Vec3::new(8.0, 8.0, 20.0), "asphalt.png"),
        ],
        ambient_light: 0.7,
    },
    MapDefinition {
        id: "dsthouse",
        name: "Dusthouse",
        description: "Desert zone with abandoned, crumbling buildings.",
        size: (120.0, 120.0),
        difficulty: Difficulty::Hard,
        player_spawn: Vec3::new(0.0, 1.0, 20.0),
        enemy_spawns: &[
            Vec3::new(20.0, 0.0, -20.0),
            Vec3::new(-20.0, 0.0, -20.0),
            Vec3::new(20.0, 0.0, 0.0),
            Vec3::new(-20.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -20.0),
        ],
        objects: &[
            ground(60.0, "sand.jpg"),
            solid(MapObjectKind::Box, Vec3::new(0.0, 3.0, 0.0), FRAC_PI_6 / 2.0, Vec3::new(15.0, 6.0, 15.0), "asphalt.png"),
            solid(MapObjectKind::Box, Vec3::new(0.0, 5.0, -50.0), 0.0, Vec3::new(100.0, 10.0, 1.0), "sand.jpg"),
        ],
        ambient_light: 0.9,
    },
];
