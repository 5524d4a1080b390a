//! Game mode rule sets

use serde::Serialize;

use super::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Rules applied to a match. Immutable for the lifetime of the match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameMode {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Seconds; `None` means no limit
    pub time_limit: Option<f32>,
    /// Kills; `None` means no limit
    pub score_limit: Option<u32>,
    pub respawn_enabled: bool,
    pub respawn_time: Option<f32>,
    /// Declared by the mode but not consulted by hit resolution
    pub friendly_fire: bool,
    /// Bots spawned when the match begins
    pub enemy_count: Option<u32>,
    pub difficulty: Difficulty,
    pub team_based: bool,
}

/// Look up a game mode by id
pub fn mode(id: &str) -> Result<&'static GameMode, ContentError> {
    MODES
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| ContentError::UnknownMode(id.to_string()))
}

/// Every game mode
pub static MODES: &[GameMode] = &[
    GameMode {
        id: "deathmatch",
        name: "Deathmatch",
        description: "Everyone for themselves. Highest score wins.",
        time_limit: Some(600.0),
        score_limit: Some(30),
        respawn_enabled: true,
        respawn_time: Some(5.0),
        friendly_fire: true,
        // the client is single-player, so deathmatch is played against bots
        enemy_count: Some(5),
        difficulty: Difficulty::Medium,
        team_based: false,
    },
    GameMode {
        id: "teamDeathmatch",
        name: "Team Deathmatch",
        description: "Two teams face off. Highest team score wins.",
        time_limit: Some(600.0),
        score_limit: Some(50),
        respawn_enabled: true,
        respawn_time: Some(5.0),
        friendly_fire: false,
        enemy_count: None,
        difficulty: Difficulty::Medium,
        team_based: true,
    },
    GameMode {
        id: "destroy",
        name: "Destruction",
        description: "One team plants the bomb, the other defends. Roles alternate each round.",
        time_limit: Some(120.0),
        score_limit: None,
        respawn_enabled: false,
        respawn_time: None,
        friendly_fire: false,
        enemy_count: None,
        difficulty: Difficulty::Hard,
        team_based: true,
    },
    GameMode {
        id: "conquest",
        name: "Conquest",
        description: "Capture and hold control points. First team to the score limit wins.",
        time_limit: Some(900.0),
        score_limit: Some(200),
        respawn_enabled: true,
        respawn_time: Some(6.0),
        friendly_fire: false,
        enemy_count: None,
        difficulty: Difficulty::Medium,
        team_based: true,
    },
    GameMode {
        id: "escort",
        name: "Escort",
        description: "Escort the VIP to extraction while the other team hunts them.",
        time_limit: Some(300.0),
        score_limit: None,
        respawn_enabled: false,
        respawn_time: None,
        friendly_fire: false,
        enemy_count: None,
        difficulty: Difficulty::Hard,
        team_based: true,
    },
    GameMode {
        id: "freeForAll",
        name: "Free For All",
        description: "Chaotic mode without teams. Rack up as many eliminations as you can.",
        time_limit: Some(600.0),
        score_limit: Some(40),
        respawn_enabled: true,
        respawn_time: Some(3.0),
        friendly_fire: true,
        enemy_count: None,
        difficulty: Difficulty::Medium,
        team_based: false,
    },
    GameMode {
        id: "zombieMode",
        name: "Zombie Mode",
        description: "Survive the horde. Eliminated players join the zombies.",
        time_limit: Some(600.0),
        score_limit: None,
        respawn_enabled: true,
        respawn_time: Some(8.0),
        friendly_fire: false,
        enemy_count: Some(20),
        difficulty: Difficulty::Hard,
        team_based: true,
    },
    GameMode {
        id: "training",
        name: "Training",
        description: "Practice against stationary targets.",
        time_limit: None,
        score_limit: None,
        respawn_enabled: true,
        respawn_time: Some(2.0),
        friendly_fire: false,
        enemy_count: Some(5),
        difficulty: Difficulty::Easy,
        team_based: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_spawns_five_and_has_no_clock() {
        let training = mode("training").unwrap();
        assert_eq!(training.enemy_count, Some(5));
        assert_eq!(training.time_limit, None);
    }

    #[test]
    fn deathmatch_has_ten_minute_limit() {
        assert_eq!(mode("deathmatch").unwrap().time_limit, Some(600.0));
    }
}
