//! Match end conditions observed by the host

use serde::{Deserialize, Serialize};

use super::store::GameStore;

/// Why a match should end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    PlayerKilled,
    TimeUp,
    ScoreLimit,
}

/// Reads the store and decides whether the match is over. The store never
/// ends a match on its own; the host calls `end_game` on a reason.
pub struct MatchRules;

impl MatchRules {
    pub fn evaluate(store: &GameStore) -> Option<EndReason> {
        if !store.phase().is_simulating() {
            return None;
        }

        let player = store.player();
        if !player.is_alive() {
            return Some(EndReason::PlayerKilled);
        }
        if store.timer_expired() {
            return Some(EndReason::TimeUp);
        }
        match store.mode().score_limit {
            Some(limit) if player.kills >= limit => Some(EndReason::ScoreLimit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameplayConfig;
    use crate::game::store::LOADING_DELAY;

    fn playing(mode: &str) -> GameStore {
        let mut store = GameStore::new(GameplayConfig::default(), 9);
        store.start_game("training", mode);
        store.advance_clock(LOADING_DELAY);
        store
    }

    #[test]
    fn quiet_match_continues() {
        assert_eq!(MatchRules::evaluate(&playing("deathmatch")), None);
    }

    #[test]
    fn death_ends_match() {
        let mut store = playing("training");
        store.damage_player(100);
        assert_eq!(MatchRules::evaluate(&store), Some(EndReason::PlayerKilled));
    }

    #[test]
    fn expired_timer_ends_match() {
        let mut store = playing("destroy");
        store.tick_timer(121.0);
        assert_eq!(MatchRules::evaluate(&store), Some(EndReason::TimeUp));
    }

    #[test]
    fn kill_limit_ends_match() {
        let mut store = playing("deathmatch");
        for _ in 0..30 {
            let id = store.spawn_enemy("basic", glam::Vec3::ZERO);
            store.damage_enemy(id, 100);
        }
        assert_eq!(MatchRules::evaluate(&store), Some(EndReason::ScoreLimit));
    }

    #[test]
    fn ended_match_is_not_reevaluated() {
        let mut store = playing("training");
        store.damage_player(100);
        store.end_game();
        assert_eq!(MatchRules::evaluate(&store), None);
    }
}
