//! Match phase and its transition table

use serde::{Deserialize, Serialize};

/// Top-level state of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No match running
    #[default]
    Menu,
    /// Match reset, waiting for the loading delay to elapse
    Loading,
    /// Simulation running
    Playing,
    /// Simulation frozen
    Paused,
    /// Match finished; entities are kept until the next start
    GameOver,
}

impl GamePhase {
    /// Whether `next` is a documented transition from this phase.
    ///
    /// Starting or restarting a match is legal from every phase since it
    /// discards whatever was in flight.
    pub fn can_transition_to(self, next: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, next),
            (_, Loading)
                | (Loading, Playing)
                | (Paused, Playing)
                | (Playing, Paused)
                | (Playing, GameOver)
                | (Paused, GameOver)
                | (GameOver, GameOver)
        )
    }

    /// Whether the per-frame simulation runs in this phase
    pub fn is_simulating(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Whether the match clock (and deferred tasks) advance in this phase
    pub fn advances_clock(self) -> bool {
        matches!(self, Self::Loading | Self::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::GamePhase::*;
    use super::*;

    #[test]
    fn happy_path_is_allowed() {
        assert!(Menu.can_transition_to(Loading));
        assert!(Loading.can_transition_to(Playing));
        assert!(Playing.can_transition_to(Paused));
        assert!(Paused.can_transition_to(Playing));
        assert!(Playing.can_transition_to(GameOver));
        assert!(GameOver.can_transition_to(Loading));
    }

    #[test]
    fn pausing_outside_play_is_not_in_table() {
        assert!(!Menu.can_transition_to(Paused));
        assert!(!GameOver.can_transition_to(Paused));
        assert!(!Loading.can_transition_to(Paused));
        assert!(!Menu.can_transition_to(Playing));
        assert!(!Menu.can_transition_to(GameOver));
    }

    #[test]
    fn only_playing_simulates() {
        assert!(Playing.is_simulating());
        assert!(!Paused.is_simulating());
        assert!(Loading.advances_clock());
        assert!(!Paused.advances_clock());
    }
}
