//! Game simulation modules

pub mod autopilot;
pub mod bullets;
pub mod combat;
pub mod enemy_ai;
pub mod events;
pub mod input;
pub mod phase;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod rules;
pub mod runner;
pub mod schedule;
pub mod simulation;
pub mod snapshot;
pub mod store;

pub use autopilot::Autopilot;
pub use events::{BulletExpiry, EnemyDamage, GameEvent};
pub use input::{ControlInput, KeyState, TouchActions, TouchInput};
pub use phase::GamePhase;
pub use rules::{EndReason, MatchRules};
pub use runner::{MatchCommand, MatchHandle, MatchRunner, RunSummary, RunnerError, RunnerMsg};
pub use simulation::Simulation;
pub use snapshot::MatchSnapshot;
pub use store::{EnemyState, GameStore, PlayerState};
