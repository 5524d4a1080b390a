//! Point Blank gameplay simulation core
//!
//! A single-player arena shooter match: the authoritative `GameStore`, the
//! per-frame player, enemy and projectile simulations that mutate it, and a
//! tokio host that runs matches on a fixed-rate frame loop.

pub mod config;
pub mod content;
pub mod game;
pub mod util;
