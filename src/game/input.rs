//! Per-frame control input produced by the keyboard/touch adapter

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete touch-button state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchActions {
    pub shooting: bool,
    pub aiming: bool,
    pub reloading: bool,
    pub jumping: bool,
    pub crouching: bool,
}

/// Virtual joystick and look-drag state. Sensitivity is already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    /// Each axis in [-1, 1]; y is forward/back on the ground plane
    pub movement: Vec2,
    /// Look delta for this frame
    pub camera: Vec2,
    pub actions: TouchActions,
}

/// Raw keyboard state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub leftward: bool,
    pub rightward: bool,
    pub jump: bool,
    pub sprint: bool,
    pub crouch: bool,
    pub shoot: bool,
    pub aim: bool,
    pub reload: bool,
    /// Number key pressed this frame (0-based slot)
    pub weapon_slot: Option<usize>,
}

impl KeyState {
    /// Digital movement axes: x right, y back (forward is -1)
    pub fn movement(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.forward {
            axes.y -= 1.0;
        }
        if self.backward {
            axes.y += 1.0;
        }
        if self.leftward {
            axes.x -= 1.0;
        }
        if self.rightward {
            axes.x += 1.0;
        }
        axes
    }
}

/// Everything the player simulation reads in a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub keys: KeyState,
    pub touch: TouchInput,
}

impl ControlInput {
    pub fn shooting(&self) -> bool {
        self.keys.shoot || self.touch.actions.shooting
    }

    pub fn reloading(&self) -> bool {
        self.keys.reload || self.touch.actions.reloading
    }

    pub fn jumping(&self) -> bool {
        self.keys.jump || self.touch.actions.jumping
    }

    pub fn crouching(&self) -> bool {
        self.keys.crouch || self.touch.actions.crouching
    }

    /// Sprint key or touch aim both select run speed
    pub fn running(&self) -> bool {
        self.keys.sprint || self.touch.actions.aiming
    }
}
