//! Player input sent from the host to the simulation.
//!
//! Continuous input (`FrameInput`) is sampled every tick. Discrete key/button
//! presses arrive as `PlayerCommand`s and are processed at the next tick
//! boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Discrete player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Begin (or restart) a run.
    StartRun,
    /// Pick the difficulty for the next run. Ignored while running.
    SetDifficulty { profile: DifficultyProfile },

    // --- Shop ---
    /// Show or hide the shop overlay.
    ToggleShop,
    /// Escape: cancel a pending placement and hide the shop.
    Cancel,
    /// Buy an item; the cost is debited immediately and placement begins.
    BuyItem { item: ShopItem },
    /// Commit the pending placement at a world point.
    ConfirmPlacement { position: Position },
    /// Abort the pending placement (secondary pointer button).
    CancelPlacement,
}

/// Movement intent derived from the four directional keys.
/// Components are -1, 0 or 1 before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub x: f32,
    pub y: f32,
}

impl MoveIntent {
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut x = 0.0;
        let mut y = 0.0;
        if left {
            x -= 1.0;
        }
        if right {
            x += 1.0;
        }
        if up {
            y -= 1.0;
        }
        if down {
            y += 1.0;
        }
        Self { x, y }
    }
}

/// Continuous input sampled once per tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameInput {
    pub movement: MoveIntent,
    /// Pointer position in world coordinates.
    pub pointer: Position,
    /// Primary pointer button held.
    pub pointer_down: bool,
}
