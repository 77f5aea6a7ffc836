//! Game state snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::VisualEffect;
use crate::types::{Position, SimTime};

/// Placeholder shown when no wave is counting down.
pub const COUNTDOWN_PLACEHOLDER: &str = "--:--";

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub running: bool,
    pub hud: HudView,
    pub entities: Vec<EntityView>,
    pub effects: Vec<VisualEffect>,
    pub shop_open: bool,
    pub placement: Option<PlacementGhostView>,
}

/// Values for the heads-up display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudView {
    pub gems: u32,
    pub wave: u32,
    /// Shield as a percentage, 0..=100.
    pub shield_pct: f32,
    pub hull_hits: u32,
    pub message: String,
    /// `mm:ss` until the next wave, or [`COUNTDOWN_PLACEHOLDER`].
    pub countdown: String,
}

impl Default for HudView {
    fn default() -> Self {
        Self {
            gems: 0,
            wave: 0,
            shield_pct: 0.0,
            hull_hits: 0,
            message: String::new(),
            countdown: COUNTDOWN_PLACEHOLDER.to_string(),
        }
    }
}

/// One drawable entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: SpriteKind,
    pub position: Position,
    pub rotation: f32,
}

/// Ghost sprite that follows the pointer while a placement is pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementGhostView {
    pub item: ShopItem,
    pub position: Position,
    /// False tints the ghost red.
    pub valid: bool,
}

/// Format seconds remaining as `mm:ss`, rounding partial seconds up.
pub fn format_countdown(secs_left: f64) -> String {
    let secs = secs_left.max(0.0).ceil() as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
