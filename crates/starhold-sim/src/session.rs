//! Per-run session context owned by the engine.

use starhold_core::enums::DifficultyProfile;
use starhold_core::state::COUNTDOWN_PLACEHOLDER;

pub const IDLE_MESSAGE: &str = "Press Start to begin";
pub const RUN_START_MESSAGE: &str = "Survive. Build your base. Waves come every 5-10 minutes.";
pub const DYING_MESSAGE: &str = "You died. Restarting...";
pub const DEATH_MESSAGE: &str = "You died. Press Start to play again.";
pub const REPAIR_NO_WALL_MESSAGE: &str = "No wall nearby to repair";

#[derive(Debug, Clone)]
pub struct Session {
    pub running: bool,
    /// Difficulty for the current run, or the next one when not running.
    pub difficulty: DifficultyProfile,
    /// Latest status line for the HUD.
    pub message: String,
    /// Countdown text, refreshed by the countdown poll.
    pub countdown: String,
    /// Hull reached zero and the reset timer is armed.
    pub death_pending: bool,
}

impl Session {
    pub fn new(difficulty: DifficultyProfile) -> Self {
        Self {
            running: false,
            difficulty,
            message: IDLE_MESSAGE.to_string(),
            countdown: COUNTDOWN_PLACEHOLDER.to_string(),
            death_pending: false,
        }
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }
}
