//! Per-game statistics.

use crate::scoreboard::Scoreboard;
use crate::settings::Settings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    /// Best score of this process; never reset.
    pub high_score: u32,
    pub level: u32,
    pub game_active: bool,
}

impl GameStats {
    /// Fresh stats for an inactive game waiting on the Play button.
    pub fn new(settings: &Settings) -> Self {
        let mut stats = Self {
            ships_left: 0,
            score: 0,
            high_score: 0,
            level: 1,
            game_active: false,
        };
        stats.reset_stats(settings);
        stats
    }

    /// Reinitialise everything that changes during a game.
    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }
}

/// Record a new high score and refresh its display.
pub fn check_high_score(stats: &mut GameStats, sb: &mut Scoreboard) {
    if stats.score > stats.high_score {
        stats.high_score = stats.score;
        sb.prep_high_score(stats);
    }
}
