//! Pre-formatted scoreboard text.
//!
//! The `prep_*` calls are made only when the underlying number changes, so a
//! frame never re-formats anything; the canvas just draws what is here.

use crate::stats::GameStats;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    /// Number of reserve-ship icons to draw.
    pub ships: u32,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut sb = Self::default();
        sb.prep_score(stats);
        sb.prep_high_score(stats);
        sb.prep_level(stats);
        sb.prep_ships(stats);
        sb
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = group_thousands(round_to_ten(stats.score));
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = group_thousands(round_to_ten(stats.high_score));
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships = stats.ships_left;
    }
}

/// Nearest multiple of ten; a tie goes to the even ten (`125` → `120`).
fn round_to_ten(n: u32) -> u32 {
    let (tens, ones) = (n / 10, n % 10);
    if ones > 5 || (ones == 5 && tens % 2 == 1) {
        (tens + 1).saturating_mul(10)
    } else {
        tens * 10
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
