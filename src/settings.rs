//! Tunable parameters and the dynamic state that escalates with each level.
//!
//! The static half is what a settings file may override; the dynamic half
//! (current speeds, fleet direction, points per alien) is never read from
//! disk and is rebuilt by [`Settings::initialize_dynamic_settings`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fleet;

/// An opaque RGB triple, written as `[r, g, b]` in TOML.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Horizontal heading of the whole fleet. Only two values exist, so the
/// "direction is ±1" rule cannot be broken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FleetDirection {
    Left,
    #[default]
    Right,
}

impl FleetDirection {
    /// `1.0` when moving right, `-1.0` when moving left.
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Left => -1.0,
            FleetDirection::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Left => FleetDirection::Right,
            FleetDirection::Right => FleetDirection::Left,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Rgb,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_width: i32,
    pub ship_height: i32,
    pub ship_color: Rgb,
    pub ship_speed_base: f32,
    /// Ships granted at the start of a game.
    pub ship_limit: u32,
    /// Pause after losing a ship, in milliseconds.
    pub respawn_delay_ms: u64,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Rgb,
    pub bullet_speed_base: f32,
    pub bullets_allowed: usize,

    // ── Aliens ───────────────────────────────────────────────────────────────
    pub alien_width: i32,
    pub alien_height: i32,
    pub alien_color: Rgb,
    pub alien_speed_base: f32,
    pub fleet_drop_speed: i32,
    pub alien_points_base: u32,

    // ── Play button ──────────────────────────────────────────────────────────
    pub button_width: i32,
    pub button_height: i32,
    pub button_color: Rgb,
    pub button_text_color: Rgb,

    // ── Escalation ───────────────────────────────────────────────────────────
    /// How quickly the game speeds up on each new level.
    pub speedup_scale: f32,
    /// How quickly alien point values increase.
    pub score_scale: f32,

    // ── Dynamic state ────────────────────────────────────────────────────────
    #[serde(skip)]
    pub ship_speed_factor: f32,
    #[serde(skip)]
    pub bullet_speed_factor: f32,
    #[serde(skip)]
    pub alien_speed_factor: f32,
    #[serde(skip)]
    pub fleet_direction: FleetDirection,
    #[serde(skip)]
    pub alien_points: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: 800,
            screen_height: 600,
            bg_color: Rgb(8, 8, 24),

            ship_width: 60,
            ship_height: 48,
            ship_color: Rgb(220, 220, 230),
            ship_speed_base: 1.5,
            ship_limit: 3,
            respawn_delay_ms: 500,

            bullet_width: 3,
            bullet_height: 15,
            bullet_color: Rgb(255, 220, 60),
            bullet_speed_base: 3.0,
            bullets_allowed: 3,

            alien_width: 60,
            alien_height: 58,
            alien_color: Rgb(90, 230, 120),
            alien_speed_base: 1.0,
            fleet_drop_speed: 10,
            alien_points_base: 50,

            button_width: 200,
            button_height: 50,
            button_color: Rgb(0, 200, 0),
            button_text_color: Rgb(255, 255, 255),

            speedup_scale: 1.1,
            score_scale: 1.5,

            ship_speed_factor: 0.0,
            bullet_speed_factor: 0.0,
            alien_speed_factor: 0.0,
            fleet_direction: FleetDirection::Right,
            alien_points: 0,
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    /// Read a TOML settings file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings = toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.initialize_dynamic_settings();
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the game loop cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive_dims = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("button_width", self.button_width),
            ("button_height", self.button_height),
        ];
        for (field, value) in positive_dims {
            if value <= 0 {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let positive_factors = [
            ("ship_speed_base", self.ship_speed_base),
            ("bullet_speed_base", self.bullet_speed_base),
            ("alien_speed_base", self.alien_speed_base),
            ("speedup_scale", self.speedup_scale),
            ("score_scale", self.score_scale),
        ];
        for (field, value) in positive_factors {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be a positive number, got {value}")));
            }
        }

        if self.fleet_drop_speed < 0 {
            return Err(invalid("fleet_drop_speed", "must not be negative".to_string()));
        }
        if self.bullets_allowed == 0 {
            return Err(invalid("bullets_allowed", "must allow at least one bullet".to_string()));
        }

        let sprites_on_screen = [
            ("ship_width", self.ship_width, self.screen_width),
            ("ship_height", self.ship_height, self.screen_height),
            ("bullet_width", self.bullet_width, self.screen_width),
            ("bullet_height", self.bullet_height, self.screen_height),
            ("alien_width", self.alien_width, self.screen_width),
            ("alien_height", self.alien_height, self.screen_height),
        ];
        for (field, value, screen) in sprites_on_screen {
            if value > screen {
                return Err(invalid(
                    field,
                    format!("{value} does not fit on a {screen}px screen"),
                ));
            }
        }

        // A level with no aliens would be cleared again on every tick.
        if fleet::number_aliens_x(self, self.alien_width) == 0 {
            return Err(invalid(
                "screen_width",
                format!("too narrow to fit a single {}px alien", self.alien_width),
            ));
        }
        if fleet::number_rows(self, self.ship_height, self.alien_height) == 0 {
            return Err(invalid(
                "screen_height",
                "too short to fit a single row of aliens above the ship".to_string(),
            ));
        }
        Ok(())
    }

    /// Reset speeds, points and heading to their start-of-game values.
    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed_factor = self.ship_speed_base;
        self.bullet_speed_factor = self.bullet_speed_base;
        self.alien_speed_factor = self.alien_speed_base;
        self.fleet_direction = FleetDirection::Right;
        self.alien_points = self.alien_points_base;
    }

    /// Level-up escalation: speeds by `speedup_scale`, points by `score_scale`.
    pub fn increase_speed(&mut self) {
        self.ship_speed_factor *= self.speedup_scale;
        self.bullet_speed_factor *= self.speedup_scale;
        self.alien_speed_factor *= self.speedup_scale;
        self.alien_points = (self.alien_points as f32 * self.score_scale) as u32;
    }

    pub fn respawn_delay(&self) -> Duration {
        Duration::from_millis(self.respawn_delay_ms)
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}
