//! Alien Invasion: a small Space-Invaders clone.
//!
//! The library holds the game rules and talks to the outside world through
//! three seams: [`render::Canvas`] for drawing, [`audio::Audio`] for sound
//! cues and [`input::InputEvent`] for player input. The binary wires those
//! seams to a crossterm terminal.

pub mod audio;
pub mod collision;
pub mod entities;
pub mod fleet;
pub mod game;
pub mod input;
pub mod render;
pub mod scoreboard;
pub mod settings;
pub mod stats;
pub mod terminal;
