//! Frame composition.
//!
//! The game never draws anything itself. It hands a [`Canvas`] the pieces of
//! the frame in a fixed back-to-front order and lets the canvas decide what
//! pixels or terminal cells they become.

use std::io;

use crate::entities::{Alien, Bullet, Button, Ship};
use crate::scoreboard::Scoreboard;
use crate::settings::{Rgb, Settings};

pub trait Canvas {
    /// Clear the whole frame to the background colour.
    fn fill(&mut self, color: Rgb) -> io::Result<()>;
    fn draw_bullet(&mut self, bullet: &Bullet, color: Rgb) -> io::Result<()>;
    fn draw_ship(&mut self, ship: &Ship, color: Rgb) -> io::Result<()>;
    fn draw_alien(&mut self, alien: &Alien, color: Rgb) -> io::Result<()>;
    fn draw_scoreboard(&mut self, sb: &Scoreboard) -> io::Result<()>;
    fn draw_button(&mut self, button: &Button, color: Rgb, text_color: Rgb) -> io::Result<()>;
    /// Make the finished frame visible.
    fn flip(&mut self) -> io::Result<()>;
}

/// Everything a frame shows, borrowed from the game.
pub struct Frame<'a> {
    pub settings: &'a Settings,
    pub game_active: bool,
    pub scoreboard: &'a Scoreboard,
    pub ship: &'a Ship,
    pub aliens: &'a [Alien],
    pub bullets: &'a [Bullet],
    pub play_button: &'a Button,
}

/// Draw one frame: background, bullets (behind everything else), ship,
/// aliens, scoreboard, the Play button while no game runs, then flip.
pub fn update_screen(canvas: &mut dyn Canvas, frame: &Frame<'_>) -> io::Result<()> {
    let settings = frame.settings;
    canvas.fill(settings.bg_color)?;

    for bullet in frame.bullets {
        canvas.draw_bullet(bullet, settings.bullet_color)?;
    }
    canvas.draw_ship(frame.ship, settings.ship_color)?;
    for alien in frame.aliens {
        canvas.draw_alien(alien, settings.alien_color)?;
    }

    canvas.draw_scoreboard(frame.scoreboard)?;

    if !frame.game_active {
        canvas.draw_button(frame.play_button, settings.button_color, settings.button_text_color)?;
    }

    canvas.flip()
}
