//! The orchestrator: owns every piece of game state and advances it one tick
//! at a time.
//!
//! A frame is `tick` followed by `render`. Inside `tick` the order is fixed:
//! input, ship, bullets, bullet/alien collisions (with scoring and level-up),
//! fleet edges, alien movement, ship/alien collision, bottom breach.

use std::io;
use std::time::Instant;

use log::{debug, info};

use crate::audio::{Audio, Cue};
use crate::collision::{group_collide, spritecollideany};
use crate::entities::{Alien, Bullet, Button, Ship};
use crate::fleet;
use crate::input::{self, Flow, InputEvent, Key};
use crate::render::{self, Canvas, Frame};
use crate::scoreboard::Scoreboard;
use crate::settings::{Settings, SettingsError};
use crate::stats::{self, GameStats};

pub struct Game {
    pub settings: Settings,
    pub stats: GameStats,
    pub scoreboard: Scoreboard,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub play_button: Button,
    audio: Box<dyn Audio>,
    pointer_visible: bool,
    /// Gameplay is frozen until this instant after losing a ship.
    respawn_until: Option<Instant>,
    /// Input that arrived while frozen, replayed once the pause ends.
    deferred: Vec<InputEvent>,
}

impl Game {
    /// A game waiting on the Play button, with a fleet already on screen.
    ///
    /// Fails on settings that cannot hold a fleet of at least one alien.
    pub fn new(settings: Settings, audio: Box<dyn Audio>) -> Result<Self, SettingsError> {
        settings.validate()?;

        let stats = GameStats::new(&settings);
        let scoreboard = Scoreboard::new(&stats);
        let ship = Ship::new(&settings);
        let play_button = Button::new(&settings, "Play");
        let mut aliens = Vec::new();
        fleet::create_fleet(&settings, &ship, &mut aliens);

        Ok(Self {
            settings,
            stats,
            scoreboard,
            ship,
            bullets: Vec::new(),
            aliens,
            play_button,
            audio,
            pointer_visible: true,
            respawn_until: None,
            deferred: Vec::new(),
        })
    }

    /// Whether the frontend should show the mouse pointer.
    pub fn pointer_visible(&self) -> bool {
        self.pointer_visible
    }

    pub fn is_respawning(&self, now: Instant) -> bool {
        self.respawn_until.is_some_and(|until| now < until)
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// Advance the game by one frame. Returns `Flow::Quit` when the player
    /// asked to leave.
    pub fn tick<I>(&mut self, events: I, now: Instant) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.check_events(events, now) == Flow::Quit {
            return Flow::Quit;
        }

        if self.stats.game_active && !self.is_respawning(now) {
            self.ship.update(&self.settings);
            self.update_bullets();
            self.update_aliens(now);
        }
        Flow::Continue
    }

    pub fn render(&self, canvas: &mut dyn Canvas) -> io::Result<()> {
        let frame = Frame {
            settings: &self.settings,
            game_active: self.stats.game_active,
            scoreboard: &self.scoreboard,
            ship: &self.ship,
            aliens: &self.aliens,
            bullets: &self.bullets,
            play_button: &self.play_button,
        };
        render::update_screen(canvas, &frame)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Drain this frame's input. While frozen after a hit only quitting is
    /// serviced; everything else waits for the pause to end.
    pub fn check_events<I>(&mut self, events: I, now: Instant) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.respawn_until.is_some() && !self.is_respawning(now) {
            self.respawn_until = None;
            let deferred = std::mem::take(&mut self.deferred);
            debug!("respawn pause over, replaying {} events", deferred.len());
            for event in deferred {
                if self.handle_event(event) == Flow::Quit {
                    return Flow::Quit;
                }
            }
        }

        for event in events {
            if self.is_respawning(now) {
                if matches!(event, InputEvent::Quit | InputEvent::KeyDown(Key::Escape)) {
                    return Flow::Quit;
                }
                self.deferred.push(event);
                continue;
            }
            if self.handle_event(event) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::KeyDown(key) => {
                return input::check_keydown_events(
                    key,
                    &self.settings,
                    &mut self.ship,
                    &mut self.bullets,
                    self.audio.as_mut(),
                );
            }
            InputEvent::KeyUp(key) => input::check_keyup_events(key, &mut self.ship),
            InputEvent::MouseDown { x, y } => {
                self.check_play_button(x, y);
            }
        }
        Flow::Continue
    }

    /// Start a new game when the player clicks Play. Returns whether one was
    /// started.
    pub fn check_play_button(&mut self, x: i32, y: i32) -> bool {
        let button_clicked = self.play_button.contains(x, y);
        if !button_clicked || self.stats.game_active {
            return false;
        }

        self.settings.initialize_dynamic_settings();
        self.pointer_visible = false;

        self.stats.reset_stats(&self.settings);
        self.stats.game_active = true;

        self.scoreboard.prep_score(&self.stats);
        self.scoreboard.prep_high_score(&self.stats);
        self.scoreboard.prep_level(&self.stats);
        self.scoreboard.prep_ships(&self.stats);

        self.aliens.clear();
        self.bullets.clear();

        fleet::create_fleet(&self.settings, &self.ship, &mut self.aliens);
        self.ship.center_ship(&self.settings);

        info!("new game started with {} ships", self.stats.ships_left);
        true
    }

    // ── Bullets ───────────────────────────────────────────────────────────────

    /// Move bullets, drop the ones that left the screen, then resolve hits.
    pub fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update(&self.settings);
        }
        self.bullets.retain(|bullet| !bullet.is_off_screen());

        self.check_bullet_alien_collisions();
    }

    pub fn check_bullet_alien_collisions(&mut self) {
        let collisions = group_collide(&mut self.bullets, &mut self.aliens);

        if !collisions.is_empty() {
            for collision in &collisions {
                let gained = self
                    .settings
                    .alien_points
                    .saturating_mul(collision.hit.len() as u32);
                self.stats.score = self.stats.score.saturating_add(gained);
                self.scoreboard.prep_score(&self.stats);
                self.audio.play(Cue::Explosion);
            }
            stats::check_high_score(&mut self.stats, &mut self.scoreboard);
        }

        if self.aliens.is_empty() {
            self.start_new_level();
        }
    }

    fn start_new_level(&mut self) {
        self.bullets.clear();
        self.settings.increase_speed();

        self.stats.level += 1;
        self.scoreboard.prep_level(&self.stats);

        fleet::create_fleet(&self.settings, &self.ship, &mut self.aliens);
        info!(
            "level {} reached, aliens now worth {} points",
            self.stats.level, self.settings.alien_points
        );
    }

    // ── Aliens ────────────────────────────────────────────────────────────────

    /// Check the fleet edges, move the fleet, then look for aliens touching
    /// the ship or the bottom of the screen.
    pub fn update_aliens(&mut self, now: Instant) {
        fleet::check_fleet_edges(&mut self.settings, &mut self.aliens);
        fleet::update_aliens(&self.settings, &mut self.aliens);

        if spritecollideany(&self.ship, &self.aliens).is_some() {
            debug!("alien collided with the ship");
            self.ship_hit(now);
        }

        // A hit that just ended the game leaves nothing to check.
        if self.stats.game_active {
            self.check_aliens_bottom(now);
        }
    }

    /// Treat an alien reaching the bottom the same as the ship being hit.
    pub fn check_aliens_bottom(&mut self, now: Instant) {
        let screen_bottom = self.settings.screen_height;
        if self.aliens.iter().any(|alien| alien.rect.bottom() >= screen_bottom) {
            debug!("alien reached the bottom of the screen");
            self.ship_hit(now);
        }
    }

    /// Lose a ship. The wave restarts after a short pause, unless that was
    /// the last ship, which ends the game.
    pub fn ship_hit(&mut self, now: Instant) {
        if self.stats.ships_left > 0 {
            self.stats.ships_left -= 1;
            self.scoreboard.prep_ships(&self.stats);
        }

        if self.stats.ships_left > 0 {
            self.audio.play(Cue::Death);

            self.aliens.clear();
            self.bullets.clear();

            fleet::create_fleet(&self.settings, &self.ship, &mut self.aliens);
            self.ship.center_ship(&self.settings);

            self.respawn_until = Some(now + self.settings.respawn_delay());
            info!("ship lost, {} left", self.stats.ships_left);
        } else {
            self.stats.game_active = false;
            self.audio.play(Cue::GameOver);
            self.pointer_visible = true;
            info!(
                "game over at level {} with score {}",
                self.stats.level, self.stats.score
            );
        }
    }
}
