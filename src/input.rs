//! Discrete input events and the keyboard rules.

use log::debug;

use crate::audio::{Audio, Cue};
use crate::entities::{Bullet, Ship};
use crate::settings::Settings;

/// Keys the game reacts to; anything else arrives as `Other` and is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Mouse press at a point in world coordinates.
    MouseDown { x: i32, y: i32 },
    Quit,
}

/// What the frame loop should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Respond to a key press.
pub fn check_keydown_events(
    key: Key,
    settings: &Settings,
    ship: &mut Ship,
    bullets: &mut Vec<Bullet>,
    audio: &mut dyn Audio,
) -> Flow {
    match key {
        Key::Right => ship.moving_right = true,
        Key::Left => ship.moving_left = true,
        Key::Space => {
            fire_bullet(settings, ship, bullets, audio);
        }
        Key::Escape => return Flow::Quit,
        Key::Other => {}
    }
    Flow::Continue
}

/// Respond to a key release.
pub fn check_keyup_events(key: Key, ship: &mut Ship) {
    match key {
        Key::Right => ship.moving_right = false,
        Key::Left => ship.moving_left = false,
        _ => {}
    }
}

/// Fire a bullet if the on-screen limit is not reached yet.
/// Returns whether a bullet was fired.
pub fn fire_bullet(
    settings: &Settings,
    ship: &Ship,
    bullets: &mut Vec<Bullet>,
    audio: &mut dyn Audio,
) -> bool {
    if bullets.len() >= settings.bullets_allowed {
        debug!("bullet limit of {} reached", settings.bullets_allowed);
        return false;
    }
    bullets.push(Bullet::new(settings, ship));
    audio.play(Cue::Laser);
    true
}
