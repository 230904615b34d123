//! Terminal adapter: maps the world onto the character grid and turns
//! crossterm events into [`InputEvent`]s.
//!
//! Terminals come in two flavours:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Press` /
//!   `Repeat` / `Release` events, so a held arrow key is released exactly.
//! * **Classic**: only `Press` events, with OS key-repeat showing up as more
//!   presses. A held key is considered released once its presses stop
//!   arriving for a while.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::entities::Rect;
use crate::input::{InputEvent, Key};

/// Grace period after the first press of a key, long enough to cover the
/// OS delay before auto-repeat starts.
const INITIAL_HOLD: Duration = Duration::from_millis(600);

/// Grace period once auto-repeat is running (OS repeat rate is ≥ 15 Hz).
const REPEAT_HOLD: Duration = Duration::from_millis(150);

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Scales world coordinates onto a `cols` × `rows` character grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: i32,
    pub world_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: i32, world_height: i32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            world_width: world_width.max(1),
            world_height: world_height.max(1),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    /// Column holding world x, clamped to the grid.
    pub fn col(&self, x: i32) -> u16 {
        scale(x, self.world_width, self.cols)
    }

    /// Row holding world y, clamped to the grid.
    pub fn row(&self, y: i32) -> u16 {
        scale(y, self.world_height, self.rows)
    }

    /// Inclusive cell range `(col0, row0, col1, row1)` covered by `rect`, or
    /// `None` when it lies entirely off screen. Visible rects always cover at
    /// least one cell.
    pub fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.width <= 0
            || rect.height <= 0
            || rect.right() <= 0
            || rect.bottom() <= 0
            || rect.left() >= self.world_width
            || rect.top() >= self.world_height
        {
            return None;
        }
        Some((
            self.col(rect.left()),
            self.row(rect.top()),
            self.col(rect.right() - 1),
            self.row(rect.bottom() - 1),
        ))
    }

    /// World point at the centre of a cell.
    pub fn to_world(&self, col: u16, row: u16) -> (i32, i32) {
        let x = (2 * col as i64 + 1) * self.world_width as i64 / (2 * self.cols as i64);
        let y = (2 * row as i64 + 1) * self.world_height as i64 / (2 * self.rows as i64);
        (x as i32, y as i32)
    }
}

fn scale(v: i32, world: i32, cells: u16) -> u16 {
    let cell = v as i64 * cells as i64 / world as i64;
    cell.clamp(0, cells as i64 - 1) as u16
}

// ── Held keys ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct Held {
    last_seen: Instant,
    repeating: bool,
}

/// Tracks which movement keys are down and synthesises releases on terminals
/// that never report them.
#[derive(Debug)]
pub struct KeyTracker {
    held: HashMap<Key, Held>,
    reports_release: bool,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashMap::new(),
            reports_release,
        }
    }

    /// A press or auto-repeat. Movement keys report `KeyDown` only when they
    /// were not already held; every other key reports each press.
    pub fn press(&mut self, key: Key, now: Instant) -> Option<InputEvent> {
        if !is_movement(key) {
            return Some(InputEvent::KeyDown(key));
        }
        match self.held.get_mut(&key) {
            Some(held) => {
                held.last_seen = now;
                held.repeating = true;
                None
            }
            None => {
                self.held.insert(
                    key,
                    Held {
                        last_seen: now,
                        repeating: false,
                    },
                );
                Some(InputEvent::KeyDown(key))
            }
        }
    }

    pub fn release(&mut self, key: Key) -> Option<InputEvent> {
        if !is_movement(key) {
            return Some(InputEvent::KeyUp(key));
        }
        self.held.remove(&key).map(|_| InputEvent::KeyUp(key))
    }

    /// Release every key whose presses have gone quiet. A no-op when the
    /// terminal reports releases itself.
    pub fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        if self.reports_release {
            return Vec::new();
        }
        let mut released: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, held)| {
                let window = if held.repeating { REPEAT_HOLD } else { INITIAL_HOLD };
                now.saturating_duration_since(held.last_seen) > window
            })
            .map(|(&key, _)| key)
            .collect();
        released.sort_by_key(|key| *key as u8);
        released
            .into_iter()
            .filter_map(|key| self.release(key))
            .collect()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }
}

fn is_movement(key: Key) -> bool {
    matches!(key, Key::Left | Key::Right)
}

// ── Event translation ─────────────────────────────────────────────────────────

pub struct TerminalInput {
    pub viewport: Viewport,
    keys: KeyTracker,
    /// Where Enter "clicks": the centre of the Play button.
    play_point: (i32, i32),
}

impl TerminalInput {
    pub fn new(viewport: Viewport, reports_release: bool, play_button: &Rect) -> Self {
        Self {
            viewport,
            keys: KeyTracker::new(reports_release),
            play_point: (play_button.centerx(), play_button.centery()),
        }
    }

    /// Translate one terminal event. Resizes update the viewport and yield
    /// nothing; unrecognised events are dropped.
    pub fn translate(&mut self, event: &Event, now: Instant) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) => self.translate_key(key_event, now),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => {
                    let (x, y) = self.viewport.to_world(mouse.column, mouse.row);
                    Some(InputEvent::MouseDown { x, y })
                }
                _ => None,
            },
            Event::Resize(cols, rows) => {
                self.viewport.resize(*cols, *rows);
                None
            }
            _ => None,
        }
    }

    /// Synthesised releases for this frame; see [`KeyTracker::expire`].
    pub fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        self.keys.expire(now)
    }

    fn translate_key(&mut self, event: &KeyEvent, now: Instant) -> Option<InputEvent> {
        let code = event.code;
        let kind = event.kind;

        if kind == KeyEventKind::Press {
            match code {
                KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(InputEvent::Quit);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => return Some(InputEvent::Quit),
                KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                    let (x, y) = self.play_point;
                    return Some(InputEvent::MouseDown { x, y });
                }
                _ => {}
            }
        }

        let key = map_key(code);
        match kind {
            KeyEventKind::Press => self.keys.press(key, now),
            // Auto-repeat only keeps movement alive; it never re-fires.
            KeyEventKind::Repeat if is_movement(key) => self.keys.press(key, now),
            KeyEventKind::Repeat => None,
            KeyEventKind::Release => self.keys.release(key),
        }
    }
}

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}
