//! Game entities: the ship, its bullets, the aliens and the Play button.
//!
//! Positions live in world units (the settings' screen size). Each entity
//! keeps an integer [`Rect`] for collisions and drawing; the ones that move
//! by fractional amounts also keep a float coordinate so slow speeds still
//! accumulate.

use crate::settings::{FleetDirection, Settings};

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned integer rectangle; `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn set_centerx(&mut self, cx: i32) {
        self.x = cx - self.width / 2;
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.width / 2;
        self.y = cy - self.height / 2;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// True when the two rectangles share at least one point. Touching edges
    /// do not count, and empty rectangles never collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        self.width > 0
            && self.height > 0
            && other.width > 0
            && other.height > 0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn collidepoint(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

/// Anything with a collision box.
pub trait Hitbox {
    fn rect(&self) -> Rect;
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub rect: Rect,
    /// Horizontal centre, kept as a float so fractional speeds add up.
    pub center: f32,
    pub moving_right: bool,
    pub moving_left: bool,
}

impl Ship {
    /// A ship resting on the bottom edge, horizontally centred.
    pub fn new(settings: &Settings) -> Self {
        let mut rect = Rect::new(0, 0, settings.ship_width, settings.ship_height);
        rect.set_centerx(settings.screen_width / 2);
        rect.set_bottom(settings.screen_height);
        Self {
            rect,
            center: rect.centerx() as f32,
            moving_right: false,
            moving_left: false,
        }
    }

    /// Apply both movement flags; holding both keys cancels out.
    pub fn update(&mut self, settings: &Settings) {
        if self.moving_right && self.rect.right() < settings.screen_width {
            self.center += settings.ship_speed_factor;
        }
        if self.moving_left && self.rect.left() > 0 {
            self.center -= settings.ship_speed_factor;
        }
        self.rect.set_centerx(self.center as i32);
    }

    pub fn center_ship(&mut self, settings: &Settings) {
        self.center = (settings.screen_width / 2) as f32;
        self.rect.set_centerx(self.center as i32);
    }
}

impl Hitbox for Ship {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical position, kept as a float for fractional speeds.
    pub y: f32,
}

impl Bullet {
    /// A bullet leaving the nose of the ship.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let mut rect = Rect::new(0, 0, settings.bullet_width, settings.bullet_height);
        rect.set_centerx(ship.rect.centerx());
        rect.y = ship.rect.top();
        Self { rect, y: rect.y as f32 }
    }

    /// Move up the screen.
    pub fn update(&mut self, settings: &Settings) {
        self.y -= settings.bullet_speed_factor;
        self.rect.y = self.y as i32;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }
}

impl Hitbox for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alien {
    pub rect: Rect,
    /// Horizontal position, kept as a float for sub-pixel movement.
    pub x: f32,
}

impl Alien {
    /// A single alien one sprite-size away from the top-left corner.
    pub fn new(settings: &Settings) -> Self {
        let rect = Rect::new(
            settings.alien_width,
            settings.alien_height,
            settings.alien_width,
            settings.alien_height,
        );
        Self { rect, x: rect.x as f32 }
    }

    /// True if the alien touches the screen edge it is heading towards.
    pub fn check_edges(&self, settings: &Settings) -> bool {
        match settings.fleet_direction {
            FleetDirection::Right => self.rect.right() >= settings.screen_width,
            FleetDirection::Left => self.rect.left() <= 0,
        }
    }

    /// Shift sideways by the current alien speed in the fleet's direction.
    pub fn update(&mut self, settings: &Settings) {
        self.x += settings.alien_speed_factor * settings.fleet_direction.sign();
        self.rect.x = self.x as i32;
    }
}

impl Hitbox for Alien {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Play button ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    /// A button centred on the screen.
    pub fn new(settings: &Settings, label: &str) -> Self {
        let mut rect = Rect::new(0, 0, settings.button_width, settings.button_height);
        rect.set_center(settings.screen_width / 2, settings.screen_height / 2);
        Self {
            rect,
            label: label.to_string(),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.collidepoint(x, y)
    }
}
