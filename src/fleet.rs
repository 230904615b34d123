//! Fleet layout and movement.
//!
//! Spacing between neighbouring aliens, and between the fleet and the
//! screen edges, is exactly one alien width (or height).

use log::debug;

use crate::entities::{Alien, Ship};
use crate::settings::Settings;

/// How many aliens fit in one row.
pub fn number_aliens_x(settings: &Settings, alien_width: i32) -> u32 {
    if alien_width <= 0 {
        return 0;
    }
    let alien_width = i64::from(alien_width);
    let available_space_x = i64::from(settings.screen_width) - 2 * alien_width;
    (available_space_x / (2 * alien_width)).clamp(0, i64::from(u32::MAX)) as u32
}

/// How many rows fit between the top of the screen and the ship.
pub fn number_rows(settings: &Settings, ship_height: i32, alien_height: i32) -> u32 {
    if alien_height <= 0 {
        return 0;
    }
    let alien_height = i64::from(alien_height);
    let available_space_y =
        i64::from(settings.screen_height) - 3 * alien_height - i64::from(ship_height);
    (available_space_y / (2 * alien_height)).clamp(0, i64::from(u32::MAX)) as u32
}

/// Place one alien at grid cell (`row_number`, `alien_number`).
pub fn create_alien(settings: &Settings, aliens: &mut Vec<Alien>, alien_number: u32, row_number: u32) {
    let mut alien = Alien::new(settings);
    let alien_width = alien.rect.width;
    let alien_height = alien.rect.height;
    alien.x = (alien_width + 2 * alien_width * alien_number as i32) as f32;
    alien.rect.x = alien.x as i32;
    alien.rect.y = alien_height + 2 * alien_height * row_number as i32;
    aliens.push(alien);
}

/// Add a full grid of aliens, row by row, left to right.
pub fn create_fleet(settings: &Settings, ship: &Ship, aliens: &mut Vec<Alien>) {
    let alien = Alien::new(settings);
    let number_aliens_x = number_aliens_x(settings, alien.rect.width);
    let number_rows = number_rows(settings, ship.rect.height, alien.rect.height);

    for row_number in 0..number_rows {
        for alien_number in 0..number_aliens_x {
            create_alien(settings, aliens, alien_number, row_number);
        }
    }
    debug!("created fleet of {number_rows}x{number_aliens_x} aliens");
}

/// Drop and reverse the fleet if any alien has reached an edge.
///
/// Stops at the first alien found at an edge, so the fleet drops at most
/// once per call. Returns whether it dropped.
pub fn check_fleet_edges(settings: &mut Settings, aliens: &mut [Alien]) -> bool {
    if aliens.iter().any(|alien| alien.check_edges(settings)) {
        change_fleet_direction(settings, aliens);
        true
    } else {
        false
    }
}

/// Drop the entire fleet and change its direction.
pub fn change_fleet_direction(settings: &mut Settings, aliens: &mut [Alien]) {
    for alien in aliens.iter_mut() {
        alien.rect.y += settings.fleet_drop_speed;
    }
    settings.fleet_direction = settings.fleet_direction.reversed();
}

/// Advance every alien by one step in the current direction.
pub fn update_aliens(settings: &Settings, aliens: &mut [Alien]) {
    for alien in aliens.iter_mut() {
        alien.update(settings);
    }
}
