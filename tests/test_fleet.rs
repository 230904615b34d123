use alien_invasion::entities::{Alien, Ship};
use alien_invasion::fleet::*;
use alien_invasion::settings::{FleetDirection, Settings};

fn make_fleet(settings: &Settings) -> Vec<Alien> {
    let ship = Ship::new(settings);
    let mut aliens = Vec::new();
    create_fleet(settings, &ship, &mut aliens);
    aliens
}

fn alien_at(settings: &Settings, x: i32, y: i32) -> Alien {
    let mut alien = Alien::new(settings);
    alien.x = x as f32;
    alien.rect.x = x;
    alien.rect.y = y;
    alien
}

// ── grid size ─────────────────────────────────────────────────────────────────

#[test]
fn default_screen_fits_five_by_three() {
    let s = Settings::default();
    assert_eq!(number_aliens_x(&s, 60), 5); // (800 - 120) / 120
    assert_eq!(number_rows(&s, 48, 58), 3); // (600 - 174 - 48) / 116
}

#[test]
fn grid_size_clamps_to_zero() {
    let s = Settings {
        screen_width: 100,
        screen_height: 100,
        ..Settings::default()
    };
    assert_eq!(number_aliens_x(&s, 60), 0);
    assert_eq!(number_rows(&s, 48, 58), 0);
}

#[test]
fn grid_size_with_huge_sprites_is_zero() {
    let s = Settings::default();
    assert_eq!(number_aliens_x(&s, i32::MAX), 0);
    assert_eq!(number_rows(&s, i32::MAX, i32::MAX), 0);
    assert_eq!(number_rows(&s, 48, 1_500_000_000), 0);
}

#[test]
fn grid_size_matches_formula_across_screens() {
    for &(w, h, aw, ah, sh) in &[
        (800, 600, 60, 58, 48),
        (1200, 800, 60, 58, 48),
        (640, 480, 32, 24, 20),
        (1000, 1000, 7, 9, 11),
    ] {
        let s = Settings {
            screen_width: w,
            screen_height: h,
            ..Settings::default()
        };
        assert_eq!(number_aliens_x(&s, aw) as i32, (w - 2 * aw) / (2 * aw));
        assert_eq!(number_rows(&s, sh, ah) as i32, (h - 3 * ah - sh) / (2 * ah));
    }
}

// ── create_fleet ──────────────────────────────────────────────────────────────

#[test]
fn fleet_fills_the_grid() {
    let s = Settings::default();
    let aliens = make_fleet(&s);
    assert_eq!(aliens.len(), 15);
}

#[test]
fn fleet_positions_follow_grid_spacing() {
    let s = Settings::default();
    let aliens = make_fleet(&s);
    for (i, alien) in aliens.iter().enumerate() {
        let row = (i / 5) as i32;
        let col = (i % 5) as i32;
        assert_eq!(alien.rect.x, 60 + 2 * 60 * col);
        assert_eq!(alien.rect.y, 58 + 2 * 58 * row);
        assert_eq!(alien.x, alien.rect.x as f32);
    }
}

#[test]
fn fleet_size_and_positions_for_custom_sprites() {
    let s = Settings {
        screen_width: 1200,
        screen_height: 800,
        alien_width: 40,
        alien_height: 30,
        ..Settings::default()
    };
    let aliens = make_fleet(&s);
    let cols = number_aliens_x(&s, 40);
    let rows = number_rows(&s, s.ship_height, 30);
    assert_eq!(aliens.len() as u32, cols * rows);

    let last = aliens.last().unwrap();
    assert_eq!(last.rect.x, 40 + 80 * (cols as i32 - 1));
    assert_eq!(last.rect.y, 30 + 60 * (rows as i32 - 1));
}

#[test]
fn create_fleet_appends() {
    let s = Settings::default();
    let ship = Ship::new(&s);
    let mut aliens = make_fleet(&s);
    create_fleet(&s, &ship, &mut aliens);
    assert_eq!(aliens.len(), 30);
}

#[test]
fn create_alien_places_one_cell() {
    let s = Settings::default();
    let mut aliens = Vec::new();
    create_alien(&s, &mut aliens, 2, 1);
    assert_eq!(aliens.len(), 1);
    assert_eq!(aliens[0].rect.x, 300);
    assert_eq!(aliens[0].rect.y, 174);
}

// ── edges ─────────────────────────────────────────────────────────────────────

#[test]
fn alien_at_right_edge_reverses_and_drops_fleet() {
    let mut s = Settings::default();
    let mut aliens = vec![alien_at(&s, 740, 58), alien_at(&s, 100, 174)];

    assert!(check_fleet_edges(&mut s, &mut aliens));
    assert_eq!(s.fleet_direction, FleetDirection::Left);
    assert_eq!(aliens[0].rect.y, 68);
    assert_eq!(aliens[1].rect.y, 184);
}

#[test]
fn fleet_drops_once_even_with_many_aliens_at_edge() {
    let mut s = Settings::default();
    let mut aliens = vec![
        alien_at(&s, 740, 58),
        alien_at(&s, 740, 174),
        alien_at(&s, 745, 290),
    ];

    check_fleet_edges(&mut s, &mut aliens);
    assert_eq!(s.fleet_direction, FleetDirection::Left);
    assert_eq!(aliens[0].rect.y, 68);
    assert_eq!(aliens[1].rect.y, 184);
    assert_eq!(aliens[2].rect.y, 300);
}

#[test]
fn no_edge_no_change() {
    let mut s = Settings::default();
    let mut aliens = make_fleet(&s);
    let before: Vec<i32> = aliens.iter().map(|a| a.rect.y).collect();

    assert!(!check_fleet_edges(&mut s, &mut aliens));
    assert_eq!(s.fleet_direction, FleetDirection::Right);
    let after: Vec<i32> = aliens.iter().map(|a| a.rect.y).collect();
    assert_eq!(before, after);
}

#[test]
fn alien_at_left_edge_turns_fleet_right() {
    let mut s = Settings::default();
    s.fleet_direction = FleetDirection::Left;
    let mut aliens = vec![alien_at(&s, 0, 58)];

    assert!(check_fleet_edges(&mut s, &mut aliens));
    assert_eq!(s.fleet_direction, FleetDirection::Right);
    assert_eq!(aliens[0].rect.y, 68);
}

#[test]
fn reversed_fleet_walks_away_from_edge() {
    let mut s = Settings::default();
    let mut aliens = vec![alien_at(&s, 740, 58)];

    // Tick 1: edge hit, drop, then move left.
    check_fleet_edges(&mut s, &mut aliens);
    update_aliens(&s, &mut aliens);
    assert_eq!(aliens[0].rect.x, 739);

    // Tick 2: still touching nothing in the new direction.
    assert!(!check_fleet_edges(&mut s, &mut aliens));
    assert_eq!(aliens[0].rect.y, 68);
}

#[test]
fn change_direction_with_no_drop_speed() {
    let mut s = Settings {
        fleet_drop_speed: 0,
        ..Settings::default()
    };
    let mut aliens = vec![alien_at(&s, 740, 58)];
    change_fleet_direction(&mut s, &mut aliens);
    assert_eq!(aliens[0].rect.y, 58);
    assert_eq!(s.fleet_direction, FleetDirection::Left);
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn update_aliens_moves_every_alien() {
    let s = Settings::default();
    let mut aliens = make_fleet(&s);
    let before: Vec<i32> = aliens.iter().map(|a| a.rect.x).collect();
    update_aliens(&s, &mut aliens);
    for (alien, x) in aliens.iter().zip(before) {
        assert_eq!(alien.rect.x, x + 1);
    }
}

#[test]
fn fleet_bounces_between_edges_dropping_each_time() {
    let mut s = Settings::default();
    let mut aliens = make_fleet(&s);
    let top = aliens[0].rect.y;

    let mut drops = 0;
    for _ in 0..2000 {
        if check_fleet_edges(&mut s, &mut aliens) {
            drops += 1;
        }
        update_aliens(&s, &mut aliens);
        for alien in &aliens {
            assert!(alien.rect.left() >= -1 && alien.rect.right() <= s.screen_width + 1);
        }
    }
    assert!(drops >= 2);
    assert_eq!(aliens[0].rect.y, top + drops * s.fleet_drop_speed);
}
