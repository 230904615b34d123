use alien_invasion::collision::*;
use alien_invasion::entities::{Alien, Bullet, Hitbox, Rect, Ship};
use alien_invasion::settings::Settings;

fn bullet_at(x: i32, y: i32) -> Bullet {
    let s = Settings::default();
    let mut bullet = Bullet::new(&s, &Ship::new(&s));
    bullet.rect.x = x;
    bullet.rect.y = y;
    bullet.y = y as f32;
    bullet
}

fn alien_at(x: i32, y: i32) -> Alien {
    let mut alien = Alien::new(&Settings::default());
    alien.rect.x = x;
    alien.rect.y = y;
    alien.x = x as f32;
    alien
}

// ── group_collide ─────────────────────────────────────────────────────────────

#[test]
fn nothing_overlapping_leaves_groups_alone() {
    let mut bullets = vec![bullet_at(10, 500)];
    let mut aliens = vec![alien_at(60, 58), alien_at(180, 58)];

    let collisions = group_collide(&mut bullets, &mut aliens);
    assert!(collisions.is_empty());
    assert_eq!(bullets.len(), 1);
    assert_eq!(aliens.len(), 2);
}

#[test]
fn hit_removes_bullet_and_alien() {
    let mut bullets = vec![bullet_at(80, 70)];
    let mut aliens = vec![alien_at(60, 58), alien_at(180, 58)];

    let collisions = group_collide(&mut bullets, &mut aliens);
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].hitter.rect.x, 80);
    assert_eq!(collisions[0].hit.len(), 1);
    assert_eq!(collisions[0].hit[0].rect.x, 60);

    assert!(bullets.is_empty());
    assert_eq!(aliens.len(), 1);
    assert_eq!(aliens[0].rect.x, 180);
}

#[test]
fn one_bullet_can_hit_several_aliens() {
    // Two overlapping aliens under one bullet.
    let mut bullets = vec![bullet_at(100, 70)];
    let mut aliens = vec![alien_at(60, 58), alien_at(90, 60), alien_at(400, 58)];

    let collisions = group_collide(&mut bullets, &mut aliens);
    assert_eq!(collisions.len(), 1);
    let xs: Vec<i32> = collisions[0].hit.iter().map(|a| a.rect.x).collect();
    assert_eq!(xs, vec![60, 90]);
    assert_eq!(aliens.len(), 1);
}

#[test]
fn alien_is_claimed_by_first_bullet_only() {
    let mut bullets = vec![bullet_at(80, 70), bullet_at(82, 75)];
    let mut aliens = vec![alien_at(60, 58)];

    let collisions = group_collide(&mut bullets, &mut aliens);
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].hitter.rect.x, 80);

    // The second bullet found nothing left to hit.
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].rect.x, 82);
    assert!(aliens.is_empty());
}

#[test]
fn groups_follow_bullet_order() {
    let mut bullets = vec![bullet_at(200, 70), bullet_at(10, 500), bullet_at(80, 70)];
    let mut aliens = vec![alien_at(60, 58), alien_at(180, 58)];

    let collisions = group_collide(&mut bullets, &mut aliens);
    let hitters: Vec<i32> = collisions.iter().map(|c| c.hitter.rect.x).collect();
    assert_eq!(hitters, vec![200, 80]);
    assert_eq!(collisions[0].hit[0].rect.x, 180);
    assert_eq!(collisions[1].hit[0].rect.x, 60);

    assert_eq!(bullets.len(), 1);
    assert!(aliens.is_empty());
}

#[test]
fn survivors_keep_their_order() {
    let mut bullets = vec![bullet_at(10, 500), bullet_at(80, 70), bullet_at(20, 500)];
    let mut aliens = vec![alien_at(300, 58), alien_at(60, 58), alien_at(500, 58)];

    group_collide(&mut bullets, &mut aliens);
    let bx: Vec<i32> = bullets.iter().map(|b| b.rect.x).collect();
    let ax: Vec<i32> = aliens.iter().map(|a| a.rect.x).collect();
    assert_eq!(bx, vec![10, 20]);
    assert_eq!(ax, vec![300, 500]);
}

#[test]
fn score_delta_matches_removed_count() {
    let mut bullets = vec![bullet_at(100, 70), bullet_at(300, 70)];
    let mut aliens = vec![alien_at(60, 58), alien_at(90, 60), alien_at(280, 58)];
    let before = aliens.len();

    let collisions = group_collide(&mut bullets, &mut aliens);
    let removed: usize = collisions.iter().map(|c| c.hit.len()).sum();
    assert_eq!(removed, before - aliens.len());
    assert_eq!(removed, 3);
}

#[test]
fn empty_groups() {
    let mut bullets: Vec<Bullet> = Vec::new();
    let mut aliens = vec![alien_at(60, 58)];
    assert!(group_collide(&mut bullets, &mut aliens).is_empty());
    assert_eq!(aliens.len(), 1);
}

// ── spritecollideany ──────────────────────────────────────────────────────────

#[test]
fn spritecollideany_returns_first_overlap() {
    let s = Settings::default();
    let ship = Ship::new(&s); // x 370..430, y 552..600
    let aliens = vec![alien_at(0, 0), alien_at(360, 500), alien_at(400, 520)];

    let hit = spritecollideany(&ship, &aliens).unwrap();
    assert_eq!(hit.rect(), Rect::new(360, 500, 60, 58));
}

#[test]
fn spritecollideany_none_when_clear() {
    let s = Settings::default();
    let ship = Ship::new(&s);
    let aliens = vec![alien_at(0, 0), alien_at(600, 400)];
    assert!(spritecollideany(&ship, &aliens).is_none());
}
