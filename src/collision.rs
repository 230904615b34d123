//! Rectangle collision between entity collections.

use crate::entities::Hitbox;

/// One collision group: a bullet (or any `A`) and everything it destroyed.
#[derive(Clone, Debug)]
pub struct Collision<A, B> {
    pub hitter: A,
    pub hit: Vec<B>,
}

/// Remove every intersecting pair from both collections.
///
/// Items of `group_a` are visited in insertion order. Each one takes all the
/// `group_b` items it overlaps, in their insertion order; those are removed
/// at once, so a later `A` cannot claim them again. An `A` that hit anything
/// is removed as well. The returned groups follow the order of `group_a`.
pub fn group_collide<A, B>(group_a: &mut Vec<A>, group_b: &mut Vec<B>) -> Vec<Collision<A, B>>
where
    A: Hitbox,
    B: Hitbox,
{
    let mut collisions = Vec::new();
    let mut survivors = Vec::with_capacity(group_a.len());

    for a in group_a.drain(..) {
        let rect = a.rect();
        let (hit, missed): (Vec<B>, Vec<B>) = group_b
            .drain(..)
            .partition(|b| rect.colliderect(&b.rect()));
        *group_b = missed;

        if hit.is_empty() {
            survivors.push(a);
        } else {
            collisions.push(Collision { hitter: a, hit });
        }
    }

    *group_a = survivors;
    collisions
}

/// The first item of `group` overlapping `sprite`, if any.
pub fn spritecollideany<'a, S, B>(sprite: &S, group: &'a [B]) -> Option<&'a B>
where
    S: Hitbox,
    B: Hitbox,
{
    let rect = sprite.rect();
    group.iter().find(|b| rect.colliderect(&b.rect()))
}
