use std::rc::Rc;

use asteroid_shooter::entities::*;
use asteroid_shooter::mask::Mask;

use glam::{IVec2, Vec2};

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-5
}

// ── Enums ─────────────────────────────────────────────────────────────────────

#[test]
fn asteroid_sizes_shrink_to_nothing() {
    assert_eq!(AsteroidSize::Big.next_smaller(), Some(AsteroidSize::Medium));
    assert_eq!(AsteroidSize::Medium.next_smaller(), Some(AsteroidSize::Small));
    assert_eq!(AsteroidSize::Small.next_smaller(), None);
}

#[test]
fn viewport_clamps_negative_sizes() {
    let v = Viewport::new(-5.0, 10.0);
    assert_eq!(v.width, 0.0);
    assert_eq!(v.height, 10.0);
    assert_eq!(Viewport::new(800.0, 600.0).center(), Vec2::new(400.0, 300.0));
}

#[test]
fn heading_zero_points_up_and_turns_clockwise() {
    assert!(close(heading(0.0), Vec2::new(0.0, -1.0)));
    assert!(close(heading(90.0), Vec2::new(1.0, 0.0)));
    assert!(close(heading(180.0), Vec2::new(0.0, 1.0)));
    assert!(close(heading(270.0), Vec2::new(-1.0, 0.0)));
}

// ── Masks ─────────────────────────────────────────────────────────────────────

#[test]
fn rect_mask_is_full() {
    let m = Mask::rect(4, 3);
    assert_eq!((m.width(), m.height()), (4, 3));
    assert_eq!(m.count(), 12);
    assert!(!m.get(4, 0));
    assert!(!m.get(-1, 0));
}

#[test]
fn wide_mask_indexes_far_corner() {
    let m = Mask::rect(1024, 1024);
    assert_eq!(m.count(), 1024 * 1024);
    assert!(m.get(1023, 1023));
    assert!(!m.get(1024, 1023));
}

#[test]
fn disc_mask_skips_corners() {
    let m = Mask::disc(10);
    assert!(m.get(5, 5));
    assert!(!m.get(0, 0));
    assert!(!m.get(9, 9));
    assert!(m.count() < 100);
}

#[test]
fn triangle_mask_is_wide_at_the_base() {
    let m = Mask::triangle(10, 10);
    assert!(m.get(0, 9));
    assert!(m.get(9, 9));
    assert!(!m.get(0, 0));
    assert!(!m.get(9, 0));
}

#[test]
fn quarter_turn_swaps_dimensions() {
    let r = Mask::rect(24, 6).rotated(90.0);
    assert_eq!((r.width(), r.height()), (6, 24));
    assert_eq!(r.count(), 144);
}

#[test]
fn diagonal_turn_grows_bounding_box() {
    let r = Mask::rect(10, 10).rotated(45.0);
    assert_eq!((r.width(), r.height()), (15, 15));
    assert!(r.get(7, 7));
    assert!(!r.get(0, 0));
}

#[test]
fn full_turn_is_identity() {
    let m = Mask::triangle(12, 12);
    assert_eq!(m.rotated(0.0), m);
    assert_eq!(m.rotated(360.0), m);
}

#[test]
fn mask_overlap_uses_offset() {
    let a = Mask::rect(4, 4);
    let b = Mask::rect(4, 4);
    assert!(a.overlaps(&b, IVec2::new(3, 3)));
    assert!(a.overlaps(&b, IVec2::new(-3, -3)));
    assert!(!a.overlaps(&b, IVec2::new(4, 0)));
    assert!(!a.overlaps(&b, IVec2::new(0, -4)));
}

#[test]
fn overlap_is_per_pixel_not_per_box() {
    // Two discs whose boxes touch at the corners only.
    let a = Mask::disc(10);
    assert!(!a.overlaps(&a, IVec2::new(8, 8)));
    assert!(a.overlaps(&a, IVec2::new(8, 0)));
}

// ── Bodies ────────────────────────────────────────────────────────────────────

fn disc_body(pos: Vec2) -> Body {
    Body::new(
        Sprite::Asteroid(AsteroidSize::Small),
        Rc::new(Mask::disc(32)),
        pos,
        Vec2::ZERO,
        0.0,
    )
}

#[test]
fn body_angle_wraps_into_range() {
    let mut b = Body::new(
        Sprite::Ship,
        Rc::new(Mask::triangle(20, 20)),
        Vec2::ZERO,
        Vec2::ZERO,
        370.0,
    );
    assert!((b.angle() - 10.0).abs() < 1e-3);
    b.set_angle(-90.0);
    assert!((b.angle() - 270.0).abs() < 1e-3);
    b.rotate(120.0, 1.0);
    assert!((b.angle() - 30.0).abs() < 1e-3);
}

#[test]
fn rotating_a_body_refreshes_its_mask() {
    let mut b = Body::new(
        Sprite::Laser,
        Rc::new(Mask::rect(24, 6)),
        Vec2::ZERO,
        Vec2::ZERO,
        0.0,
    );
    assert_eq!(b.extent(), Vec2::new(24.0, 6.0));
    b.set_angle(90.0);
    assert_eq!(b.extent(), Vec2::new(6.0, 24.0));
}

#[test]
fn body_top_left_is_centre_minus_half_extent() {
    assert_eq!(disc_body(Vec2::new(100.0, 100.0)).top_left(), IVec2::new(84, 84));
}

#[test]
fn bodies_overlap_by_position() {
    let a = disc_body(Vec2::new(100.0, 100.0));
    assert!(a.overlaps(&disc_body(Vec2::new(120.0, 100.0))));
    assert!(!a.overlaps(&disc_body(Vec2::new(140.0, 100.0))));
}

#[test]
fn projectile_expires_at_ttl() {
    let mut p = Projectile {
        body: disc_body(Vec2::ZERO),
        time_to_live: 3.0,
        age: 2.5,
    };
    assert!(!p.is_expired());
    p.age = 3.0;
    assert!(p.is_expired());
    assert_eq!(p.remaining_life(), 0.0);
}
