//! Game-logic functions.
//!
//! Each function works on one kind of entity (or a slice of them) and takes
//! everything it needs as arguments: the current viewport, the sprite bank,
//! the relevant config section and, where needed, an RNG handle. Nothing here
//! reads global state, so callers control determinism by the RNG they pass.

use glam::Vec2;
use rand::Rng;

use crate::config::{AsteroidConfig, PlayerConfig, ProjectileConfig};
use crate::entities::{
    heading, Asteroid, AsteroidSize, Body, Player, Projectile, Sprite, Viewport,
};
use crate::input::Keys;
use crate::mask::SpriteBank;

// ── Kinematics ────────────────────────────────────────────────────────────────

/// Explicit Euler step: `pos += vel * dt`.
pub fn integrate(body: &mut Body, dt: f32) {
    body.pos += body.vel * dt;
}

/// Teleport a body that has left the view to just off the opposite edge.
///
/// A body wraps once its position passes the far edge, or once its whole
/// sprite has left through the near edge, so the wrap pops rather than
/// sliding across.
pub fn wrap_bounds(body: &mut Body, view: Viewport) {
    let extent = body.extent();

    if body.pos.x > view.width {
        body.pos.x = -extent.x;
    } else if body.pos.x < -extent.x {
        body.pos.x = view.width;
    }

    if body.pos.y > view.height {
        body.pos.y = -extent.y;
    } else if body.pos.y < -extent.y {
        body.pos.y = view.height;
    }
}

/// Integrate then wrap.
pub fn advance(body: &mut Body, dt: f32, view: Viewport) {
    integrate(body, dt);
    wrap_bounds(body, view);
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// A fresh, motionless ship in the middle of the view.
pub fn new_player(bank: &SpriteBank, config: &PlayerConfig, view: Viewport) -> Player {
    Player {
        body: Body::new(
            Sprite::Ship,
            bank.get(Sprite::Ship),
            view.center(),
            Vec2::ZERO,
            0.0,
        ),
        acceleration: config.acceleration,
        friction: config.friction,
        rotation_speed: config.rotation_speed,
        brake_base: config.brake_base,
        drag_base: config.drag_base,
        fire_cooldown: config.fire_cooldown,
        since_last_shot: 0.0,
    }
}

/// An asteroid of `size` at `pos` with velocity and spin drawn from the
/// tier's configured ranges.
pub fn new_asteroid(
    size: AsteroidSize,
    pos: Vec2,
    bank: &SpriteBank,
    config: &AsteroidConfig,
    rng: &mut impl Rng,
) -> Asteroid {
    let tier = config.tier(size);
    let vel = Vec2::new(tier.velocity.sample(rng), tier.velocity.sample(rng));
    let rotation_rate = tier.rotation.sample(rng);
    let sprite = Sprite::Asteroid(size);
    Asteroid {
        body: Body::new(sprite, bank.get(sprite), pos, vel, 0.0),
        size,
        rotation_rate,
    }
}

pub fn new_projectile(
    pos: Vec2,
    vel: Vec2,
    angle: f32,
    bank: &SpriteBank,
    config: &ProjectileConfig,
) -> Projectile {
    Projectile {
        body: Body::new(Sprite::Laser, bank.get(Sprite::Laser), pos, vel, angle),
        time_to_live: config.time_to_live,
        age: 0.0,
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Apply held movement keys to the ship's velocity and heading.
///
/// Thrust wins over brake and left wins over right; movement and rotation
/// combine freely.
pub fn steer(player: &mut Player, keys: Keys, dt: f32) {
    if keys.contains(Keys::THRUST) {
        player.body.vel += heading(player.body.angle()) * player.acceleration * dt;
    } else if keys.contains(Keys::BRAKE) {
        player.body.vel *= player.friction / player.brake_base.powf(dt);
    }

    if keys.contains(Keys::LEFT) {
        player.body.rotate(-player.rotation_speed, dt);
    } else if keys.contains(Keys::RIGHT) {
        player.body.rotate(player.rotation_speed, dt);
    }
}

/// Fire a projectile along the ship's heading if the cooldown has elapsed.
///
/// The projectile does not inherit the ship's velocity. Firing resets the
/// cooldown, so a second call before time advances returns `None`.
pub fn fire(player: &mut Player, bank: &SpriteBank, config: &ProjectileConfig) -> Option<Projectile> {
    if player.since_last_shot < player.fire_cooldown {
        return None;
    }
    player.since_last_shot = 0.0;

    let angle = player.body.angle();
    let vel = heading(angle) * player.acceleration * config.speed_factor;
    Some(new_projectile(player.body.pos, vel, angle + 90.0, bank, config))
}

/// One frame of ship control: steer, maybe fire, move, then ambient drag.
/// Returns the projectile fired this frame, if any.
pub fn update_player(
    player: &mut Player,
    keys: Keys,
    dt: f32,
    view: Viewport,
    bank: &SpriteBank,
    config: &ProjectileConfig,
) -> Option<Projectile> {
    steer(player, keys, dt);

    let shot = if keys.contains(Keys::FIRE) {
        fire(player, bank, config)
    } else {
        None
    };

    advance(&mut player.body, dt, view);
    player.body.vel *= player.friction / player.drag_base.powf(dt);
    player.since_last_shot += dt;

    shot
}

/// Freeze the ship where it stands.
pub fn halt_player(player: &mut Player) {
    player.body.vel = Vec2::ZERO;
}

// ── Projectiles & asteroids ───────────────────────────────────────────────────

/// Age, move and wrap every projectile, then drop the expired ones.
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, dt: f32, view: Viewport) {
    for p in projectiles.iter_mut() {
        p.age += dt;
        advance(&mut p.body, dt, view);
    }
    projectiles.retain(|p| !p.is_expired());
}

/// Move, wrap and spin every asteroid.
pub fn update_asteroids(asteroids: &mut [Asteroid], dt: f32, view: Viewport) {
    for a in asteroids.iter_mut() {
        advance(&mut a.body, dt, view);
        a.body.rotate(a.rotation_rate, dt);
    }
}

/// Children of a destroyed asteroid, all starting at the parent's position.
/// Small asteroids leave nothing behind.
pub fn fragment(
    parent: &Asteroid,
    bank: &SpriteBank,
    config: &AsteroidConfig,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    let Some(child) = parent.size.next_smaller() else {
        return Vec::new();
    };
    (0..config.fragment_count)
        .map(|_| new_asteroid(child, parent.body.pos, bank, config, rng))
        .collect()
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// A projectile and the asteroid it struck, as indices into the scanned slices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub projectile: usize,
    pub asteroid: usize,
}

/// Whether the ship touches any asteroid.
pub fn player_hit(player: &Player, asteroids: &[Asteroid]) -> bool {
    asteroids.iter().any(|a| player.body.overlaps(&a.body))
}

/// Scan projectiles against asteroids without mutating either.
///
/// Each projectile claims at most one asteroid and each asteroid is claimed
/// at most once; a projectile whose only target was already claimed flies on.
pub fn find_projectile_hits(projectiles: &[Projectile], asteroids: &[Asteroid]) -> Vec<Hit> {
    let mut claimed = vec![false; asteroids.len()];
    let mut hits = Vec::new();

    for (pi, projectile) in projectiles.iter().enumerate() {
        let target = asteroids
            .iter()
            .enumerate()
            .find(|(ai, a)| !claimed[*ai] && projectile.body.overlaps(&a.body))
            .map(|(ai, _)| ai);

        if let Some(ai) = target {
            claimed[ai] = true;
            hits.push(Hit {
                projectile: pi,
                asteroid: ai,
            });
        }
    }
    hits
}
