//! One play-through, from start (or restart) to game over.

use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Asteroid, AsteroidSize, GameStatus, Player, Projectile, Viewport};
use crate::input::Keys;
use crate::mask::SpriteBank;
use crate::spawner::AsteroidSpawner;

/// The entire state of a running game.
///
/// All randomness is drawn from the session's own seeded stream, so two
/// sessions built from the same seed and fed the same inputs stay identical.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub score: u32,
    pub status: GameStatus,
    pub player: Player,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub spawner: AsteroidSpawner,
    seed: u64,
    rng: Pcg32,
    bank: SpriteBank,
    config: GameConfig,
}

impl GameSession {
    pub fn new(config: &GameConfig, view: Viewport, seed: u64) -> Self {
        let bank = SpriteBank::new(config);
        let player = compute::new_player(&bank, &config.player, view);
        log::info!("New session (seed {seed})");
        Self {
            score: 0,
            status: GameStatus::Playing,
            player,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            spawner: AsteroidSpawner::new(&config.spawner),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bank,
            config: config.clone(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bank(&self) -> &SpriteBank {
        &self.bank
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// Advance the simulation by `dt` seconds against the current view.
    ///
    /// Order: player, projectiles, spawner, asteroids, then collisions. Once
    /// the game is over the scene stays frozen.
    pub fn tick(&mut self, keys: Keys, dt: f32, view: Viewport) {
        if self.is_over() {
            return;
        }
        let dt = dt.max(0.0);

        let shot = compute::update_player(
            &mut self.player,
            keys,
            dt,
            view,
            &self.bank,
            &self.config.projectile,
        );
        if let Some(projectile) = shot {
            log::debug!("Fired at {:?}", projectile.body.pos);
            self.projectiles.push(projectile);
        }
        compute::update_projectiles(&mut self.projectiles, dt, view);

        if let Some(pos) = self.spawner.update(dt, view, &mut self.rng) {
            self.spawn_asteroid(AsteroidSize::Big, pos);
            log::debug!("Spawned big asteroid at {pos:?}");
        }
        compute::update_asteroids(&mut self.asteroids, dt, view);

        self.resolve_collisions();
    }

    /// Both scans see the same field. Shots that land on the frame the ship
    /// dies still score and fragment; the freeze applies afterwards.
    fn resolve_collisions(&mut self) {
        let ship_hit = compute::player_hit(&self.player, &self.asteroids);
        self.resolve_projectile_hits();
        if ship_hit {
            self.enter_game_over();
        }
    }

    fn resolve_projectile_hits(&mut self) {
        let hits = compute::find_projectile_hits(&self.projectiles, &self.asteroids);
        if hits.is_empty() {
            return;
        }

        let spent: HashSet<usize> = hits.iter().map(|h| h.projectile).collect();
        let mut index = 0;
        self.projectiles.retain(|_| {
            let keep = !spent.contains(&index);
            index += 1;
            keep
        });

        // Highest index first so the remaining indices stay valid; fragments
        // land at the end of the list and are not hit-tested until next frame.
        let mut doomed: Vec<usize> = hits.iter().map(|h| h.asteroid).collect();
        doomed.sort_unstable();
        for &i in doomed.iter().rev() {
            self.destroy_asteroid(i);
        }
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    /// Add an asteroid with randomized velocity and spin.
    pub fn spawn_asteroid(&mut self, size: AsteroidSize, pos: Vec2) -> &mut Asteroid {
        let asteroid =
            compute::new_asteroid(size, pos, &self.bank, &self.config.asteroids, &mut self.rng);
        self.asteroids.push(asteroid);
        let last = self.asteroids.len() - 1;
        &mut self.asteroids[last]
    }

    /// Remove the asteroid at `index`, award its score and add its fragments.
    /// Returns the number of fragments spawned.
    pub fn destroy_asteroid(&mut self, index: usize) -> usize {
        if index >= self.asteroids.len() {
            return 0;
        }
        let asteroid = self.asteroids.remove(index);
        self.score += self.config.asteroids.tier(asteroid.size).score;

        let children =
            compute::fragment(&asteroid, &self.bank, &self.config.asteroids, &mut self.rng);
        let count = children.len();
        self.asteroids.extend(children);
        log::debug!(
            "Destroyed {:?} asteroid at {:?}, {} fragments, score {}",
            asteroid.size,
            asteroid.body.pos,
            count,
            self.score
        );
        count
    }

    /// Switch to game over: the ship stops, spawning stops and the field
    /// freezes. Nothing is removed.
    pub fn enter_game_over(&mut self) {
        if self.is_over() {
            return;
        }
        self.status = GameStatus::GameOver;
        compute::halt_player(&mut self.player);
        self.spawner.halt(&mut self.asteroids);
        log::info!("Game over, score {}", self.score);
    }
}
