use asteroids_common::Viewport;
use asteroids_input::{FrameInput, RisingEdge};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::asteroid::{Asteroid, SizeTier};
use crate::config::GameConfig;
use crate::player::Player;
use crate::projectile::Projectile;
use crate::rng::Rng;

/// A record of something that happened during a frame.
///
/// The engine drains these every frame for logging; nothing in the
/// simulation reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AsteroidSpawned { tier: SizeTier, position: DVec2 },
    /// An asteroid was struck and replaced by `children` fragments.
    AsteroidDestroyed {
        tier: SizeTier,
        points: u64,
        children: usize,
    },
    ProjectileFired { position: DVec2, velocity: DVec2 },
    PlayerHit { score: u64 },
}

/// The authoritative game state.
///
/// Entity collections are ordered; removal keeps the order of the survivors
/// and split fragments are appended at the end.
#[derive(Debug, Clone)]
pub struct World {
    config: GameConfig,
    viewport: Viewport,
    rng: Rng,
    player: Player,
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    score: u64,
    frame: u64,
    spawn_cooldown: u32,
    shoot_cooldown: u32,
    fire_edge: RisingEdge,
    events: Vec<GameEvent>,
}

impl World {
    /// Empty world: no asteroids yet, cooldowns at zero.
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64) -> Self {
        Self {
            config,
            viewport,
            rng: Rng::new(seed),
            player: Player::new(),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            frame: 0,
            spawn_cooldown: 0,
            shoot_cooldown: 0,
            fire_edge: RisingEdge::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the world bounds; takes effect from the next phase that reads them.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Frames simulated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn spawn_cooldown(&self) -> u32 {
        self.spawn_cooldown
    }

    pub fn shoot_cooldown(&self) -> u32 {
        self.shoot_cooldown
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn large_asteroid_count(&self) -> usize {
        self.asteroids
            .iter()
            .filter(|a| a.tier() == SizeTier::Large)
            .count()
    }

    /// Sum of every live asteroid's budget weight: the most asteroids the
    /// current population can ever turn into.
    pub fn asteroid_budget(&self) -> usize {
        self.asteroids.iter().map(Asteroid::budget_weight).sum()
    }

    /// Number of instances a render pass over this world draws.
    pub fn drawable_count(&self) -> usize {
        1 + self.projectiles.len() + self.asteroids.len()
    }

    /// Add an asteroid if the asteroid budget allows it.
    pub fn push_asteroid(&mut self, asteroid: Asteroid) -> bool {
        if self.asteroid_budget() + asteroid.budget_weight() > self.config.max_asteroids {
            tracing::debug!(
                tier = ?asteroid.tier(),
                budget = self.asteroid_budget(),
                "asteroid budget exhausted, not spawning"
            );
            return false;
        }
        self.events.push(GameEvent::AsteroidSpawned {
            tier: asteroid.tier(),
            position: asteroid.position,
        });
        self.asteroids.push(asteroid);
        true
    }

    /// Add a projectile if the projectile cap allows it.
    pub fn push_projectile(&mut self, projectile: Projectile) -> bool {
        if self.projectiles.len() >= self.config.max_projectiles {
            tracing::debug!(cap = self.config.max_projectiles, "projectile cap reached");
            return false;
        }
        self.events.push(GameEvent::ProjectileFired {
            position: projectile.position,
            velocity: projectile.velocity,
        });
        self.projectiles.push(projectile);
        true
    }

    /// The opening wave: `initial_asteroids` large asteroids on random edges.
    pub fn spawn_initial_wave(&mut self) -> usize {
        let spawned = self.spawn_edge_asteroids(self.config.initial_asteroids);
        tracing::debug!(spawned, "initial wave spawned");
        spawned
    }

    /// Spawn `count` large asteroids on random screen edges. Returns how many
    /// fit in the budget.
    pub fn spawn_edge_asteroids(&mut self, count: usize) -> usize {
        (0..count).filter(|_| self.spawn_edge_asteroid()).count()
    }

    /// Spawn one large asteroid on a random edge: the side is uniform over
    /// left/right/bottom/top, the free coordinate uniform along it.
    pub fn spawn_edge_asteroid(&mut self) -> bool {
        let half = self.viewport.half_extents();
        let side = self.rng.below(4);
        let along = self.rng.signed_unit();
        let position = match side {
            0 => DVec2::new(-half.x, along * half.y),
            1 => DVec2::new(half.x, along * half.y),
            2 => DVec2::new(along * half.x, -half.y),
            _ => DVec2::new(along * half.x, half.y),
        };
        let asteroid = Asteroid::spawn(position, SizeTier::Large, &mut self.rng);
        self.push_asteroid(asteroid)
    }

    /// Fire one projectile from the ship's muzzle along its nose.
    pub fn shoot(&mut self) -> bool {
        let projectile = Projectile::fired_from(
            self.player.position(),
            self.player.forward(),
            self.config.muzzle_distance,
            self.config.projectile_speed,
        );
        self.push_projectile(projectile)
    }

    /// Phases 1–5 of a frame: turn, fire, move asteroids, move and resolve
    /// projectiles, then run the spawning governor.
    pub fn simulate(&mut self, input: &FrameInput) {
        self.apply_rotation(input);
        self.update_weapon(input);
        self.advance_asteroids();
        self.advance_projectiles();
        self.govern_spawning();
        self.frame += 1;
    }

    /// Phase 1: fixed angular step per held turn action. Holding both
    /// cancels out.
    pub fn apply_rotation(&mut self, input: &FrameInput) {
        let step = self.config.rotation_step;
        if input.rotate_left {
            self.player.rotate(-step);
        }
        if input.rotate_right {
            self.player.rotate(step);
        }
    }

    /// Phase 2: cooldown countdown, then fire on a rising edge once the
    /// cooldown has run out.
    pub fn update_weapon(&mut self, input: &FrameInput) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        let pressed = self.fire_edge.update(input.fire);
        if pressed && self.shoot_cooldown == 0 && self.shoot() {
            self.shoot_cooldown = self.config.shoot_cooldown_frames;
        }
    }

    /// Phase 3: move, spin and wrap every asteroid.
    pub fn advance_asteroids(&mut self) {
        let Viewport { width, height } = self.viewport;
        let mode = self.config.wrap_mode;
        for a in &mut self.asteroids {
            a.update();
            a.wrap_with(mode, width, height);
        }
    }

    /// Phase 4: move projectiles newest-first, dropping those that left the
    /// screen. A projectile inside an asteroid's disk is consumed, scores the
    /// struck tier and replaces that asteroid with its fragments. One kill per
    /// projectile per frame.
    pub fn advance_projectiles(&mut self) {
        let Viewport { width, height } = self.viewport;
        let mut p = self.projectiles.len();
        while p > 0 {
            p -= 1;
            self.projectiles[p].update();
            if self.projectiles[p].is_off_screen(width, height) {
                self.projectiles.remove(p);
                continue;
            }

            let point = self.projectiles[p].position;
            let Some(hit) = (0..self.asteroids.len())
                .rev()
                .find(|&a| self.asteroids[a].contains_point(point))
            else {
                continue;
            };

            self.projectiles.remove(p);
            let struck = self.asteroids.remove(hit);
            let points = struck.tier().points();
            self.score += points;
            let children = struck.split(self.config.split_kick, &mut self.rng);
            tracing::trace!(tier = ?struck.tier(), points, score = self.score, "asteroid destroyed");
            self.events.push(GameEvent::AsteroidDestroyed {
                tier: struck.tier(),
                points,
                children: children.len(),
            });
            self.asteroids.extend(children);
        }
    }

    /// Phase 5: the only source of new asteroids after the initial wave. Adds
    /// one large asteroid every `spawn_interval_frames` while fewer than
    /// `max_large_asteroids` are alive. Fragments never count against that cap.
    pub fn govern_spawning(&mut self) {
        self.spawn_cooldown = self.spawn_cooldown.saturating_sub(1);
        if self.large_asteroid_count() < self.config.max_large_asteroids
            && self.spawn_cooldown == 0
        {
            self.spawn_edge_asteroid();
            self.spawn_cooldown = self.config.spawn_interval_frames;
        }
    }

    /// Phase 7: disk-disk test of the ship (fixed at the origin) against every
    /// asteroid. Records a `PlayerHit` event on contact.
    pub fn check_player_collision(&mut self) -> bool {
        let hit = self.player_touches_asteroid();
        if hit {
            self.events.push(GameEvent::PlayerHit { score: self.score });
        }
        hit
    }

    pub fn player_touches_asteroid(&self) -> bool {
        let origin = self.player.position();
        let player_radius = self.config.player_radius;
        self.asteroids.iter().any(|a| {
            let r = a.radius() + player_radius;
            a.position.distance_squared(origin) <= r * r
        })
    }

    /// Split the first asteroid (in collection order) that contains `point`,
    /// without scoring. Debug tooling for poking at asteroids directly.
    pub fn split_asteroid_at(&mut self, point: DVec2) -> bool {
        let Some(index) = self.asteroids.iter().position(|a| a.contains_point(point)) else {
            return false;
        };
        let struck = self.asteroids.remove(index);
        let children = struck.split(self.config.split_kick, &mut self.rng);
        self.events.push(GameEvent::AsteroidDestroyed {
            tier: struck.tier(),
            points: 0,
            children: children.len(),
        });
        self.asteroids.extend(children);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(GameConfig::default(), Viewport::new(800.0, 600.0), 42)
    }

    fn parked(tier: SizeTier, x: f64, y: f64) -> Asteroid {
        Asteroid::with_motion(DVec2::new(x, y), tier, DVec2::ZERO, 0.0, 0.0)
    }

    fn fire() -> FrameInput {
        FrameInput {
            fire: true,
            ..FrameInput::default()
        }
    }

    #[test]
    fn world_starts_empty() {
        let w = world();
        assert_eq!(w.frame(), 0);
        assert_eq!(w.score(), 0);
        assert!(w.asteroids().is_empty());
        assert!(w.projectiles().is_empty());
        assert_eq!(w.drawable_count(), 1);
    }

    #[test]
    fn edge_spawns_sit_on_exactly_one_boundary() {
        let mut w = world();
        assert_eq!(w.spawn_edge_asteroids(6), 6);
        assert_eq!(w.asteroids().len(), 6);
        for a in w.asteroids() {
            assert_eq!(a.tier(), SizeTier::Large);
            let on_x = a.position.x.abs() == 400.0;
            let on_y = a.position.y.abs() == 300.0;
            assert!(on_x ^ on_y, "{:?} not on exactly one edge", a.position);
        }
        assert_eq!(w.events().len(), 6);
    }

    #[test]
    fn initial_wave_uses_config_count() {
        let mut w = world();
        assert_eq!(w.spawn_initial_wave(), 6);
        assert_eq!(w.large_asteroid_count(), 6);
    }

    #[test]
    fn rotation_input_turns_by_fixed_step() {
        let mut w = world();
        let left = FrameInput {
            rotate_left: true,
            ..FrameInput::default()
        };
        w.apply_rotation(&left);
        w.apply_rotation(&left);
        assert!((w.player().rotation + 0.08).abs() < 1e-12);

        let both = FrameInput {
            rotate_left: true,
            rotate_right: true,
            fire: false,
        };
        w.apply_rotation(&both);
        assert!((w.player().rotation + 0.08).abs() < 1e-12);
    }

    #[test]
    fn shot_at_zero_rotation_goes_straight_up() {
        let mut w = world();
        w.update_weapon(&fire());
        assert_eq!(w.projectiles().len(), 1);
        let p = &w.projectiles()[0];
        assert!((p.velocity - DVec2::new(0.0, -6.0)).length() < 1e-9);
        assert!((p.position - DVec2::new(0.0, -30.0)).length() < 1e-9);
        assert_eq!(w.shoot_cooldown(), 10);
    }

    #[test]
    fn holding_fire_shoots_once() {
        let mut w = world();
        for _ in 0..30 {
            w.update_weapon(&fire());
        }
        assert_eq!(w.projectiles().len(), 1);
    }

    #[test]
    fn cooldown_blocks_fast_retaps() {
        let mut w = world();
        let idle = FrameInput::default();
        w.update_weapon(&fire());
        w.update_weapon(&idle);
        w.update_weapon(&fire());
        assert_eq!(w.projectiles().len(), 1);

        // Cooldown was 10 at the first shot; it reaches zero on the 10th frame after.
        for _ in 0..8 {
            w.update_weapon(&idle);
        }
        w.update_weapon(&fire());
        assert_eq!(w.projectiles().len(), 2);
    }

    #[test]
    fn projectile_cap_is_respected() {
        let config = GameConfig {
            max_projectiles: 2,
            shoot_cooldown_frames: 0,
            ..GameConfig::default()
        };
        let mut w = World::new(config, Viewport::new(800.0, 600.0), 1);
        let idle = FrameInput::default();
        for _ in 0..5 {
            w.update_weapon(&fire());
            w.update_weapon(&idle);
        }
        assert_eq!(w.projectiles().len(), 2);
    }

    #[test]
    fn off_screen_projectiles_are_removed() {
        let mut w = world();
        w.push_projectile(Projectile::new(DVec2::new(0.0, -298.0), DVec2::new(0.0, -6.0)));
        w.push_projectile(Projectile::new(DVec2::new(0.0, 0.0), DVec2::new(6.0, 0.0)));
        w.advance_projectiles();
        assert_eq!(w.projectiles().len(), 1);
        assert_eq!(w.projectiles()[0].position, DVec2::new(6.0, 0.0));
    }

    #[test]
    fn hit_on_large_asteroid_scores_and_splits() {
        let mut w = world();
        w.push_asteroid(parked(SizeTier::Medium, 300.0, 200.0));
        w.push_asteroid(parked(SizeTier::Large, 0.0, -100.0));
        w.push_asteroid(parked(SizeTier::Small, -300.0, 200.0));
        w.push_projectile(Projectile::new(DVec2::new(0.0, -94.0), DVec2::new(0.0, -6.0)));

        w.advance_projectiles();

        assert_eq!(w.score(), 20);
        assert!(w.projectiles().is_empty());
        assert_eq!(w.asteroids().len(), 4);
        assert_eq!(w.asteroids()[0], parked(SizeTier::Medium, 300.0, 200.0));
        assert_eq!(w.asteroids()[1], parked(SizeTier::Small, -300.0, 200.0));
        for child in &w.asteroids()[2..] {
            assert_eq!(child.tier(), SizeTier::Medium);
            assert_eq!(child.position, DVec2::new(0.0, -100.0));
        }
    }

    #[test]
    fn score_is_inverse_to_size() {
        for (tier, points) in [
            (SizeTier::Large, 20),
            (SizeTier::Medium, 50),
            (SizeTier::Small, 100),
        ] {
            let mut w = world();
            w.push_asteroid(parked(tier, 100.0, 0.0));
            w.push_projectile(Projectile::new(DVec2::new(94.0, 0.0), DVec2::new(6.0, 0.0)));
            w.advance_projectiles();
            assert_eq!(w.score(), points);
        }
    }

    #[test]
    fn one_kill_per_projectile() {
        let mut w = world();
        w.push_asteroid(parked(SizeTier::Small, 100.0, 0.0));
        w.push_asteroid(parked(SizeTier::Small, 102.0, 0.0));
        w.push_projectile(Projectile::new(DVec2::new(95.0, 0.0), DVec2::new(6.0, 0.0)));
        w.advance_projectiles();
        assert_eq!(w.score(), 100);
        assert_eq!(w.asteroids().len(), 1);
        // The later asteroid in the collection is tested first.
        assert_eq!(w.asteroids()[0].position, DVec2::new(100.0, 0.0));
    }

    #[test]
    fn small_asteroid_is_eliminated() {
        let mut w = world();
        w.push_asteroid(parked(SizeTier::Small, 0.0, -100.0));
        w.push_projectile(Projectile::new(DVec2::new(0.0, -94.0), DVec2::new(0.0, -6.0)));
        w.advance_projectiles();
        assert!(w.asteroids().is_empty());
        assert!(matches!(
            w.events().last(),
            Some(GameEvent::AsteroidDestroyed { children: 0, .. })
        ));
    }

    #[test]
    fn governor_spawns_on_interval() {
        let mut w = world();
        w.govern_spawning();
        assert_eq!(w.large_asteroid_count(), 1);
        assert_eq!(w.spawn_cooldown(), 60);
        for _ in 0..59 {
            w.govern_spawning();
        }
        assert_eq!(w.large_asteroid_count(), 1);
        w.govern_spawning();
        assert_eq!(w.large_asteroid_count(), 2);
    }

    #[test]
    fn governor_never_exceeds_large_cap() {
        let mut w = World::new(GameConfig::default(), Viewport::new(1600.0, 1200.0), 9);
        w.spawn_edge_asteroids(6);
        for _ in 0..5_000 {
            w.govern_spawning();
            w.advance_asteroids();
            assert!(w.large_asteroid_count() <= 8);
        }
        assert_eq!(w.large_asteroid_count(), 8);
    }

    #[test]
    fn fragments_do_not_count_against_large_cap() {
        let mut w = world();
        for i in 0..8 {
            w.push_asteroid(parked(SizeTier::Medium, i as f64 * 10.0, 0.0));
        }
        w.govern_spawning();
        assert_eq!(w.large_asteroid_count(), 1);
    }

    #[test]
    fn asteroid_budget_caps_population() {
        let config = GameConfig {
            max_asteroids: 8,
            ..GameConfig::default()
        };
        let mut w = World::new(config, Viewport::new(800.0, 600.0), 3);
        assert_eq!(w.spawn_edge_asteroids(5), 2);
        assert_eq!(w.asteroid_budget(), 8);
        assert!(!w.push_asteroid(parked(SizeTier::Small, 0.0, 0.0)));
    }

    #[test]
    fn player_collision_uses_summed_radii() {
        let mut w = world();
        // 45 + 13 = 58
        w.push_asteroid(parked(SizeTier::Large, 58.0, 0.0));
        assert!(w.check_player_collision());
        assert!(matches!(w.events().last(), Some(GameEvent::PlayerHit { score: 0 })));

        let mut w = world();
        w.push_asteroid(parked(SizeTier::Large, 58.5, 0.0));
        assert!(!w.check_player_collision());
    }

    #[test]
    fn simulate_counts_frames() {
        let mut w = world();
        w.simulate(&FrameInput::default());
        w.simulate(&FrameInput::default());
        assert_eq!(w.frame(), 2);
    }

    #[test]
    fn split_at_point_does_not_score() {
        let mut w = world();
        w.push_asteroid(parked(SizeTier::Large, 100.0, 100.0));
        assert!(!w.split_asteroid_at(DVec2::new(-100.0, -100.0)));
        assert!(w.split_asteroid_at(DVec2::new(110.0, 100.0)));
        assert_eq!(w.score(), 0);
        assert_eq!(w.asteroids().len(), 2);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = world();
        let mut b = world();
        let input = FrameInput {
            rotate_right: true,
            fire: true,
            ..FrameInput::default()
        };
        for i in 0..600 {
            let frame_input = if i % 7 == 0 { input } else { FrameInput::default() };
            a.simulate(&frame_input);
            b.simulate(&frame_input);
        }
        assert_eq!(a.asteroids(), b.asteroids());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn drain_events_clears_log() {
        let mut w = world();
        w.spawn_edge_asteroids(2);
        assert_eq!(w.drain_events().len(), 2);
        assert!(w.events().is_empty());
    }
}
