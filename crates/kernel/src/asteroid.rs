use asteroids_common::{MeshVertex, TriangleMesh};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::config::WrapMode;
use crate::rng::Rng;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Model-space asteroid triangle shared by every tier; `scale` sizes it.
pub static ASTEROID_MESH: TriangleMesh = TriangleMesh::new(
    MeshVertex::new(0.0, -40.0, WHITE),
    MeshVertex::new(-32.0, 10.0, WHITE),
    MeshVertex::new(28.0, 18.0, WHITE),
);

/// Asteroid size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTier {
    Small = 1,
    Medium = 2,
    Large = 3,
}

/// Everything that depends on an asteroid's size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierTraits {
    /// Collision radius.
    pub radius: f64,
    /// Draw scale applied to [`ASTEROID_MESH`].
    pub scale: f64,
    /// Travel speed in world units per frame.
    pub speed: f64,
    /// Spin in radians per frame.
    pub rotation_speed: f64,
    /// Score for destroying one.
    pub points: u64,
    /// Small asteroids this one can still turn into.
    pub budget_weight: usize,
}

const TIER_TABLE: [TierTraits; 3] = [
    TierTraits {
        radius: 15.0,
        scale: 0.4,
        speed: 1.0,
        rotation_speed: 0.015,
        points: 100,
        budget_weight: 1,
    },
    TierTraits {
        radius: 25.0,
        scale: 0.65,
        speed: 0.75,
        rotation_speed: 0.008,
        points: 50,
        budget_weight: 2,
    },
    TierTraits {
        radius: 45.0,
        scale: 1.0,
        speed: 0.2,
        rotation_speed: 0.003,
        points: 20,
        budget_weight: 4,
    },
];

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Small),
            2 => Some(Self::Medium),
            3 => Some(Self::Large),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn traits(self) -> TierTraits {
        TIER_TABLE[self.level() as usize - 1]
    }

    pub fn radius(self) -> f64 {
        self.traits().radius
    }

    pub fn scale(self) -> f64 {
        self.traits().scale
    }

    pub fn speed(self) -> f64 {
        self.traits().speed
    }

    pub fn rotation_speed(self) -> f64 {
        self.traits().rotation_speed
    }

    pub fn points(self) -> u64 {
        self.traits().points
    }

    pub fn budget_weight(self) -> usize {
        self.traits().budget_weight
    }

    /// The tier split children get, `None` for the smallest.
    pub fn smaller(self) -> Option<Self> {
        Self::from_level(self.level() - 1)
    }
}

/// A drifting, spinning rock. Size-derived values always come from its tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub position: DVec2,
    pub velocity: DVec2,
    pub rotation: f64,
    pub angular_velocity: f64,
    tier: SizeTier,
}

impl Asteroid {
    /// New asteroid heading in a random direction at its tier's speed, with a
    /// random starting orientation.
    pub fn spawn(position: DVec2, tier: SizeTier, rng: &mut Rng) -> Self {
        let heading = rng.angle();
        let velocity = DVec2::from_angle(heading) * tier.speed();
        Self {
            position,
            velocity,
            rotation: rng.angle(),
            angular_velocity: tier.rotation_speed(),
            tier,
        }
    }

    /// Asteroid with fully specified motion.
    pub fn with_motion(
        position: DVec2,
        tier: SizeTier,
        velocity: DVec2,
        rotation: f64,
        angular_velocity: f64,
    ) -> Self {
        Self {
            position,
            velocity,
            rotation,
            angular_velocity,
            tier,
        }
    }

    pub fn tier(&self) -> SizeTier {
        self.tier
    }

    pub fn radius(&self) -> f64 {
        self.tier.radius()
    }

    pub fn scale(&self) -> f64 {
        self.tier.scale()
    }

    pub fn speed(&self) -> f64 {
        self.tier.speed()
    }

    pub fn rotation_speed(&self) -> f64 {
        self.tier.rotation_speed()
    }

    pub fn update(&mut self) {
        self.position += self.velocity;
        self.rotation += self.angular_velocity;
    }

    /// Toroidal wrap against `[-w/2, w/2] x [-h/2, h/2]`.
    ///
    /// At most one axis wraps per call, X before Y.
    pub fn wrap(&mut self, width: f64, height: f64) {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let p = &mut self.position;
        if p.x < -hw {
            p.x = hw;
        } else if p.x > hw {
            p.x = -hw;
        } else if p.y < -hh {
            p.y = hh;
        } else if p.y > hh {
            p.y = -hh;
        }
    }

    /// Like [`Asteroid::wrap`] but both axes are handled in the same call.
    pub fn wrap_both_axes(&mut self, width: f64, height: f64) {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let p = &mut self.position;
        if p.x < -hw {
            p.x = hw;
        } else if p.x > hw {
            p.x = -hw;
        }
        if p.y < -hh {
            p.y = hh;
        } else if p.y > hh {
            p.y = -hh;
        }
    }

    pub fn wrap_with(&mut self, mode: WrapMode, width: f64, height: f64) {
        match mode {
            WrapMode::XBeforeY => self.wrap(width, height),
            WrapMode::BothAxes => self.wrap_both_axes(width, height),
        }
    }

    /// Disk hit test, boundary inclusive.
    pub fn contains_point(&self, point: DVec2) -> bool {
        let r = self.radius();
        self.position.distance_squared(point) <= r * r
    }

    /// Break into two children one tier smaller, or nothing for the smallest
    /// tier.
    ///
    /// Both children start at this asteroid's position with its velocity plus
    /// opposite perpendicular kicks of `kick * |velocity|`.
    pub fn split(&self, kick: f64, rng: &mut Rng) -> Vec<Asteroid> {
        let Some(child_tier) = self.tier.smaller() else {
            return Vec::new();
        };
        let offset = self.velocity.perp() * kick;
        [self.velocity + offset, self.velocity - offset]
            .into_iter()
            .map(|velocity| {
                Asteroid::with_motion(
                    self.position,
                    child_tier,
                    velocity,
                    rng.angle(),
                    child_tier.rotation_speed(),
                )
            })
            .collect()
    }

    pub fn budget_weight(&self) -> usize {
        self.tier.budget_weight()
    }
}

impl Body for Asteroid {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn velocity(&self) -> DVec2 {
        self.velocity
    }

    fn update(&mut self) {
        Asteroid::update(self);
    }

    fn mesh(&self) -> &'static TriangleMesh {
        &ASTEROID_MESH
    }

    fn scale(&self) -> f64 {
        Asteroid::scale(self)
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(tier: SizeTier, x: f64, y: f64) -> Asteroid {
        Asteroid::with_motion(DVec2::new(x, y), tier, DVec2::ZERO, 0.0, 0.0)
    }

    #[test]
    fn tier_constants() {
        assert_eq!(SizeTier::Large.radius(), 45.0);
        assert_eq!(SizeTier::Medium.radius(), 25.0);
        assert_eq!(SizeTier::Small.radius(), 15.0);

        assert_eq!(SizeTier::Large.scale(), 1.0);
        assert_eq!(SizeTier::Medium.scale(), 0.65);
        assert_eq!(SizeTier::Small.scale(), 0.4);

        assert_eq!(SizeTier::Large.speed(), 0.2);
        assert_eq!(SizeTier::Medium.speed(), 0.75);
        assert_eq!(SizeTier::Small.speed(), 1.0);

        assert_eq!(SizeTier::Large.rotation_speed(), 0.003);
        assert_eq!(SizeTier::Medium.rotation_speed(), 0.008);
        assert_eq!(SizeTier::Small.rotation_speed(), 0.015);

        assert_eq!(SizeTier::Large.points(), 20);
        assert_eq!(SizeTier::Medium.points(), 50);
        assert_eq!(SizeTier::Small.points(), 100);
    }

    #[test]
    fn derived_values_follow_tier_regardless_of_motion() {
        let mut rng = Rng::new(3);
        for tier in SizeTier::ALL {
            let a = Asteroid::spawn(DVec2::new(12.0, -7.0), tier, &mut rng);
            let b = Asteroid::with_motion(DVec2::ZERO, tier, DVec2::new(9.0, 9.0), 1.0, 0.5);
            assert_eq!(a.radius(), b.radius());
            assert_eq!(a.scale(), tier.scale());
            assert_eq!(a.angular_velocity, tier.rotation_speed());
            assert!((a.velocity.length() - tier.speed()).abs() < 1e-12);
        }
    }

    #[test]
    fn level_round_trips_and_smaller_steps_down() {
        assert_eq!(SizeTier::from_level(0), None);
        assert_eq!(SizeTier::from_level(4), None);
        assert_eq!(SizeTier::Large.smaller(), Some(SizeTier::Medium));
        assert_eq!(SizeTier::Medium.smaller(), Some(SizeTier::Small));
        assert_eq!(SizeTier::Small.smaller(), None);
    }

    #[test]
    fn update_with_zero_motion_is_idempotent() {
        let mut a = Asteroid::with_motion(DVec2::new(5.0, 6.0), SizeTier::Medium, DVec2::ZERO, 1.25, 0.0);
        let before = a.clone();
        a.update();
        a.update();
        assert_eq!(a, before);
    }

    #[test]
    fn update_advances_position_and_rotation() {
        let mut a = Asteroid::with_motion(DVec2::ZERO, SizeTier::Large, DVec2::new(1.0, -2.0), 0.0, 0.1);
        a.update();
        assert_eq!(a.position, DVec2::new(1.0, -2.0));
        assert!((a.rotation - 0.1).abs() < 1e-12);
    }

    #[test]
    fn wrap_each_edge() {
        let mut a = still(SizeTier::Large, 401.0, 0.0);
        a.wrap(800.0, 600.0);
        assert_eq!(a.position.x, -400.0);

        let mut a = still(SizeTier::Large, -401.0, 0.0);
        a.wrap(800.0, 600.0);
        assert_eq!(a.position.x, 400.0);

        let mut a = still(SizeTier::Large, 0.0, 301.0);
        a.wrap(800.0, 600.0);
        assert_eq!(a.position.y, -300.0);

        let mut a = still(SizeTier::Large, 0.0, -301.0);
        a.wrap(800.0, 600.0);
        assert_eq!(a.position.y, 300.0);
    }

    #[test]
    fn wrap_on_boundary_does_nothing() {
        let mut a = still(SizeTier::Small, 400.0, -300.0);
        a.wrap(800.0, 600.0);
        assert_eq!(a.position, DVec2::new(400.0, -300.0));
    }

    #[test]
    fn diagonal_exit_wraps_x_first() {
        let mut a = still(SizeTier::Small, 401.0, 301.0);
        a.wrap(800.0, 600.0);
        assert_eq!(a.position, DVec2::new(-400.0, 301.0));
        a.wrap(800.0, 600.0);
        assert_eq!(a.position, DVec2::new(-400.0, -300.0));
    }

    #[test]
    fn both_axes_mode_wraps_corner_at_once() {
        let mut a = still(SizeTier::Small, 401.0, 301.0);
        a.wrap_with(WrapMode::BothAxes, 800.0, 600.0);
        assert_eq!(a.position, DVec2::new(-400.0, -300.0));
    }

    #[test]
    fn contains_point_is_boundary_inclusive() {
        let a = still(SizeTier::Medium, 10.0, 10.0);
        assert!(a.contains_point(DVec2::new(10.0, 10.0)));
        assert!(a.contains_point(DVec2::new(35.0, 10.0)));
        assert!(a.contains_point(DVec2::new(10.0, -15.0)));
        assert!(!a.contains_point(DVec2::new(35.001, 10.0)));
        // 3-4-5 triangle scaled by 5: distance exactly 25.
        assert!(a.contains_point(DVec2::new(25.0, 30.0)));
    }

    #[test]
    fn smallest_tier_splits_into_nothing() {
        let mut rng = Rng::new(1);
        let a = still(SizeTier::Small, 0.0, 0.0);
        assert!(a.split(0.25, &mut rng).is_empty());
    }

    #[test]
    fn split_produces_two_smaller_children_at_parent_position() {
        let mut rng = Rng::new(1);
        for tier in [SizeTier::Large, SizeTier::Medium] {
            let v = DVec2::new(0.3, -0.4);
            let parent = Asteroid::with_motion(DVec2::new(-50.0, 20.0), tier, v, 0.0, 0.0);
            let children = parent.split(0.25, &mut rng);
            assert_eq!(children.len(), 2);
            for c in &children {
                assert_eq!(c.tier().level(), tier.level() - 1);
                assert_eq!(c.position, parent.position);
                assert_eq!(c.angular_velocity, c.tier().rotation_speed());
            }
            let sum = children[0].velocity + children[1].velocity;
            assert!((sum - v * 2.0).length() < 1e-12);
            let diff = children[0].velocity - children[1].velocity;
            let kick = v.perp() * 0.25;
            assert!((diff - kick * 2.0).length() < 1e-12);
            assert!(diff.dot(v).abs() < 1e-12);
        }
    }

    #[test]
    fn splitting_never_grows_budget() {
        let mut rng = Rng::new(5);
        for tier in SizeTier::ALL {
            let a = Asteroid::spawn(DVec2::ZERO, tier, &mut rng);
            let children: usize = a.split(0.25, &mut rng).iter().map(Asteroid::budget_weight).sum();
            assert!(children <= a.budget_weight());
        }
    }
}
