//! Narrow physics capability interface the prop behaviours are written against.
//!
//! The chest, kicker, and player controller never touch ECS queries directly for
//! spatial queries or body mutation. They go through [`PhysicsBackend`], which the
//! running app implements on avian with [`ScenePhysics`](super::scene::ScenePhysics)
//! and the tests implement with an in-memory mock.
use std::fmt::Debug;

use avian3d::prelude::LayerMask;
use bevy::math::Ray3d;
use bevy::prelude::*;

use super::components::PropTag;

/// A collider overlapping a query sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapHit<B> {
    pub body: B,
    pub tag: Option<PropTag>,
    pub position: Vec3,
    /// Whether the collider belongs to a body that can receive impulses.
    pub has_body: bool,
}

/// Nearest collider along a ray.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit<B> {
    pub body: B,
    pub tag: Option<PropTag>,
    pub distance: f32,
    pub has_body: bool,
    pub name: Option<String>,
}

pub trait PhysicsBackend {
    type Body: Copy + Eq + Debug;

    /// Colliders whose volume intersects the sphere, in backend order.
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<OverlapHit<Self::Body>>;

    /// Nearest collider on `filter` layers hit within `max_distance`.
    fn raycast(
        &self,
        ray: Ray3d,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit<Self::Body>>;

    /// Suspends the body's simulation while it is carried, or restores it.
    ///
    /// Carried bodies are kinematic, ignore gravity, and drop out of queries.
    fn set_carried(&mut self, body: Self::Body, carried: bool);

    /// Instantaneous velocity change of `impulse / mass`.
    fn apply_impulse(&mut self, body: Self::Body, impulse: Vec3);

    /// Parents `body` to the hold point with zero local offset and identity rotation.
    /// Returns `false` when there is no hold point to attach to.
    fn attach(&mut self, body: Self::Body) -> bool;

    /// Unparents `body`, preserving its world pose.
    fn detach(&mut self, body: Self::Body);

    fn local_rotation(&self, body: Self::Body) -> Option<Quat>;

    fn set_local_rotation(&mut self, body: Self::Body, rotation: Quat);
}

/// Unsigned angle in radians between two directions; zero when either is degenerate.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let (Some(a), Some(b)) = (a.try_normalize(), b.try_normalize()) else {
        return 0.0;
    };
    a.dot(b).clamp(-1.0, 1.0).acos()
}
