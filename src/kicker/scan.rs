//! Nearby-ball kick scan shared by the standalone kicker and the player controller.
use bevy::prelude::*;

use crate::physics::{
    backend::{angle_between, PhysicsBackend},
    components::PropTag,
};

/// Upward bias added to the facing direction before normalising the kick.
pub const KICK_LIFT: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickParams {
    pub force: f32,
    pub range: f32,
    /// Widest facing-to-ball angle that still kicks, in radians.
    pub max_angle: f32,
}

impl KickParams {
    pub fn new(force: f32, range: f32, max_angle_degrees: f32) -> Self {
        Self {
            force: force.max(0.0),
            range: range.max(0.0),
            max_angle: max_angle_degrees.clamp(0.0, 180.0).to_radians(),
        }
    }
}

/// What to do with a ball that is in range but outside the facing cone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MisalignedPolicy {
    /// Abort the whole kick on the first misaligned ball.
    StopScan,
    /// Move on to the next candidate.
    SkipCandidate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KickOutcome<B> {
    Kicked { ball: B, impulse: Vec3 },
    NotFacing { ball: B, angle: f32 },
    NoBall,
}

pub fn kick_direction(facing: Vec3) -> Vec3 {
    (facing + Vec3::Y * KICK_LIFT).normalize_or_zero()
}

/// Kicks the first ball within `params.range` of `origin` that lies inside the facing cone.
///
/// Candidates are visited in the order the backend's overlap query returns them.
pub fn try_kick<P: PhysicsBackend>(
    physics: &mut P,
    origin: Vec3,
    facing: Vec3,
    params: &KickParams,
    policy: MisalignedPolicy,
) -> KickOutcome<P::Body> {
    let mut first_rejected = None;

    for candidate in physics.overlap_sphere(origin, params.range) {
        if candidate.tag != Some(PropTag::Ball) || !candidate.has_body {
            continue;
        }

        let to_ball = candidate.position - origin;
        let angle = angle_between(facing, to_ball);
        if angle > params.max_angle {
            let rejected = KickOutcome::NotFacing {
                ball: candidate.body,
                angle,
            };
            match policy {
                MisalignedPolicy::StopScan => return rejected,
                MisalignedPolicy::SkipCandidate => {
                    first_rejected.get_or_insert(rejected);
                    continue;
                }
            }
        }

        let impulse = kick_direction(facing) * params.force;
        physics.apply_impulse(candidate.body, impulse);
        return KickOutcome::Kicked {
            ball: candidate.body,
            impulse,
        };
    }

    first_rejected.unwrap_or(KickOutcome::NoBall)
}
