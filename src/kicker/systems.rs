//! Systems for the standalone ball kicker.
use bevy::prelude::*;

use crate::{
    core::events::PropInteractionEvent,
    kicker::{
        components::BallKicker,
        scan::{try_kick, KickOutcome, MisalignedPolicy},
    },
    physics::scene::ScenePhysics,
};

/// Runs the kick scan for every kicker whose key went down this frame.
pub fn kick_nearby_balls(
    keyboard: Res<ButtonInput<KeyCode>>,
    kickers: Query<(&GlobalTransform, &BallKicker)>,
    views: Query<&GlobalTransform>,
    mut physics: ScenePhysics,
    mut events: MessageWriter<PropInteractionEvent>,
) {
    for (transform, kicker) in kickers.iter() {
        if !keyboard.just_pressed(kicker.kick_key) {
            continue;
        }

        let facing = kicker
            .view
            .and_then(|view| views.get(view).ok())
            .unwrap_or(transform)
            .forward()
            .as_vec3();

        let outcome = try_kick(
            &mut physics,
            transform.translation(),
            facing,
            &kicker.params,
            MisalignedPolicy::StopScan,
        );
        if let Some(message) = kick_message(outcome) {
            events.write(message);
        }
    }
}

/// Message for a landed kick; misses are reported in the log only.
fn kick_message(outcome: KickOutcome<Entity>) -> Option<PropInteractionEvent> {
    match outcome {
        KickOutcome::Kicked { ball, impulse } => Some(PropInteractionEvent::Kicked { ball, impulse }),
        KickOutcome::NotFacing { angle, .. } => {
            info!(
                "Too far or not facing the ball ({:.1} deg off).",
                angle.to_degrees()
            );
            None
        }
        KickOutcome::NoBall => {
            info!("No ball nearby to kick.");
            None
        }
    }
}

/// Draws each kicker's reach.
#[cfg(feature = "core_debug")]
pub fn draw_kick_ranges(mut gizmos: Gizmos, kickers: Query<(&GlobalTransform, &BallKicker)>) {
    use bevy::math::Isometry3d;

    for (transform, kicker) in kickers.iter() {
        gizmos.sphere(
            Isometry3d::from_translation(transform.translation()),
            kicker.params.range,
            Color::srgb(1.0, 0.92, 0.016),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_landed_kicks_are_published() {
        let ball = Entity::PLACEHOLDER;
        let impulse = Vec3::new(0.0, 2.9, -9.6);

        assert_eq!(
            kick_message(KickOutcome::Kicked { ball, impulse }),
            Some(PropInteractionEvent::Kicked { ball, impulse })
        );
        assert_eq!(kick_message(KickOutcome::NotFacing { ball, angle: 2.0 }), None);
        assert_eq!(kick_message(KickOutcome::NoBall), None);
    }
}
