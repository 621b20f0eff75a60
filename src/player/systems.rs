//! Systems feeding input into the player interaction controller.
use bevy::prelude::*;

use crate::{
    core::{events::PropInteractionEvent, plugin::SimulationClock, settings::InteractionSettings},
    kicker::scan::KickOutcome,
    physics::scene::ScenePhysics,
    player::{
        components::{Player, PlayerInteraction, PlayerView},
        controller::{ControllerEvent, TickInput, ViewPose},
    },
};

/// Ticks the interaction controller once per frame with this frame's key edges.
pub fn handle_player_interactions(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    clock: Res<SimulationClock>,
    settings: Res<InteractionSettings>,
    mut players: Query<(&GlobalTransform, &mut PlayerInteraction), With<Player>>,
    views: Query<&GlobalTransform, With<PlayerView>>,
    mut physics: ScenePhysics,
    mut messages: MessageWriter<PropInteractionEvent>,
) {
    let Ok((player_transform, mut interaction)) = players.single_mut() else {
        return;
    };
    let Ok(view_transform) = views.single() else {
        debug!("Player has no view camera; skipping interactions");
        return;
    };

    let view = ViewPose {
        origin: view_transform.translation(),
        forward: view_transform.forward().as_vec3(),
    };
    let input = TickInput {
        interact: keyboard.just_pressed(settings.player.interact_key),
        kick: keyboard.just_pressed(settings.player.kick_key),
        primary: mouse.just_pressed(settings.player.primary_action),
    };

    let before = interaction.controller.state();
    let events = interaction.controller.tick(
        &mut physics,
        view,
        player_transform.translation(),
        input,
        clock.delta_secs(),
        &settings,
    );

    let after = interaction.controller.state();
    if after != before {
        debug!("Player interaction state {:?} -> {:?}", before, after);
    }

    for message in events.into_iter().filter_map(interaction_message) {
        messages.write(message);
    }
}

/// Message for an observable controller event; the rest are only logged.
fn interaction_message(event: ControllerEvent<Entity>) -> Option<PropInteractionEvent> {
    match event {
        ControllerEvent::PickedUp { prop, is_ball } => {
            Some(PropInteractionEvent::PickedUp { prop, is_ball })
        }
        ControllerEvent::Dropped { prop } => Some(PropInteractionEvent::Dropped { prop }),
        ControllerEvent::Shot { ball, impulse } => Some(PropInteractionEvent::Shot { ball, impulse }),
        ControllerEvent::Kick(KickOutcome::Kicked { ball, impulse }) => {
            Some(PropInteractionEvent::Kicked { ball, impulse })
        }
        ControllerEvent::Kick(KickOutcome::NotFacing { angle, .. }) => {
            debug!("No ball in front to kick ({:.1} deg off)", angle.to_degrees());
            None
        }
        ControllerEvent::Kick(KickOutcome::NoBall) => {
            debug!("No ball nearby to kick");
            None
        }
        ControllerEvent::SwingStarted => {
            debug!("Sword swing started");
            None
        }
        ControllerEvent::SwordHit { target, name } => {
            Some(PropInteractionEvent::SwordHit { target, name })
        }
        ControllerEvent::SwingFinished => {
            debug!("Sword swing finished");
            None
        }
    }
}

/// Draws the pickup reach along the view ray and the kick radius around the player.
#[cfg(feature = "core_debug")]
pub fn draw_player_reach(
    mut gizmos: Gizmos,
    settings: Res<InteractionSettings>,
    players: Query<&GlobalTransform, With<Player>>,
    views: Query<&GlobalTransform, With<PlayerView>>,
) {
    use bevy::math::Isometry3d;

    if let Ok(view) = views.single() {
        gizmos.ray(
            view.translation(),
            view.forward().as_vec3() * settings.player.ball_pick_up_range,
            Color::srgb(0.0, 1.0, 1.0),
        );
    }
    if let Ok(player) = players.single() {
        gizmos.sphere(
            Isometry3d::from_translation(player.translation()),
            settings.player.kick.range,
            Color::srgb(1.0, 0.92, 0.016),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observable_events_become_messages() {
        let ball = Entity::PLACEHOLDER;
        let impulse = Vec3::new(0.0, 3.0, -14.0);

        assert_eq!(
            interaction_message(ControllerEvent::PickedUp {
                prop: ball,
                is_ball: true
            }),
            Some(PropInteractionEvent::PickedUp {
                prop: ball,
                is_ball: true
            })
        );
        assert_eq!(
            interaction_message(ControllerEvent::Shot { ball, impulse }),
            Some(PropInteractionEvent::Shot { ball, impulse })
        );
        assert_eq!(
            interaction_message(ControllerEvent::Kick(KickOutcome::Kicked { ball, impulse })),
            Some(PropInteractionEvent::Kicked { ball, impulse })
        );
        assert_eq!(
            interaction_message(ControllerEvent::SwordHit {
                target: ball,
                name: Some("Crate 1".into())
            }),
            Some(PropInteractionEvent::SwordHit {
                target: ball,
                name: Some("Crate 1".into())
            })
        );
    }

    #[test]
    fn misses_and_swing_phases_are_log_only() {
        let ball = Entity::PLACEHOLDER;
        for event in [
            ControllerEvent::Kick(KickOutcome::NotFacing { ball, angle: 1.2 }),
            ControllerEvent::Kick(KickOutcome::NoBall),
            ControllerEvent::SwingStarted,
            ControllerEvent::SwingFinished,
        ] {
            assert_eq!(interaction_message(event), None);
        }
    }
}
