//! Systems driving chest lids from key presses.
use bevy::prelude::*;

use crate::{
    chest::components::LidHinge,
    core::{events::PropInteractionEvent, plugin::SimulationClock},
};

/// Restarts the lid tween of every chest whose toggle key went down this frame.
pub fn toggle_chest_lids(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut lids: Query<(Entity, &Transform, &mut LidHinge)>,
    mut events: MessageWriter<PropInteractionEvent>,
) {
    for (entity, transform, mut hinge) in lids.iter_mut() {
        if !keyboard.just_pressed(hinge.toggle_key()) {
            continue;
        }
        let opening = hinge.toggle(transform.rotation);
        events.write(PropInteractionEvent::LidToggled {
            lid: entity,
            opening,
        });
    }
}

/// Steps every active lid tween by the simulation delta.
pub fn animate_chest_lids(
    clock: Res<SimulationClock>,
    mut lids: Query<(&mut Transform, &mut LidHinge)>,
) {
    let dt = clock.delta_secs();
    for (mut transform, mut hinge) in lids.iter_mut() {
        if let Some(rotation) = hinge.advance(dt) {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::message::Messages;

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_message::<PropInteractionEvent>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(SimulationClock::default())
            .add_systems(Update, (toggle_chest_lids, animate_chest_lids).chain());
        app
    }

    fn tick(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs_f32(seconds));
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
    }

    #[test]
    fn key_press_opens_lid_over_several_frames() {
        let mut app = app();
        let lid = app
            .world_mut()
            .spawn((
                Transform::default(),
                LidHinge::new(Quat::IDENTITY, (-100f32).to_radians(), 2.0, KeyCode::KeyE),
            ))
            .id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyE);
        tick(&mut app, 0.05);

        let toggled = app
            .world()
            .resource::<Messages<PropInteractionEvent>>()
            .iter_current_update_messages()
            .any(|event| matches!(event, PropInteractionEvent::LidToggled { opening: true, .. }));
        assert!(toggled);

        let partial = app.world().get::<Transform>(lid).expect("lid").rotation;
        assert!(partial.angle_between(Quat::IDENTITY) > 1e-3);

        for _ in 0..20 {
            tick(&mut app, 0.05);
        }

        let hinge = app.world().get::<LidHinge>(lid).expect("hinge");
        assert!(hinge.is_open());
        let rotation = app.world().get::<Transform>(lid).expect("lid").rotation;
        assert_eq!(rotation, hinge.open_rotation());
    }

    #[test]
    fn other_keys_leave_lid_alone() {
        let mut app = app();
        let lid = app
            .world_mut()
            .spawn((
                Transform::default(),
                LidHinge::new(Quat::IDENTITY, 1.0, 2.0, KeyCode::KeyE),
            ))
            .id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyQ);
        tick(&mut app, 0.05);

        let hinge = app.world().get::<LidHinge>(lid).expect("hinge");
        assert!(hinge.tween().is_none());
        assert_eq!(
            app.world().get::<Transform>(lid).expect("lid").rotation,
            Quat::IDENTITY
        );
    }
}
