//! Startup tuning of the avian world from the interaction settings.
use avian3d::prelude::Gravity;
use bevy::prelude::*;

use crate::core::settings::InteractionSettings;

/// Points gravity straight down with the configured strength.
pub fn apply_physics_settings(settings: Res<InteractionSettings>, mut gravity: ResMut<Gravity>) {
    gravity.0 = Vec3::NEG_Y * settings.physics.gravity;
    debug!("Gravity set to {:.2} m/s^2", settings.physics.gravity);
}
