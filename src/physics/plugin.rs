//! PhysicsPlugin brings in avian and the system set every prop behaviour runs in.
use avian3d::prelude::PhysicsPlugins;
use bevy::prelude::*;

use crate::physics::systems::apply_physics_settings;

/// Prop behaviours run here; movement systems are ordered ahead of it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropSet {
    Interact,
}

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsPlugins::default())
            .configure_sets(Update, PropSet::Interact)
            .add_systems(Startup, apply_physics_settings);
    }
}
