//! WorldPlugin spawns the demo scene and drives player look and walking.
use bevy::prelude::*;

use crate::{
    physics::PropSet,
    world::systems::{player_mouse_look, player_walk, spawn_world_environment, update_cursor_grab},
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_world_environment).add_systems(
            Update,
            (
                update_cursor_grab,
                player_mouse_look.after(update_cursor_grab),
                player_walk,
            )
                .before(PropSet::Interact),
        );
    }
}
