use bevy::prelude::*;

mod chest;
mod core;
mod kicker;
mod physics;
mod player;
mod world;

use crate::{
    chest::ChestPlugin, core::CorePlugin, kicker::KickerPlugin, physics::PhysicsPlugin,
    player::PlayerPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin,
            PhysicsPlugin,
            WorldPlugin,
            ChestPlugin,
            KickerPlugin,
            PlayerPlugin,
        ))
        .run();
}
