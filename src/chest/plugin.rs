//! ChestPlugin wiring lid toggling and animation.
use bevy::prelude::*;

use crate::{
    chest::systems::{animate_chest_lids, toggle_chest_lids},
    physics::PropSet,
};

pub struct ChestPlugin;

impl Plugin for ChestPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (toggle_chest_lids, animate_chest_lids.after(toggle_chest_lids)).in_set(PropSet::Interact),
        );
    }
}
