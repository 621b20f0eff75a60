//! Player plugin wiring the interaction controller.
use bevy::prelude::*;

use crate::{physics::PropSet, player::systems::handle_player_interactions};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_player_interactions.in_set(PropSet::Interact));

        #[cfg(feature = "core_debug")]
        app.add_systems(Update, crate::player::systems::draw_player_reach);
    }
}
