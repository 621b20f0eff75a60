//! KickerPlugin wiring the standalone ball kicker.
use bevy::prelude::*;

use crate::{kicker::systems::kick_nearby_balls, physics::PropSet};

pub struct KickerPlugin;

impl Plugin for KickerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, kick_nearby_balls.in_set(PropSet::Interact));

        #[cfg(feature = "core_debug")]
        app.add_systems(Update, crate::kicker::systems::draw_kick_ranges);
    }
}
