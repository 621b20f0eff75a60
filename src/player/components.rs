//! Components for the player rig and its interaction state.
use bevy::prelude::*;

use crate::player::controller::InteractionController;

/// Marker component identifying the player body. Kicks originate from its position.
#[derive(Component, Debug)]
pub struct Player;

/// Marker for the player's eye camera; pickup, throw, and attack rays follow its forward axis.
#[derive(Component, Debug)]
pub struct PlayerView;

/// Interaction state machine attached to the player body.
#[derive(Component, Debug, Default)]
pub struct PlayerInteraction {
    pub controller: InteractionController<Entity>,
}

/// Mouse-look and walking parameters for the player rig.
#[derive(Component, Debug)]
pub struct PlayerLook {
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub look_sensitivity: f32,
}

impl PlayerLook {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            move_speed: 5.0,
            look_sensitivity: 0.2,
        }
    }
}
