//! Standalone ball kicker component.
use bevy::prelude::*;

use crate::kicker::scan::KickParams;

/// Kicks the nearest ball in front of the entity when `kick_key` goes down.
#[derive(Component, Debug, Clone)]
pub struct BallKicker {
    pub params: KickParams,
    pub kick_key: KeyCode,
    /// Entity whose forward axis defines facing; the kicker's own forward otherwise.
    pub view: Option<Entity>,
}

impl BallKicker {
    pub fn new(params: KickParams, kick_key: KeyCode) -> Self {
        Self {
            params,
            kick_key,
            view: None,
        }
    }

    pub fn with_view(mut self, view: Entity) -> Self {
        self.view = Some(view);
        self
    }
}
