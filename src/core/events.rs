//! Interaction outcomes broadcast by the chest, kicker, and player systems.
use bevy::prelude::*;

/// What a prop behaviour just did. Advisory only; nothing depends on these for correctness.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum PropInteractionEvent {
    LidToggled { lid: Entity, opening: bool },
    Kicked { ball: Entity, impulse: Vec3 },
    PickedUp { prop: Entity, is_ball: bool },
    Dropped { prop: Entity },
    Shot { ball: Entity, impulse: Vec3 },
    SwordHit { target: Entity, name: Option<String> },
}

/// Writes each interaction outcome to the log.
pub fn log_prop_interactions(mut events: MessageReader<PropInteractionEvent>) {
    for event in events.read() {
        match event {
            PropInteractionEvent::LidToggled { lid, opening } => {
                debug!(
                    "Lid {:?} {}",
                    lid,
                    if *opening { "opening" } else { "closing" }
                );
            }
            PropInteractionEvent::Kicked { ball, impulse } => {
                info!("Kicked the ball! ({:?}, impulse {:.2})", ball, impulse.length());
            }
            PropInteractionEvent::PickedUp { prop, is_ball } => {
                if *is_ball {
                    info!("Picked up ball {:?}! Press interact to shoot.", prop);
                } else {
                    info!("Picked up {:?}", prop);
                }
            }
            PropInteractionEvent::Dropped { prop } => debug!("Dropped {:?}", prop),
            PropInteractionEvent::Shot { ball, impulse } => {
                info!("Ball shot! ({:?}, impulse {:.2})", ball, impulse.length());
            }
            PropInteractionEvent::SwordHit { target, name } => match name {
                Some(name) => info!("Hit with sword: {}", name),
                None => info!("Hit with sword: {:?}", target),
            },
        }
    }
}
