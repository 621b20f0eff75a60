//! Prop metadata read by the interaction behaviours on top of avian's bodies and colliders.
use avian3d::prelude::LayerMask;
use bevy::prelude::*;

/// Category label used to filter query results by prop type.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropTag {
    Ball,
    PickUp,
    Attackable,
}

/// Fixed transform that held props are pinned to.
#[derive(Component, Debug, Default)]
pub struct HoldPoint;

/// Mask with one bit per listed layer index. Indices past 31 are ignored.
pub fn layer_mask(layers: impl IntoIterator<Item = u32>) -> LayerMask {
    let bits = layers
        .into_iter()
        .filter(|index| *index < u32::BITS)
        .fold(0, |bits, index| bits | 1 << index);
    LayerMask(bits)
}
