//! Physics module: prop metadata, the capability interface, and its avian implementation.
pub mod backend;
pub mod components;
#[cfg(test)]
pub mod mock;
pub mod plugin;
pub mod scene;
pub mod systems;

pub use plugin::{PhysicsPlugin, PropSet};
