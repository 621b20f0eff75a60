//! Chest module: hinged lids toggled open and closed by key press.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ChestPlugin;
