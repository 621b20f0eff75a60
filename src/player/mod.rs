//! Player module: pickup, throw, kick, and sword interactions.
pub mod components;
pub mod controller;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
