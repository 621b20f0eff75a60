//! World module housing the demo scene and player movement.
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
