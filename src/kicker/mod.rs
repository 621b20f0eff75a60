//! Kicker module: overlap-driven ball kicking.
pub mod components;
pub mod plugin;
pub mod scan;
pub mod systems;

pub use plugin::KickerPlugin;
