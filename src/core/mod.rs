//! Core module: frame clock, interaction settings, and shared telemetry.
pub mod events;
pub mod plugin;
pub mod settings;

pub use plugin::CorePlugin;
