//! CorePlugin wires frame timing, interaction settings, and diagnostics shared by every prop behaviour.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use crate::core::{
    events::{log_prop_interactions, PropInteractionEvent},
    settings::InteractionSettings,
};

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;
/// Longest single step handed to tweens and swings; a frame hitch never skips a whole animation.
const DEFAULT_MAX_STEP: Duration = Duration::from_millis(100);

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Per-tick elapsed time consumed by the lid tween, swing, and body integration.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    max_step: Duration,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: time_scale.max(MIN_TIME_SCALE),
            max_step: DEFAULT_MAX_STEP,
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Overrides the per-tick step ceiling.
    pub fn with_max_step(mut self, max_step: Duration) -> Self {
        self.max_step = max_step;
        self
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last scaled, clamped delta.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Seconds to advance animations by this tick.
    pub fn delta_secs(&self) -> f32 {
        self.last_scaled_delta.as_secs_f32()
    }

    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies a real frame delta, storing both the real and the scaled, clamped step.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale).min(self.max_step);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// Registers timing, settings, and interaction telemetry.
///
/// Settings already inserted into the app win over `config/interaction.toml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<InteractionSettings>() {
            app.insert_resource(InteractionSettings::load_or_default());
        }
        let clock = app
            .world()
            .get_resource::<InteractionSettings>()
            .map_or_else(SimulationClock::default, |settings| {
                SimulationClock::new(settings.core.time_scale)
                    .with_max_step(settings.core.max_step)
            });

        app.insert_resource(clock)
            .add_message::<PropInteractionEvent>()
            .add_systems(Startup, log_startup_settings)
            .add_systems(PreUpdate, update_simulation_clock)
            .add_systems(Last, log_prop_interactions);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks);
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_settings(clock: Res<SimulationClock>, settings: Res<InteractionSettings>) {
    info!(
        "CorePlugin initialised with time scale {:.3}; interact {:?}, kick {:?}, chest {:?}",
        clock.time_scale(),
        settings.player.interact_key,
        settings.player.kick_key,
        settings.chest.toggle_key,
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | real dt: {:.4}s | scaled dt: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_scales_delta_with_multiplier() {
        let mut clock = SimulationClock::new(2.0);
        clock.tick(Duration::from_millis(20));

        assert_eq!(clock.time_scale(), 2.0);
        assert_eq!(clock.last_real_delta(), Duration::from_millis(20));
        assert!((clock.delta_secs() - 0.04).abs() < 1e-6);
        assert_eq!(clock.elapsed(), clock.last_scaled_delta());
    }

    #[test]
    fn clock_clamps_long_frames_to_max_step() {
        let mut clock = SimulationClock::default().with_max_step(Duration::from_millis(50));
        clock.tick(Duration::from_secs(2));

        assert_eq!(clock.last_scaled_delta(), Duration::from_millis(50));
        assert!((clock.delta_secs() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn clock_clamps_min_time_scale() {
        assert!((SimulationClock::new(0.0).time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
        assert!((SimulationClock::new(-5.0).time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn plugin_builds_clock_from_settings() {
        let mut settings = InteractionSettings::default();
        settings.core.time_scale = 0.5;
        settings.core.max_step = Duration::from_millis(30);

        let mut app = App::new();
        app.insert_resource(settings).add_plugins(CorePlugin);

        let mut clock = app.world_mut().resource_mut::<SimulationClock>();
        assert_eq!(clock.time_scale(), 0.5);
        clock.tick(Duration::from_millis(40));
        assert!((clock.delta_secs() - 0.02).abs() < 1e-6);
        clock.tick(Duration::from_millis(200));
        assert_eq!(clock.last_scaled_delta(), Duration::from_millis(30));
    }
}
