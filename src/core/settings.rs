//! Interaction tuning loaded from `config/interaction.toml`, with key bindings and physics constants.
//!
//! Key and mouse bindings use Bevy's own variant names (`"KeyE"`, `"Digit0"`, `"ArrowUp"`,
//! `"Left"`). An unknown name fails the parse like any other malformed value.
use std::{fmt, fs, io, path::Path, time::Duration};

use avian3d::prelude::LayerMask;
use bevy::prelude::*;
use serde::Deserialize;

use crate::{kicker::scan::KickParams, physics::components::layer_mask};

const CONFIG_PATH: &str = "config/interaction.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    core: RawCoreSection,
    #[serde(default)]
    chest: RawChestSection,
    #[serde(default)]
    kicker: RawKickerSection,
    #[serde(default)]
    player: RawPlayerSection,
    #[serde(default)]
    sword: RawSwordSection,
    #[serde(default)]
    physics: RawPhysicsSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCoreSection {
    time_scale: f32,
    max_step_ms: u64,
}

impl Default for RawCoreSection {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_step_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawChestSection {
    open_angle_degrees: f32,
    speed: f32,
    toggle_key: KeyCode,
}

impl Default for RawChestSection {
    fn default() -> Self {
        Self {
            open_angle_degrees: -100.0,
            speed: 2.0,
            toggle_key: KeyCode::KeyE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawKickerSection {
    kick_force: f32,
    kick_range: f32,
    max_angle_degrees: f32,
    kick_key: KeyCode,
}

impl Default for RawKickerSection {
    fn default() -> Self {
        Self {
            kick_force: 10.0,
            kick_range: 2.0,
            max_angle_degrees: 45.0,
            kick_key: KeyCode::Digit0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayerSection {
    interact_key: KeyCode,
    kick_key: KeyCode,
    primary_action: MouseButton,
    pick_up_range: f32,
    ball_pick_up_range: f32,
    throw_force: f32,
    kick_force: f32,
    kick_range: f32,
    max_angle_degrees: f32,
}

impl Default for RawPlayerSection {
    fn default() -> Self {
        Self {
            interact_key: KeyCode::KeyE,
            kick_key: KeyCode::KeyF,
            primary_action: MouseButton::Left,
            pick_up_range: 3.0,
            ball_pick_up_range: 3.0,
            throw_force: 15.0,
            kick_force: 10.0,
            kick_range: 2.0,
            max_angle_degrees: 45.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSwordSection {
    swing_angle_degrees: f32,
    swing_speed: f32,
    attack_range: f32,
    attack_force: f32,
    attack_layers: Vec<u32>,
}

impl Default for RawSwordSection {
    fn default() -> Self {
        Self {
            swing_angle_degrees: 60.0,
            swing_speed: 10.0,
            attack_range: 2.0,
            attack_force: 10.0,
            attack_layers: vec![0, 1],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPhysicsSection {
    gravity: f32,
    ground_height: f32,
    restitution: f32,
    linear_damping: f32,
}

impl Default for RawPhysicsSection {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            ground_height: 0.0,
            restitution: 0.4,
            linear_damping: 0.6,
        }
    }
}

/// Failure reading or parsing the interaction config file.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: io::Error },
    Parse { path: String, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "Failed to read {} ({})", path, source),
            Self::Parse { path, source } => write!(f, "Failed to parse {} ({})", path, source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Frame timing applied by the core plugin's clock.
#[derive(Debug, Clone)]
pub struct CoreSettings {
    pub time_scale: f32,
    /// Longest single step handed to tweens and swings.
    pub max_step: Duration,
}

#[derive(Debug, Clone)]
pub struct ChestSettings {
    /// Swing of the lid around its local X axis, in radians.
    pub open_angle: f32,
    pub speed: f32,
    pub toggle_key: KeyCode,
}

#[derive(Debug, Clone)]
pub struct KickerSettings {
    pub params: KickParams,
    pub kick_key: KeyCode,
}

#[derive(Debug, Clone)]
pub struct PlayerSettings {
    pub interact_key: KeyCode,
    pub kick_key: KeyCode,
    pub primary_action: MouseButton,
    pub pick_up_range: f32,
    pub ball_pick_up_range: f32,
    pub throw_force: f32,
    pub kick: KickParams,
}

#[derive(Debug, Clone)]
pub struct SwordSettings {
    /// Peak swing offset in radians.
    pub swing_angle: f32,
    pub swing_speed: f32,
    pub attack_range: f32,
    pub attack_force: f32,
    pub attack_layers: LayerMask,
}

#[derive(Debug, Clone)]
pub struct PhysicsSettings {
    pub gravity: f32,
    pub ground_height: f32,
    pub restitution: f32,
    pub linear_damping: f32,
}

/// Every tunable the prop behaviours read.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub core: CoreSettings,
    pub chest: ChestSettings,
    pub kicker: KickerSettings,
    pub player: PlayerSettings,
    pub sword: SwordSettings,
    pub physics: PhysicsSettings,
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        match Self::load(Path::new(CONFIG_PATH)) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{}. Falling back to defaults.", err);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawInteractionConfig>(data).map(Self::from)
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(value: RawInteractionConfig) -> Self {
        let core = value.core;
        let chest = value.chest;
        let kicker = value.kicker;
        let player = value.player;
        let sword = value.sword;
        let physics = value.physics;

        Self {
            core: CoreSettings {
                time_scale: core.time_scale,
                max_step: Duration::from_millis(core.max_step_ms.max(1)),
            },
            chest: ChestSettings {
                open_angle: chest.open_angle_degrees.to_radians(),
                speed: chest.speed.max(0.0),
                toggle_key: chest.toggle_key,
            },
            kicker: KickerSettings {
                params: KickParams::new(
                    kicker.kick_force,
                    kicker.kick_range,
                    kicker.max_angle_degrees,
                ),
                kick_key: kicker.kick_key,
            },
            player: PlayerSettings {
                interact_key: player.interact_key,
                kick_key: player.kick_key,
                primary_action: player.primary_action,
                pick_up_range: player.pick_up_range.max(0.0),
                ball_pick_up_range: player.ball_pick_up_range.max(0.0),
                throw_force: player.throw_force.max(0.0),
                kick: KickParams::new(
                    player.kick_force,
                    player.kick_range,
                    player.max_angle_degrees,
                ),
            },
            sword: SwordSettings {
                swing_angle: sword.swing_angle_degrees.to_radians(),
                swing_speed: sword.swing_speed.max(0.0),
                attack_range: sword.attack_range.max(0.0),
                attack_force: sword.attack_force.max(0.0),
                attack_layers: layer_mask(sword.attack_layers),
            },
            physics: PhysicsSettings {
                gravity: physics.gravity,
                ground_height: physics.ground_height,
                restitution: physics.restitution.clamp(0.0, 1.0),
                linear_damping: physics.linear_damping.max(0.0),
            },
        }
    }
}
