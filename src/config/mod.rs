pub mod path;


use std::{io, path::Path, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{
    constants::{DEFAULT_CONTROL_INTERVAL_MS, DEFAULT_POLL_INTERVAL_MS},
    ff::{EffectDefinition, EffectKind},
    input::normalize::{AxisConfig, Polarity, TriggerConfig},
};

/// Represents all possible errors loading a [GamepadConfig]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Normalization settings for each stick axis. Fields missing from an axis
/// keep the default of that axis.
#[derive(Debug, Serialize, Clone, Copy, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct AxesConfig {
    #[schemars(with = "AxisOverrides")]
    pub left_x: AxisConfig,
    /// Inverted by default so that pushing the stick up is positive
    #[schemars(with = "AxisOverrides")]
    pub left_y: AxisConfig,
    #[schemars(with = "AxisOverrides")]
    pub right_x: AxisConfig,
}

impl Default for AxesConfig {
    fn default() -> Self {
        let max_abs = u16::MAX as f64 / 2.0;
        Self {
            left_x: AxisConfig::new(2500, max_abs, Polarity::Normal),
            left_y: AxisConfig::new(2500, max_abs, Polarity::Inverted),
            right_x: AxisConfig::new(2000, max_abs, Polarity::Normal),
        }
    }
}

/// Normalization settings for each trigger
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct TriggersConfig {
    pub left: TriggerConfig,
    pub right: TriggerConfig,
}

/// The two effects uploaded at startup. Fields missing from an effect keep
/// the default of that effect.
#[derive(Debug, Serialize, Clone, Copy, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct EffectsConfig {
    /// Replayed every playback tick while selected
    #[schemars(with = "EffectOverrides")]
    pub continuous: EffectDefinition,
    /// Played once per selection
    #[schemars(with = "EffectOverrides")]
    pub one_shot: EffectDefinition,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            continuous: EffectDefinition::light(),
            one_shot: EffectDefinition::strong(),
        }
    }
}

/// Axis settings as written in a config file
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
struct AxisOverrides {
    /// Raw values with a magnitude at or below this are reported as 0
    deadzone: Option<i32>,
    /// Magnitude of the raw value that maps to 1.0
    max_abs: Option<f64>,
    polarity: Option<Polarity>,
}

impl AxisOverrides {
    fn apply(self, axis: AxisConfig) -> AxisConfig {
        AxisConfig {
            deadzone: self.deadzone.unwrap_or(axis.deadzone),
            max_abs: self.max_abs.unwrap_or(axis.max_abs),
            polarity: self.polarity.unwrap_or(axis.polarity),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
struct AxesOverrides {
    left_x: AxisOverrides,
    left_y: AxisOverrides,
    right_x: AxisOverrides,
}

impl<'de> Deserialize<'de> for AxesConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let overrides = AxesOverrides::deserialize(deserializer)?;
        let defaults = AxesConfig::default();
        Ok(Self {
            left_x: overrides.left_x.apply(defaults.left_x),
            left_y: overrides.left_y.apply(defaults.left_y),
            right_x: overrides.right_x.apply(defaults.right_x),
        })
    }
}

/// Effect settings as written in a config file
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
struct EffectOverrides {
    kind: Option<EffectKind>,
    /// Duration of the effect in milliseconds
    length: Option<u16>,
    /// Delay before the effect starts in milliseconds
    delay: Option<u16>,
    direction: Option<u16>,
}

impl EffectOverrides {
    fn apply(self, effect: EffectDefinition) -> EffectDefinition {
        EffectDefinition {
            kind: self.kind.unwrap_or(effect.kind),
            length: self.length.unwrap_or(effect.length),
            delay: self.delay.unwrap_or(effect.delay),
            direction: self.direction.unwrap_or(effect.direction),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
struct EffectsOverrides {
    continuous: EffectOverrides,
    one_shot: EffectOverrides,
}

impl<'de> Deserialize<'de> for EffectsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let overrides = EffectsOverrides::deserialize(deserializer)?;
        let defaults = EffectsConfig::default();
        Ok(Self {
            continuous: overrides.continuous.apply(defaults.continuous),
            one_shot: overrides.one_shot.apply(defaults.one_shot),
        })
    }
}

/// Configuration of the gamepad engine. Every field is optional.
#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct GamepadConfig {
    pub version: u32,
    pub kind: String,
    /// Event device to open, e.g. "/dev/input/event0"
    pub device: Option<String>,
    /// Interval of the effect playback loop in milliseconds
    pub poll_interval_ms: u64,
    /// Interval the controller checks for button presses in milliseconds
    pub control_interval_ms: u64,
    pub axes: AxesConfig,
    pub triggers: TriggersConfig,
    pub effects: EffectsConfig,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            version: 1,
            kind: "GamepadConfig".to_string(),
            device: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            control_interval_ms: DEFAULT_CONTROL_INTERVAL_MS,
            axes: AxesConfig::default(),
            triggers: TriggersConfig::default(),
            effects: EffectsConfig::default(),
        }
    }
}

impl GamepadConfig {
    /// Load a [GamepadConfig] from the given YAML string
    pub fn from_yaml(content: String) -> Result<GamepadConfig, LoadError> {
        let config: GamepadConfig = serde_yaml::from_str(content.as_str())?;
        config.validate()
    }

    /// Load a [GamepadConfig] from the given YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<GamepadConfig, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: GamepadConfig = serde_yaml::from_reader(file)?;
        config.validate()
    }

    /// Load the configuration from the given path, or from the first config
    /// file found in the search paths. Falls back to the defaults if no config
    /// file exists.
    pub fn load(path: Option<&Path>) -> Result<GamepadConfig, LoadError> {
        if let Some(path) = path {
            log::debug!("Loading config from: {}", path.display());
            return Self::from_yaml_file(path);
        }

        let Some(path) = path::find_config_file() else {
            log::debug!("No config file found. Using defaults.");
            return Ok(GamepadConfig::default());
        };
        log::debug!("Loading config from: {}", path.display());
        Self::from_yaml_file(path)
    }

    /// Reject values that would make a loop spin
    fn validate(self) -> Result<Self, LoadError> {
        if self.poll_interval_ms == 0 {
            return Err(LoadError::InvalidValue(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.control_interval_ms == 0 {
            return Err(LoadError::InvalidValue(
                "control_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn control_interval(&self) -> Duration {
        Duration::from_millis(self.control_interval_ms)
    }
}
