//! Force feedback effects and their playback.
pub mod playback;
pub mod registry;
pub mod selector;

#[cfg(test)]
pub mod testing;

use std::fmt::Display;

use clap::ValueEnum;
use evdev::{FFEffectData, FFEffectKind, FFReplay, FFTrigger};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::input::source::DeviceError;

/// [ForceFeedbackDevice] is any device that effects can be uploaded to and
/// played on.
pub trait ForceFeedbackDevice {
    /// Upload the given effect to the device. Returns the device-specific id
    /// of the uploaded effect.
    fn upload_effect(&mut self, effect: &EffectDefinition) -> Result<EffectHandle, DeviceError>;
    /// Play the uploaded effect the given number of times
    fn play_effect(&mut self, handle: EffectHandle, repeat_count: i32) -> Result<(), DeviceError>;
    /// Remove the effect from the device
    fn erase_effect(&mut self, handle: EffectHandle) -> Result<(), DeviceError>;
}

/// Opaque id of an effect uploaded to a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(i16);

impl From<i16> for EffectHandle {
    fn from(id: i16) -> Self {
        Self(id)
    }
}

impl Display for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of force feedback effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Vibration using the strong (low frequency) and weak (high frequency)
    /// motors
    Rumble {
        strong_magnitude: u16,
        weak_magnitude: u16,
    },
}

/// Direction of a directional effect. Devices with independently driven
/// motors use this to balance the effect between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    West,
    NorthWest,
    North,
    NorthEast,
    East,
}

impl From<Direction> for u16 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::West => 0x4000,
            Direction::NorthWest => 0x6000,
            Direction::North => 0x8000,
            Direction::NorthEast => 0xA000,
            Direction::East => 0xC000,
        }
    }
}

/// Description of a force feedback effect before it is uploaded to a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct EffectDefinition {
    pub kind: EffectKind,
    /// Duration of the effect in milliseconds
    pub length: u16,
    /// Delay before the effect starts in milliseconds
    #[serde(default)]
    pub delay: u16,
    /// Direction of the effect, see [Direction]
    #[serde(default)]
    pub direction: u16,
}

impl EffectDefinition {
    /// Create a new rumble effect with the given magnitudes and length
    pub fn rumble(strong_magnitude: u16, weak_magnitude: u16, length: u16) -> Self {
        Self {
            kind: EffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            },
            length,
            delay: 0,
            direction: 0,
        }
    }

    /// Light rumble that is replayed for as long as it is selected
    pub fn light() -> Self {
        Self::rumble(0x0000, 0x0500, 300)
    }

    /// Strong rumble that plays once per selection
    pub fn strong() -> Self {
        Self::rumble(0xc000, 0x0000, 200)
    }

    pub fn with_delay(mut self, delay: u16) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction.into();
        self
    }
}

impl From<&EffectDefinition> for FFEffectData {
    fn from(effect: &EffectDefinition) -> Self {
        let kind = match effect.kind {
            EffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            } => FFEffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            },
        };
        FFEffectData {
            direction: effect.direction,
            trigger: FFTrigger {
                button: 0,
                interval: 0,
            },
            replay: FFReplay {
                length: effect.length,
                delay: effect.delay,
            },
            kind,
        }
    }
}
