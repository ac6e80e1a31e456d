//! Conversion of raw evdev axis values into normalized floating point values.
//!
//! Bidirectional axes (sticks) are mapped into -1.0..=1.0 with a dead-zone
//! around the center. Unidirectional inputs (triggers) are mapped into
//! 0.0..=1.0 without a dead-zone.
#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Polarity of an axis. An inverted axis has its raw value negated before
/// any thresholding is applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

/// Normalization parameters of a centered, bidirectional axis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct AxisConfig {
    /// Raw values with a magnitude at or below this are reported as 0
    pub deadzone: i32,
    /// Magnitude of the raw value that maps to 1.0
    pub max_abs: f64,
    pub polarity: Polarity,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            deadzone: 2500,
            max_abs: u16::MAX as f64 / 2.0,
            polarity: Polarity::Normal,
        }
    }
}

impl AxisConfig {
    pub fn new(deadzone: i32, max_abs: f64, polarity: Polarity) -> Self {
        Self {
            deadzone,
            max_abs,
            polarity,
        }
    }

    /// Normalize the given raw value using this axis configuration
    pub fn normalize(&self, raw_value: i32) -> f64 {
        let value = match self.polarity {
            Polarity::Normal => raw_value,
            Polarity::Inverted => raw_value.saturating_neg(),
        };
        normalize_axis(value, self.deadzone, self.max_abs)
    }
}

/// Normalization parameters of a unidirectional trigger
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case", default)]
pub struct TriggerConfig {
    /// Raw value that maps to 1.0
    pub max: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self { max: 1023.0 }
    }
}

impl TriggerConfig {
    pub fn new(max: f64) -> Self {
        Self { max }
    }

    pub fn normalize(&self, raw_value: i32) -> f64 {
        normalize_trigger(raw_value, self.max)
    }
}

/// Returns a value between -1.0 and 1.0 based on the given raw value. Values
/// within the dead-zone (inclusive) are 0.0 and the remaining range is scaled
/// so that a magnitude of `max_abs` or beyond is exactly 1.0.
pub fn normalize_axis(raw_value: i32, deadzone: i32, max_abs: f64) -> f64 {
    let deadzone = deadzone.max(0) as f64;
    // unsigned_abs() so that i32::MIN does not overflow
    let magnitude = raw_value.unsigned_abs() as f64;
    if magnitude <= deadzone {
        return 0.0;
    }

    let sign = if raw_value.is_negative() { -1.0 } else { 1.0 };
    if magnitude >= max_abs {
        return sign;
    }

    let value = (magnitude - deadzone) / (max_abs - deadzone + 1.0);
    sign * value.min(1.0)
}

/// Returns a value between 0.0 and 1.0 based on the given value with its
/// maximum.
pub fn normalize_trigger(raw_value: i32, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (raw_value as f64 / max).clamp(0.0, 1.0)
}
