pub mod evdev;

use std::io;

use thiserror::Error;

use crate::ff::EffectHandle;

/// Possible errors talking to an event device
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("failed to open device {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("device is not supported: {0}")]
    Unsupported(String),
    #[error("failed to upload effect: {0}")]
    Upload(io::Error),
    #[error("failed to play effect: {0}")]
    Play(io::Error),
    /// Erasing on [evdev::EvdevGamepad] drops the effect and cannot fail.
    /// Devices that report erase failures return this.
    #[error("failed to erase effect: {0}")]
    Erase(io::Error),
    #[error("no uploaded effect with id {0}")]
    InvalidHandle(EffectHandle),
    #[error("device disconnected")]
    Disconnected,
}
