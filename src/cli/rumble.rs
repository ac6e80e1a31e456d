#[cfg(test)]
#[path = "rumble_test.rs"]
mod rumble_test;

use std::time::Duration;

use clap::Args;

use crate::{
    ff::{registry::EffectRegistry, Direction, EffectDefinition, ForceFeedbackDevice},
    input::source::{evdev::EvdevGamepad, DeviceError},
    sync::ShutdownToken,
};

#[derive(Args, Debug, Clone)]
pub struct RumbleArgs {
    /// Event device to open
    #[arg(short, long)]
    pub device: Option<String>,
    /// Magnitude of the strong (low frequency) motor
    #[arg(long, default_value_t = 0xc000)]
    pub strong: u16,
    /// Magnitude of the weak (high frequency) motor
    #[arg(long, default_value_t = 0xc000)]
    pub weak: u16,
    /// Duration of the effect in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    pub length: u16,
    /// Delay before the effect starts in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay: u16,
    /// Direction of the effect on devices with directional rumble
    #[arg(long, value_enum)]
    pub direction: Option<Direction>,
}

impl RumbleArgs {
    fn effect(&self) -> EffectDefinition {
        let effect = EffectDefinition::rumble(self.strong, self.weak, self.length).with_delay(self.delay);
        match self.direction {
            Some(direction) => effect.with_direction(direction),
            None => effect,
        }
    }
}

/// Open the given device and play the rumble effect described by the
/// arguments once.
pub async fn handle_rumble(
    path: &str,
    args: RumbleArgs,
    token: ShutdownToken,
) -> Result<(), DeviceError> {
    let device = EvdevGamepad::open(path)?;
    println!("Found {} at {}", device.name(), device.path());

    let mut registry = EffectRegistry::new(device);
    play_once(&mut registry, &args.effect(), &token).await
}

/// Upload the effect, play it once and erase it once it finished playing or
/// shutdown was requested. The effect is erased even if playing failed.
async fn play_once<D: ForceFeedbackDevice>(
    registry: &mut EffectRegistry<D>,
    effect: &EffectDefinition,
    token: &ShutdownToken,
) -> Result<(), DeviceError> {
    let handle = registry.upload(effect)?;

    log::debug!("Playing effect {handle}");
    let result = registry.play(handle, 1);
    if result.is_ok() {
        let duration = Duration::from_millis(effect.delay as u64 + effect.length as u64);
        tokio::select! {
            _ = tokio::time::sleep(duration) => (),
            _ = token.cancelled() => log::info!("Stopping effect early"),
        }
    }

    if let Err(e) = registry.erase(handle) {
        log::warn!("Failed to erase effect {handle}: {e}");
        result?;
        return Err(e);
    }
    result
}
