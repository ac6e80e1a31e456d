#[cfg(test)]
#[path = "playback_test.rs"]
mod playback_test;

use std::time::Duration;

use crate::{constants::DEFAULT_REPEAT_COUNT, input::source::DeviceError, sync::ShutdownToken};

use super::{registry::EffectRegistry, selector::SharedSelector, ForceFeedbackDevice};

/// Loop that plays the selected effect on a fixed interval
#[derive(Debug)]
pub struct Playback<D> {
    registry: EffectRegistry<D>,
    selector: SharedSelector,
    token: ShutdownToken,
    interval: Duration,
}

impl<D> Playback<D>
where
    D: ForceFeedbackDevice,
{
    pub fn new(
        registry: EffectRegistry<D>,
        selector: SharedSelector,
        token: ShutdownToken,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            selector,
            token,
            interval,
        }
    }

    pub fn registry(&self) -> &EffectRegistry<D> {
        &self.registry
    }

    /// Play the currently selected effect, if any. Returns true if an effect
    /// was played.
    pub fn tick(&mut self) -> Result<bool, DeviceError> {
        let Some(handle) = self.selector.consume() else {
            return Ok(false);
        };
        self.registry.play(handle, DEFAULT_REPEAT_COUNT)?;
        Ok(true)
    }

    /// Run until shutdown is requested or playing an effect fails. Every
    /// uploaded effect is erased before this returns. A failure also requests
    /// shutdown so the other loops stop.
    pub async fn run(mut self) -> Result<(), DeviceError> {
        log::debug!("Starting effect playback every {:?}", self.interval);
        let mut result = Ok(());
        loop {
            if self.token.is_cancelled() {
                break;
            }

            if let Err(e) = self.tick() {
                log::error!("Failed to play effect: {e}");
                self.token.cancel();
                result = Err(e);
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => (),
                _ = self.token.cancelled() => (),
            }
        }

        let erased = self.registry.erase_all();
        log::debug!("Stopped effect playback, erased {erased} effect(s)");
        result
    }
}
