#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::time::Duration;

use crate::{
    ff::{
        selector::{EffectSelector, SharedSelector},
        EffectHandle,
    },
    sync::ShutdownToken,
};

use super::{
    state::{client::StateClient, DeviceState},
    InputError,
};

/// Handles of the effects uploaded at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSlots {
    pub continuous: EffectHandle,
    pub one_shot: EffectHandle,
}

/// The [Controller] reacts to button presses:
///   * Y selects the continuous effect
///   * B selects the one-shot effect
///   * X requests shutdown
#[derive(Debug)]
pub struct Controller {
    state: StateClient,
    selector: SharedSelector,
    token: ShutdownToken,
    effects: EffectSlots,
    interval: Duration,
    last_state: Option<DeviceState>,
}

impl Controller {
    pub fn new(
        state: StateClient,
        selector: SharedSelector,
        token: ShutdownToken,
        effects: EffectSlots,
        interval: Duration,
    ) -> Self {
        Self {
            state,
            selector,
            token,
            effects,
            interval,
            last_state: None,
        }
    }

    /// Consume any latched button presses and act on them
    pub async fn step(&mut self) -> Result<(), InputError> {
        let buttons = self.state.take_buttons().await?;
        if buttons.y {
            log::info!("Playing continuous effect");
            self.selector
                .set(EffectSelector::Continuous(self.effects.continuous));
        }
        if buttons.b {
            log::info!("Playing one-shot effect");
            self.selector
                .set(EffectSelector::OneShot(self.effects.one_shot));
        }
        if buttons.x {
            log::info!("Stop requested from gamepad");
            self.token.cancel();
        }

        if log::log_enabled!(log::Level::Trace) {
            self.trace_state().await?;
        }

        Ok(())
    }

    async fn trace_state(&mut self) -> Result<(), InputError> {
        let state = self.state.get_state().await?;
        if self.last_state.as_ref() == Some(&state) {
            return Ok(());
        }
        log::trace!(
            "left_x: {:.2}, left_y: {:.2}, right_x: {:.2}, trigger_left: {:.2}, trigger_right: {:.2}",
            state.left_x,
            state.left_y,
            state.right_x,
            state.trigger_left,
            state.trigger_right
        );
        self.last_state = Some(state);
        Ok(())
    }

    /// Run until shutdown is requested
    pub async fn run(mut self) -> Result<(), InputError> {
        log::debug!("Starting controller");
        loop {
            if self.token.is_cancelled() {
                break;
            }

            if let Err(e) = self.step().await {
                self.token.cancel();
                return Err(e);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => (),
                _ = self.token.cancelled() => (),
            }
        }
        log::debug!("Stopped controller");

        Ok(())
    }
}
