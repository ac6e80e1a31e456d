#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod dispatcher_test;

use std::io;

use futures::{Stream, StreamExt};

use crate::{
    config::{AxesConfig, TriggersConfig},
    sync::ShutdownToken,
};

use super::{
    event::{Axis, InputCode, RawEvent, Trigger},
    source::DeviceError,
    state::{client::StateClient, StateUpdate},
    InputError,
};

/// The [EventDispatcher] is the only consumer of a device's raw event stream.
/// It normalizes every recognized event and sends the result to the device
/// state owner.
#[derive(Debug)]
pub struct EventDispatcher {
    axes: AxesConfig,
    triggers: TriggersConfig,
    state: StateClient,
    token: ShutdownToken,
}

impl EventDispatcher {
    pub fn new(
        axes: AxesConfig,
        triggers: TriggersConfig,
        state: StateClient,
        token: ShutdownToken,
    ) -> Self {
        Self {
            axes,
            triggers,
            state,
            token,
        }
    }

    /// Translate the given raw event into a state update. Returns [None] for
    /// events that are not part of the gamepad mapping and for button
    /// releases.
    pub fn translate(&self, event: &RawEvent) -> Option<StateUpdate> {
        let update = match event.input()? {
            InputCode::Axis(axis) => {
                let config = match axis {
                    Axis::LeftX => &self.axes.left_x,
                    Axis::LeftY => &self.axes.left_y,
                    Axis::RightX => &self.axes.right_x,
                };
                StateUpdate::Axis(axis, config.normalize(event.value))
            }
            InputCode::Trigger(trigger) => {
                let config = match trigger {
                    Trigger::Left => &self.triggers.left,
                    Trigger::Right => &self.triggers.right,
                };
                StateUpdate::Trigger(trigger, config.normalize(event.value))
            }
            InputCode::Button(button) => {
                if event.value == 0 {
                    return None;
                }
                StateUpdate::ButtonPressed(button)
            }
        };
        Some(update)
    }

    /// Consume the given event stream until shutdown is requested. The end of
    /// the stream or a read error means the device went away; shutdown is
    /// requested and [DeviceError::Disconnected] is returned.
    pub async fn run<S>(self, mut events: S) -> Result<(), InputError>
    where
        S: Stream<Item = io::Result<RawEvent>> + Unpin,
    {
        log::debug!("Starting event dispatcher");
        loop {
            if self.token.is_cancelled() {
                break;
            }

            let next = tokio::select! {
                _ = self.token.cancelled() => break,
                next = events.next() => next,
            };
            let event = match next {
                Some(Ok(event)) => event,
                Some(Err(e)) => {
                    log::error!("Failed to read event: {e}");
                    self.token.cancel();
                    return Err(DeviceError::Disconnected.into());
                }
                None => {
                    log::error!("Event stream ended");
                    self.token.cancel();
                    return Err(DeviceError::Disconnected.into());
                }
            };

            log::trace!("Received event: {event:?}");
            let Some(update) = self.translate(&event) else {
                continue;
            };
            if let Err(e) = self.state.update(update).await {
                self.token.cancel();
                return Err(e.into());
            }
        }
        log::debug!("Stopped event dispatcher");

        Ok(())
    }
}
