#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::io;

use futures::Stream;

use crate::{
    config::{EffectsConfig, GamepadConfig},
    ff::{
        playback::Playback, registry::EffectRegistry, selector::SharedSelector,
        ForceFeedbackDevice,
    },
    sync::ShutdownToken,
};

use super::{
    controller::{Controller, EffectSlots},
    dispatcher::EventDispatcher,
    event::RawEvent,
    source::{evdev::EvdevGamepad, DeviceError},
    state::StateService,
    InputError,
};

/// The [Manager] wires a device to the event dispatcher, the device state
/// owner, the controller and the effect playback loop, and runs them until
/// shutdown is requested.
#[derive(Debug)]
pub struct Manager {
    config: GamepadConfig,
    token: ShutdownToken,
}

impl Manager {
    pub fn new(config: GamepadConfig, token: ShutdownToken) -> Self {
        Self { config, token }
    }

    /// Open the event device at the given path and run until shutdown
    pub async fn run(&self, path: &str) -> Result<(), InputError> {
        let device = EvdevGamepad::open(path)?;
        log::info!("Using gamepad '{}' at {}", device.name(), device.path());
        let events = device.event_stream()?;
        self.run_with(device, events).await
    }

    /// Run with the given force feedback device and its event stream. Every
    /// uploaded effect is erased before this returns, whether it stopped
    /// because of a shutdown request or because of an error.
    pub async fn run_with<D, S>(&self, device: D, events: S) -> Result<(), InputError>
    where
        D: ForceFeedbackDevice,
        S: Stream<Item = io::Result<RawEvent>> + Unpin,
    {
        let mut registry = EffectRegistry::new(device);
        let effects = match load_effects(&mut registry, &self.config.effects) {
            Ok(effects) => effects,
            Err(e) => {
                log::error!("Failed to upload effects: {e}");
                registry.erase_all();
                return Err(e.into());
            }
        };

        let selector = SharedSelector::new();
        let (state_service, state) = StateService::new();
        let dispatcher = EventDispatcher::new(
            self.config.axes,
            self.config.triggers,
            state.clone(),
            self.token.clone(),
        );
        let controller = Controller::new(
            state,
            selector.clone(),
            self.token.clone(),
            effects,
            self.config.control_interval(),
        );
        let playback = Playback::new(
            registry,
            selector,
            self.token.clone(),
            self.config.poll_interval(),
        );

        // All loops share this task and only yield at their await points
        let (_, dispatch_result, control_result, playback_result) = tokio::join!(
            state_service.run(),
            dispatcher.run(events),
            controller.run(),
            playback.run(),
        );
        log::debug!("All gamepad loops stopped");

        dispatch_result?;
        playback_result?;
        control_result?;

        Ok(())
    }
}

/// Upload the configured effects. Effects that were uploaded before a failure
/// stay in the registry so the caller can erase them.
fn load_effects<D>(
    registry: &mut EffectRegistry<D>,
    effects: &EffectsConfig,
) -> Result<EffectSlots, DeviceError>
where
    D: ForceFeedbackDevice,
{
    let continuous = registry.upload(&effects.continuous)?;
    let one_shot = registry.upload(&effects.one_shot)?;
    Ok(EffectSlots {
        continuous,
        one_shot,
    })
}
