use std::collections::HashMap;
use std::fmt::Debug;

use evdev::{Device, FFEffect, FFEffectCode, FFEffectData};

use crate::{
    ff::{EffectDefinition, EffectHandle, ForceFeedbackDevice},
    input::event::{RawEvent, RawEventStream},
};

use super::DeviceError;

/// Gamepad backed by an evdev device node that supports rumble effects
pub struct EvdevGamepad {
    path: String,
    device: Device,
    ff_effects: HashMap<EffectHandle, FFEffect>,
}

impl EvdevGamepad {
    /// Open the event device at the given path. Fails if the device cannot
    /// play rumble effects.
    pub fn open(path: &str) -> Result<Self, DeviceError> {
        log::debug!("Opening device at: {path}");
        let device = Device::open(path).map_err(|source| DeviceError::Open {
            path: path.to_string(),
            source,
        })?;

        let supports_rumble = device
            .supported_ff()
            .map(|ff| ff.contains(FFEffectCode::FF_RUMBLE))
            .unwrap_or_default();
        if !supports_rumble {
            let name = device.name().unwrap_or("unknown");
            return Err(DeviceError::Unsupported(format!(
                "{name} at {path} has no rumble support"
            )));
        }

        Ok(Self {
            path: path.to_string(),
            device,
            ff_effects: HashMap::new(),
        })
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub fn name(&self) -> String {
        self.device.name().unwrap_or("unknown").to_string()
    }

    /// Open a second handle to the device and return its input events as a
    /// stream. The stream never ends on its own; a read error usually means
    /// the device was unplugged.
    pub fn event_stream(&self) -> Result<RawEventStream, DeviceError> {
        let open_err = |source| DeviceError::Open {
            path: self.path.clone(),
            source,
        };
        let device = Device::open(self.path.as_str()).map_err(open_err)?;
        let events = device.into_event_stream().map_err(open_err)?;

        let stream = futures::stream::unfold(events, |mut events| async move {
            let event = events.next_event().await.map(RawEvent::from);
            Some((event, events))
        });

        Ok(Box::pin(stream))
    }
}

impl ForceFeedbackDevice for EvdevGamepad {
    fn upload_effect(&mut self, effect: &EffectDefinition) -> Result<EffectHandle, DeviceError> {
        let data = FFEffectData::from(effect);
        log::trace!("Uploading FF effect data: {data:?}");
        let effect = self
            .device
            .upload_ff_effect(data)
            .map_err(DeviceError::Upload)?;
        let handle = EffectHandle::from(effect.id() as i16);
        self.ff_effects.insert(handle, effect);
        Ok(handle)
    }

    fn play_effect(&mut self, handle: EffectHandle, repeat_count: i32) -> Result<(), DeviceError> {
        let Some(effect) = self.ff_effects.get_mut(&handle) else {
            return Err(DeviceError::InvalidHandle(handle));
        };
        log::trace!("Playing FF effect {handle} {repeat_count} time(s)");
        effect.play(repeat_count).map_err(DeviceError::Play)
    }

    fn erase_effect(&mut self, handle: EffectHandle) -> Result<(), DeviceError> {
        // Dropping the effect removes it from the device
        let Some(effect) = self.ff_effects.remove(&handle) else {
            return Err(DeviceError::InvalidHandle(handle));
        };
        log::trace!("Erasing FF effect {handle}");
        drop(effect);
        Ok(())
    }
}

impl Debug for EvdevGamepad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevGamepad")
            .field("path", &self.path)
            .field("ff_effects", &self.ff_effects.keys())
            .finish()
    }
}
