#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use crate::input::source::DeviceError;

use super::{EffectDefinition, EffectHandle, ForceFeedbackDevice};

/// The [EffectRegistry] owns every effect uploaded to a device and makes sure
/// no handle is used after it was erased.
#[derive(Debug)]
pub struct EffectRegistry<D> {
    device: D,
    effects: HashMap<EffectHandle, EffectDefinition>,
}

impl<D> EffectRegistry<D>
where
    D: ForceFeedbackDevice,
{
    pub fn new(device: D) -> Self {
        Self {
            device,
            effects: HashMap::new(),
        }
    }

    /// Upload the given effect to the device
    pub fn upload(&mut self, effect: &EffectDefinition) -> Result<EffectHandle, DeviceError> {
        let handle = self.device.upload_effect(effect)?;
        log::debug!("Uploaded effect {handle}: {effect:?}");
        if self.effects.insert(handle, *effect).is_some() {
            log::warn!("Device reused id {handle} of an effect that was still uploaded");
        }
        Ok(handle)
    }

    /// Play the effect with the given handle
    pub fn play(&mut self, handle: EffectHandle, repeat_count: i32) -> Result<(), DeviceError> {
        if !self.effects.contains_key(&handle) {
            return Err(DeviceError::InvalidHandle(handle));
        }
        log::trace!("Playing effect {handle}");
        self.device.play_effect(handle, repeat_count)
    }

    /// Erase the effect with the given handle. The handle is invalid after
    /// this call even if the device failed to erase it.
    pub fn erase(&mut self, handle: EffectHandle) -> Result<(), DeviceError> {
        if self.effects.remove(&handle).is_none() {
            return Err(DeviceError::InvalidHandle(handle));
        }
        log::debug!("Erasing effect {handle}");
        self.device.erase_effect(handle)
    }

    /// Erase every uploaded effect. Failures are logged and do not stop the
    /// remaining effects from being erased. Returns the number of effects
    /// that were erased without error.
    pub fn erase_all(&mut self) -> usize {
        let handles: Vec<EffectHandle> = self.effects.keys().copied().collect();
        let mut erased = 0;
        for handle in handles {
            match self.erase(handle) {
                Ok(_) => erased += 1,
                Err(e) => log::warn!("Failed to erase effect {handle}: {e}"),
            }
        }
        erased
    }

    /// Returns true if the given handle refers to an uploaded effect
    pub fn is_live(&self, handle: EffectHandle) -> bool {
        self.effects.contains_key(&handle)
    }

    /// Returns the definition the given effect was uploaded with
    pub fn definition(&self, handle: EffectHandle) -> Option<&EffectDefinition> {
        self.effects.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}
