//! Force feedback device double that records every call made to it
use std::io;
use std::sync::{Arc, Mutex};

use crate::input::source::DeviceError;

use super::{EffectDefinition, EffectHandle, ForceFeedbackDevice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Upload(EffectHandle),
    Play(EffectHandle, i32),
    Erase(EffectHandle),
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<Call>,
    next_id: i16,
    uploads_left: Option<usize>,
    fail_plays: bool,
    fail_erases: bool,
}

/// Clones share the same call log and failure settings
#[derive(Debug, Default, Clone)]
pub struct RecordingDevice {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every upload after the given number of successful ones
    pub fn fail_uploads_after(&self, count: usize) {
        self.inner.lock().unwrap().uploads_left = Some(count);
    }

    pub fn fail_plays(&self) {
        self.inner.lock().unwrap().fail_plays = true;
    }

    pub fn fail_erases(&self) {
        self.inner.lock().unwrap().fail_erases = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn plays(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Play(..)))
            .count()
    }

    pub fn erased(&self) -> Vec<EffectHandle> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Erase(handle) => Some(handle),
                _ => None,
            })
            .collect()
    }
}

impl ForceFeedbackDevice for RecordingDevice {
    fn upload_effect(&mut self, _effect: &EffectDefinition) -> Result<EffectHandle, DeviceError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(left) = inner.uploads_left.as_mut() {
            if *left == 0 {
                return Err(DeviceError::Upload(io::Error::other("upload rejected")));
            }
            *left -= 1;
        }
        let handle = EffectHandle::from(inner.next_id);
        inner.next_id += 1;
        inner.calls.push(Call::Upload(handle));
        Ok(handle)
    }

    fn play_effect(&mut self, handle: EffectHandle, repeat_count: i32) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Play(handle, repeat_count));
        if inner.fail_plays {
            return Err(DeviceError::Play(io::Error::other("write failed")));
        }
        Ok(())
    }

    fn erase_effect(&mut self, handle: EffectHandle) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Erase(handle));
        if inner.fail_erases {
            return Err(DeviceError::Erase(io::Error::other("erase failed")));
        }
        Ok(())
    }
}
