#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::EffectHandle;

/// Which effect the playback loop should play next
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EffectSelector {
    #[default]
    None,
    /// Replayed every tick until another selection is made
    Continuous(EffectHandle),
    /// Played on the next tick only
    OneShot(EffectHandle),
}

impl EffectSelector {
    /// Returns the effect to play now. A one-shot selection is reset to
    /// [EffectSelector::None] so that it is never returned twice.
    pub fn consume(&mut self) -> Option<EffectHandle> {
        match *self {
            EffectSelector::None => None,
            EffectSelector::Continuous(handle) => Some(handle),
            EffectSelector::OneShot(handle) => {
                *self = EffectSelector::None;
                Some(handle)
            }
        }
    }
}

/// An [EffectSelector] shared between the loop that selects effects and the
/// loop that plays them.
#[derive(Debug, Default, Clone)]
pub struct SharedSelector {
    inner: Arc<Mutex<EffectSelector>>,
}

impl SharedSelector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EffectSelector> {
        // The selector is a plain value, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the current selection
    pub fn set(&self, selector: EffectSelector) {
        log::debug!("Selecting effect: {selector:?}");
        *self.lock() = selector;
    }

    pub fn clear(&self) {
        self.set(EffectSelector::None);
    }

    pub fn get(&self) -> EffectSelector {
        *self.lock()
    }

    /// Read and, for one-shot effects, clear the selection in a single step
    pub fn consume(&self) -> Option<EffectHandle> {
        self.lock().consume()
    }
}
