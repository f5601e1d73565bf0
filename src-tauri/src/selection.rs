//! Current-model selection.
//!
//! Exactly one descriptor is current at any time. Replacing it is
//! unconditional and cannot fail.

use crate::catalog::{self, ModelDescriptor};

#[derive(Debug, Clone)]
pub struct SelectionState {
    current: ModelDescriptor,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(catalog::default_preset().descriptor())
    }
}

impl SelectionState {
    pub fn new(initial: ModelDescriptor) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &ModelDescriptor {
        &self.current
    }

    /// Replace the current model, returning the one it superseded.
    pub fn select(&mut self, descriptor: ModelDescriptor) -> ModelDescriptor {
        log::info!("[STATE] Selected model {} ({})", descriptor.id, descriptor.name);
        std::mem::replace(&mut self.current, descriptor)
    }
}
