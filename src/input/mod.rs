pub mod controller;
pub mod dispatcher;
pub mod event;
pub mod manager;
pub mod normalize;
pub mod source;
pub mod state;

use thiserror::Error;

use self::{source::DeviceError, state::client::ClientError};

/// Errors that stop one of the input loops
#[derive(Error, Debug)]
pub enum InputError {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("device state unavailable: {0}")]
    State(#[from] ClientError),
}
