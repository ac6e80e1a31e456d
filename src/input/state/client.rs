use std::time::Duration;

use thiserror::Error;
use tokio::sync::{
    mpsc::{error::SendTimeoutError, Sender},
    oneshot,
};

use super::{command::StateCommand, Buttons, DeviceState, StateUpdate};

/// Maximum duration to wait for the state service. Reaching it usually means
/// the service is stuck.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Possible errors for a state client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("timed out sending command to the state service")]
    Timeout,
    #[error("state service no longer exists")]
    ChannelClosed,
}

impl From<SendTimeoutError<StateCommand>> for ClientError {
    fn from(err: SendTimeoutError<StateCommand>) -> Self {
        match err {
            SendTimeoutError::Timeout(cmd) => {
                log::error!("POSSIBLE DEADLOCK: timed out after {DEFAULT_TIMEOUT:?} sending command to state service: {cmd:?}");
                Self::Timeout
            }
            SendTimeoutError::Closed(_) => Self::ChannelClosed,
        }
    }
}

/// A client for reading and updating the device state
#[derive(Debug, Clone)]
pub struct StateClient {
    tx: Sender<StateCommand>,
}

impl From<Sender<StateCommand>> for StateClient {
    fn from(tx: Sender<StateCommand>) -> Self {
        StateClient::new(tx)
    }
}

impl StateClient {
    pub fn new(tx: Sender<StateCommand>) -> Self {
        Self { tx }
    }

    async fn send(&self, cmd: StateCommand) -> Result<(), ClientError> {
        self.tx.send_timeout(cmd, DEFAULT_TIMEOUT).await?;
        Ok(())
    }

    async fn recv<T>(rx: oneshot::Receiver<T>) -> Result<T, ClientError> {
        match tokio::time::timeout(DEFAULT_TIMEOUT, rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(ClientError::ChannelClosed),
            Err(_) => {
                log::error!("POSSIBLE DEADLOCK: timed out after {DEFAULT_TIMEOUT:?} waiting for state service");
                Err(ClientError::Timeout)
            }
        }
    }

    /// Apply the given update to the device state
    pub async fn update(&self, update: StateUpdate) -> Result<(), ClientError> {
        self.send(StateCommand::Update(update)).await
    }

    /// Returns a copy of the current device state
    pub async fn get_state(&self) -> Result<DeviceState, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.send(StateCommand::GetState(tx)).await?;
        Self::recv(rx).await
    }

    /// Returns the latched buttons and clears them
    pub async fn take_buttons(&self) -> Result<Buttons, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.send(StateCommand::TakeButtons(tx)).await?;
        Self::recv(rx).await
    }
}
