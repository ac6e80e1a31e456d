//! Ownership of the gamepad [DeviceState].
//!
//! A single [StateService] task owns the state and applies [StateUpdate]
//! messages sent by producers through a [StateClient]. Readers request copies
//! of the state through the same client, so no memory is shared between the
//! loops that produce and consume input.
pub mod client;
pub mod command;

#[cfg(test)]
mod state_test;

use tokio::sync::mpsc;

use crate::constants::STATE_BUFFER_SIZE;
use crate::input::event::{Axis, Button, Trigger};

use self::client::StateClient;
use self::command::StateCommand;

/// Button flags that stay set until they are consumed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Buttons {
    pub x: bool,
    pub y: bool,
    pub b: bool,
}

impl Buttons {
    /// Returns true if any button is latched
    pub fn any(&self) -> bool {
        self.x || self.y || self.b
    }
}

/// Last known position of every gamepad input. Sticks are in -1.0..=1.0 with
/// up and right being positive, triggers are in 0.0..=1.0.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DeviceState {
    pub left_x: f64,
    pub left_y: f64,
    pub right_x: f64,
    pub trigger_left: f64,
    pub trigger_right: f64,
    pub buttons: Buttons,
}

/// A single change to the [DeviceState]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateUpdate {
    Axis(Axis, f64),
    Trigger(Trigger, f64),
    ButtonPressed(Button),
}

impl DeviceState {
    /// Apply the given update. Only the most recent value of each input is
    /// kept.
    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::Axis(axis, value) => match axis {
                Axis::LeftX => self.left_x = value,
                Axis::LeftY => self.left_y = value,
                Axis::RightX => self.right_x = value,
            },
            StateUpdate::Trigger(trigger, value) => match trigger {
                Trigger::Left => self.trigger_left = value,
                Trigger::Right => self.trigger_right = value,
            },
            StateUpdate::ButtonPressed(button) => match button {
                Button::X => self.buttons.x = true,
                Button::Y => self.buttons.y = true,
                Button::B => self.buttons.b = true,
            },
        }
    }

    /// Returns the latched buttons and clears them
    pub fn take_buttons(&mut self) -> Buttons {
        std::mem::take(&mut self.buttons)
    }
}

/// Task that owns the [DeviceState]
#[derive(Debug)]
pub struct StateService {
    state: DeviceState,
    rx: mpsc::Receiver<StateCommand>,
}

impl StateService {
    /// Create a new state service along with a client to talk to it. The
    /// service stops once every client has been dropped.
    pub fn new() -> (Self, StateClient) {
        let (tx, rx) = mpsc::channel(STATE_BUFFER_SIZE);
        let service = Self {
            state: DeviceState::default(),
            rx,
        };
        (service, StateClient::new(tx))
    }

    /// Process commands until all clients are gone
    pub async fn run(mut self) -> DeviceState {
        log::debug!("Starting device state service");
        while let Some(cmd) = self.rx.recv().await {
            self.handle(cmd);
        }
        log::debug!("Device state service stopped");
        self.state
    }

    fn handle(&mut self, cmd: StateCommand) {
        match cmd {
            StateCommand::Update(update) => {
                log::trace!("Applying state update: {update:?}");
                self.state.apply(update);
            }
            StateCommand::GetState(tx) => {
                if tx.send(self.state).is_err() {
                    log::debug!("Requester of the device state went away");
                }
            }
            StateCommand::TakeButtons(tx) => {
                let buttons = self.state.take_buttons();
                // Put the presses back if nobody received them
                if let Err(buttons) = tx.send(buttons) {
                    self.state.buttons = buttons;
                }
            }
        }
    }
}
