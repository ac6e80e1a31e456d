use tokio::sync::oneshot;

use super::{Buttons, DeviceState, StateUpdate};

/// Commands that can be sent to the [super::StateService] over a channel
#[derive(Debug)]
pub enum StateCommand {
    Update(StateUpdate),
    GetState(oneshot::Sender<DeviceState>),
    TakeButtons(oneshot::Sender<Buttons>),
}
