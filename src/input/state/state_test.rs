use std::error::Error;

use crate::input::event::{Axis, Button, Trigger};
use crate::input::state::{Buttons, DeviceState, StateService, StateUpdate};

#[tokio::test]
async fn test_apply_updates() -> Result<(), Box<dyn Error>> {
    let mut state = DeviceState::default();
    state.apply(StateUpdate::Axis(Axis::LeftX, -0.5));
    state.apply(StateUpdate::Axis(Axis::LeftY, 0.25));
    state.apply(StateUpdate::Axis(Axis::RightX, 1.0));
    state.apply(StateUpdate::Trigger(Trigger::Left, 0.1));
    state.apply(StateUpdate::Trigger(Trigger::Right, 0.9));
    state.apply(StateUpdate::Axis(Axis::LeftX, 0.75));

    assert_eq!(state.left_x, 0.75);
    assert_eq!(state.left_y, 0.25);
    assert_eq!(state.right_x, 1.0);
    assert_eq!(state.trigger_left, 0.1);
    assert_eq!(state.trigger_right, 0.9);
    assert!(!state.buttons.any());

    Ok(())
}

#[tokio::test]
async fn test_buttons_latch_until_taken() -> Result<(), Box<dyn Error>> {
    let mut state = DeviceState::default();
    state.apply(StateUpdate::ButtonPressed(Button::Y));
    state.apply(StateUpdate::ButtonPressed(Button::Y));
    state.apply(StateUpdate::ButtonPressed(Button::B));

    let buttons = state.take_buttons();
    assert_eq!(
        buttons,
        Buttons {
            x: false,
            y: true,
            b: true
        }
    );
    assert_eq!(state.take_buttons(), Buttons::default());

    Ok(())
}

#[tokio::test]
async fn test_service() -> Result<(), Box<dyn Error>> {
    let (service, client) = StateService::new();
    let handle = tokio::spawn(service.run());

    client
        .update(StateUpdate::Trigger(Trigger::Right, 0.5))
        .await?;
    client.update(StateUpdate::ButtonPressed(Button::X)).await?;

    let state = client.get_state().await?;
    assert_eq!(state.trigger_right, 0.5);
    assert!(state.buttons.x);

    let buttons = client.take_buttons().await?;
    assert!(buttons.x);
    let buttons = client.take_buttons().await?;
    assert!(!buttons.any());

    // The service stops once every client is gone
    drop(client);
    let state = handle.await?;
    assert_eq!(state.trigger_right, 0.5);
    assert!(!state.buttons.x);

    Ok(())
}
