use std::{error::Error, io, time::Duration};

use evdev::{AbsoluteAxisCode, KeyCode, RelativeAxisCode};
use futures::stream::{self, StreamExt};
use tokio::time::timeout;

use crate::{
    config::{AxesConfig, TriggersConfig},
    input::{
        dispatcher::EventDispatcher,
        event::{Axis, Button, RawEvent, Trigger},
        normalize::{AxisConfig, Polarity},
        source::DeviceError,
        state::{StateService, StateUpdate},
        InputError,
    },
    sync::ShutdownToken,
};

fn dispatcher(axes: AxesConfig) -> EventDispatcher {
    let (_service, client) = StateService::new();
    EventDispatcher::new(axes, TriggersConfig::default(), client, ShutdownToken::new())
}

#[tokio::test]
async fn test_translate_axes() -> Result<(), Box<dyn Error>> {
    let axes = AxesConfig {
        left_y: AxisConfig::new(2500, 32767.0, Polarity::Inverted),
        ..Default::default()
    };
    let dispatcher = dispatcher(axes);

    // Pushing the left stick up reports negative raw values
    let event = RawEvent::absolute(AbsoluteAxisCode::ABS_Y, -6000);
    let Some(StateUpdate::Axis(Axis::LeftY, value)) = dispatcher.translate(&event) else {
        return Err("expected a left Y update".into());
    };
    assert!((value - 3500.0 / 30268.0).abs() < 1e-12, "got {value}");

    let event = RawEvent::absolute(AbsoluteAxisCode::ABS_X, 1000);
    assert_eq!(
        dispatcher.translate(&event),
        Some(StateUpdate::Axis(Axis::LeftX, 0.0))
    );

    let event = RawEvent::absolute(AbsoluteAxisCode::ABS_RX, -32768);
    assert_eq!(
        dispatcher.translate(&event),
        Some(StateUpdate::Axis(Axis::RightX, -1.0))
    );

    Ok(())
}

#[tokio::test]
async fn test_translate_triggers() -> Result<(), Box<dyn Error>> {
    let dispatcher = dispatcher(AxesConfig::default());

    let event = RawEvent::absolute(AbsoluteAxisCode::ABS_Z, 1023);
    assert_eq!(
        dispatcher.translate(&event),
        Some(StateUpdate::Trigger(Trigger::Left, 1.0))
    );
    let event = RawEvent::absolute(AbsoluteAxisCode::ABS_RZ, 0);
    assert_eq!(
        dispatcher.translate(&event),
        Some(StateUpdate::Trigger(Trigger::Right, 0.0))
    );

    Ok(())
}

#[tokio::test]
async fn test_translate_buttons() -> Result<(), Box<dyn Error>> {
    let dispatcher = dispatcher(AxesConfig::default());

    let cases = [
        (KeyCode::BTN_NORTH, Button::X),
        (KeyCode::BTN_WEST, Button::Y),
        (KeyCode::BTN_EAST, Button::B),
    ];
    for (key, button) in cases {
        let event = RawEvent::key(key, 1);
        assert_eq!(
            dispatcher.translate(&event),
            Some(StateUpdate::ButtonPressed(button))
        );
        // Releases are ignored
        let event = RawEvent::key(key, 0);
        assert_eq!(dispatcher.translate(&event), None);
    }

    Ok(())
}

#[tokio::test]
async fn test_ignores_unknown_events() -> Result<(), Box<dyn Error>> {
    let dispatcher = dispatcher(AxesConfig::default());

    let events = [
        RawEvent::absolute(AbsoluteAxisCode::ABS_RY, 30000),
        RawEvent::absolute(AbsoluteAxisCode::ABS_HAT0X, 1),
        RawEvent::key(KeyCode::BTN_SOUTH, 1),
        RawEvent::key(KeyCode::BTN_MODE, 1),
        RawEvent::new(evdev::EventType::RELATIVE.0, RelativeAxisCode::REL_X.0, 5),
        RawEvent::new(0, 0, 0),
    ];
    for event in events {
        assert_eq!(dispatcher.translate(&event), None, "{event:?}");
    }

    Ok(())
}

#[tokio::test]
async fn test_run_updates_state() -> Result<(), Box<dyn Error>> {
    let (service, client) = StateService::new();
    let service = tokio::spawn(service.run());
    let token = ShutdownToken::new();
    let dispatcher = EventDispatcher::new(
        AxesConfig::default(),
        TriggersConfig::default(),
        client.clone(),
        token.clone(),
    );

    let events = vec![
        Ok(RawEvent::absolute(AbsoluteAxisCode::ABS_RZ, 1023)),
        Ok(RawEvent::absolute(AbsoluteAxisCode::ABS_RX, 32767)),
        Ok(RawEvent::key(KeyCode::BTN_WEST, 1)),
        Ok(RawEvent::new(0, 0, 0)),
    ];
    // Keep the stream open so only the token can stop the dispatcher
    let events = stream::iter(events).chain(stream::pending());
    let handle = tokio::spawn(dispatcher.run(events));

    tokio::time::sleep(Duration::from_millis(50)).await;
    let state = client.get_state().await?;
    assert_eq!(state.trigger_right, 1.0);
    assert_eq!(state.right_x, 1.0);
    assert!(state.buttons.y);
    assert!(!state.buttons.x);

    token.cancel();
    timeout(Duration::from_secs(1), handle).await???;

    drop(client);
    service.await?;

    Ok(())
}

#[tokio::test]
async fn test_stream_end_is_disconnect() -> Result<(), Box<dyn Error>> {
    let (service, client) = StateService::new();
    let service = tokio::spawn(service.run());
    let token = ShutdownToken::new();
    let dispatcher = EventDispatcher::new(
        AxesConfig::default(),
        TriggersConfig::default(),
        client,
        token.clone(),
    );

    let events = stream::iter(vec![Ok(RawEvent::key(KeyCode::BTN_EAST, 1))]);
    let result = timeout(Duration::from_secs(1), dispatcher.run(events)).await?;
    assert!(matches!(
        result,
        Err(InputError::Device(DeviceError::Disconnected))
    ));
    assert!(token.is_cancelled());

    let state = service.await?;
    assert!(state.buttons.b);

    Ok(())
}

#[tokio::test]
async fn test_read_error_is_disconnect() -> Result<(), Box<dyn Error>> {
    let (service, client) = StateService::new();
    let service = tokio::spawn(service.run());
    let token = ShutdownToken::new();
    let dispatcher = EventDispatcher::new(
        AxesConfig::default(),
        TriggersConfig::default(),
        client,
        token.clone(),
    );

    let events = stream::iter(vec![Err(io::Error::from_raw_os_error(19))]).chain(stream::pending());
    let result = timeout(Duration::from_secs(1), dispatcher.run(events)).await?;
    assert!(matches!(
        result,
        Err(InputError::Device(DeviceError::Disconnected))
    ));
    assert!(token.is_cancelled());
    service.await?;

    Ok(())
}

#[tokio::test]
async fn test_cancelled_before_start() -> Result<(), Box<dyn Error>> {
    let (_service, client) = StateService::new();
    let token = ShutdownToken::new();
    token.cancel();
    let dispatcher = EventDispatcher::new(
        AxesConfig::default(),
        TriggersConfig::default(),
        client,
        token,
    );

    // Events that are still queued are not consumed once shutdown was requested
    let events = stream::iter(vec![Ok(RawEvent::key(KeyCode::BTN_EAST, 1))]);
    timeout(Duration::from_secs(1), dispatcher.run(events)).await??;

    Ok(())
}
