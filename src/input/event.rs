use std::{io, pin::Pin};

use evdev::{AbsoluteAxisCode, EventType, InputEvent, KeyCode};
use futures::Stream;

/// A raw input event as read from an event device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    /// Create a new absolute axis event
    pub fn absolute(axis: AbsoluteAxisCode, value: i32) -> Self {
        Self::new(EventType::ABSOLUTE.0, axis.0, value)
    }

    /// Create a new key/button event
    pub fn key(key: KeyCode, value: i32) -> Self {
        Self::new(EventType::KEY.0, key.0, value)
    }

    /// Returns the recognized input this event is for, if any
    pub fn input(&self) -> Option<InputCode> {
        InputCode::from_raw(self.event_type, self.code)
    }
}

impl From<InputEvent> for RawEvent {
    fn from(event: InputEvent) -> Self {
        Self::new(event.event_type().0, event.code(), event.value())
    }
}

/// Sticks with a normalized range of -1.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
}

/// Triggers with a normalized range of 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Left,
    Right,
}

/// Buttons that are latched until consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    X,
    Y,
    B,
}

/// The fixed set of inputs understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    Axis(Axis),
    Trigger(Trigger),
    Button(Button),
}

impl InputCode {
    /// Look up the input for the given event type and code. Returns [None]
    /// for anything that is not part of the gamepad mapping.
    pub fn from_raw(event_type: u16, code: u16) -> Option<Self> {
        match EventType(event_type) {
            EventType::ABSOLUTE => match AbsoluteAxisCode(code) {
                AbsoluteAxisCode::ABS_X => Some(Self::Axis(Axis::LeftX)),
                AbsoluteAxisCode::ABS_Y => Some(Self::Axis(Axis::LeftY)),
                AbsoluteAxisCode::ABS_RX => Some(Self::Axis(Axis::RightX)),
                AbsoluteAxisCode::ABS_Z => Some(Self::Trigger(Trigger::Left)),
                AbsoluteAxisCode::ABS_RZ => Some(Self::Trigger(Trigger::Right)),
                _ => None,
            },
            // BTN_NORTH is also known as BTN_X, BTN_WEST as BTN_Y
            EventType::KEY => match KeyCode(code) {
                KeyCode::BTN_NORTH => Some(Self::Button(Button::X)),
                KeyCode::BTN_WEST => Some(Self::Button(Button::Y)),
                KeyCode::BTN_EAST => Some(Self::Button(Button::B)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Boxed stream of raw events read from a device
pub type RawEventStream = Pin<Box<dyn Stream<Item = io::Result<RawEvent>> + Send>>;
