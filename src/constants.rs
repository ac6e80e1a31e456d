pub const APP_NAME: &str = "rumblepad";

/// Event device opened when no path is configured
pub const DEFAULT_DEVICE_PATH: &str = "/dev/input/event0";

/// Interval of the force feedback playback loop
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Interval the controller checks for latched button presses
pub const DEFAULT_CONTROL_INTERVAL_MS: u64 = 10;

/// Number of times an effect is repeated per play request
pub const DEFAULT_REPEAT_COUNT: i32 = 1;

/// Capacity of the channel used to send updates to the device state owner
pub const STATE_BUFFER_SIZE: usize = 2048;
