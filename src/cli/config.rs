use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

use crate::{
    config::GamepadConfig,
    ff::{EffectDefinition, EffectKind},
    input::normalize::{AxisConfig, Polarity, TriggerConfig},
};

#[derive(Tabled)]
struct AxisRow {
    #[tabled(rename = "Axis")]
    name: String,
    #[tabled(rename = "Deadzone")]
    deadzone: i32,
    #[tabled(rename = "Max")]
    max_abs: f64,
    #[tabled(rename = "Polarity")]
    polarity: String,
}

impl AxisRow {
    fn new(name: &str, axis: &AxisConfig) -> Self {
        let polarity = match axis.polarity {
            Polarity::Normal => "normal",
            Polarity::Inverted => "inverted",
        };
        Self {
            name: name.to_string(),
            deadzone: axis.deadzone,
            max_abs: axis.max_abs,
            polarity: polarity.to_string(),
        }
    }
}

#[derive(Tabled)]
struct TriggerRow {
    #[tabled(rename = "Trigger")]
    name: String,
    #[tabled(rename = "Max")]
    max: f64,
}

impl TriggerRow {
    fn new(name: &str, trigger: &TriggerConfig) -> Self {
        Self {
            name: name.to_string(),
            max: trigger.max,
        }
    }
}

#[derive(Tabled)]
struct EffectRow {
    #[tabled(rename = "Effect")]
    name: String,
    #[tabled(rename = "Strong")]
    strong: String,
    #[tabled(rename = "Weak")]
    weak: String,
    #[tabled(rename = "Length (ms)")]
    length: u16,
    #[tabled(rename = "Delay (ms)")]
    delay: u16,
    #[tabled(rename = "Direction")]
    direction: String,
}

impl EffectRow {
    fn new(name: &str, effect: &EffectDefinition) -> Self {
        let EffectKind::Rumble {
            strong_magnitude,
            weak_magnitude,
        } = effect.kind;
        Self {
            name: name.to_string(),
            strong: format!("{strong_magnitude:#06x}"),
            weak: format!("{weak_magnitude:#06x}"),
            length: effect.length,
            delay: effect.delay,
            direction: format!("{:#06x}", effect.direction),
        }
    }
}

/// Print the given configuration as tables
pub fn handle_config(config: &GamepadConfig) {
    println!(
        "Device: {}",
        config.device.as_deref().unwrap_or("(not set)")
    );
    println!("Playback interval: {}ms", config.poll_interval_ms);
    println!("Control interval: {}ms", config.control_interval_ms);

    let axes = vec![
        AxisRow::new("left_x", &config.axes.left_x),
        AxisRow::new("left_y", &config.axes.left_y),
        AxisRow::new("right_x", &config.axes.right_x),
    ];
    let mut table = Table::new(axes);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Axes"));
    println!("{table}");

    let triggers = vec![
        TriggerRow::new("left", &config.triggers.left),
        TriggerRow::new("right", &config.triggers.right),
    ];
    let mut table = Table::new(triggers);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Triggers"));
    println!("{table}");

    let effects = vec![
        EffectRow::new("continuous", &config.effects.continuous),
        EffectRow::new("one_shot", &config.effects.one_shot),
    ];
    let mut table = Table::new(effects);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Effects"));
    println!("{table}");
}
