use std::error::Error;
use std::fs::{self, File};
use std::io::Write;

use rumblepad::config::GamepadConfig;
use schemars::schema_for;

const SCHEMA_DIR: &str = "./rootfs/usr/share/rumblepad/schema";

fn main() -> Result<(), Box<dyn Error>> {
    let config_schema = schema_for!(GamepadConfig);
    fs::create_dir_all(SCHEMA_DIR)?;
    let mut file = File::create(format!("{SCHEMA_DIR}/config_v1.json"))?;
    write!(file, "{}", serde_json::to_string_pretty(&config_schema)?)?;

    Ok(())
}
