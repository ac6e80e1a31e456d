pub mod config;
pub mod rumble;

use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};

use crate::{
    config::GamepadConfig, constants::DEFAULT_DEVICE_PATH, input::manager::Manager,
    sync::ShutdownToken,
};

use self::{config::handle_config, rumble::RumbleArgs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a config file to use instead of searching for one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Read the gamepad and play effects with its buttons (default)
    Run {
        /// Event device to open
        #[arg(short, long)]
        device: Option<String>,
    },
    /// Play a single rumble effect and exit
    Rumble(RumbleArgs),
    /// Show the effective configuration
    Config,
}

pub async fn main_cli(args: Args, token: ShutdownToken) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = GamepadConfig::load(args.config.as_deref())?;
    let cmd = args.cmd.unwrap_or(Commands::Run { device: None });

    match cmd {
        Commands::Run { device } => {
            let path = device_path(device, &config);
            let manager = Manager::new(config, token);
            manager.run(path.as_str()).await?;
        }
        Commands::Rumble(rumble_args) => {
            let path = device_path(rumble_args.device.clone(), &config);
            rumble::handle_rumble(path.as_str(), rumble_args, token).await?;
        }
        Commands::Config => handle_config(&config),
    }

    Ok(())
}

/// Returns the device path from the command line, the config file or the
/// default, in that order.
fn device_path(arg: Option<String>, config: &GamepadConfig) -> String {
    arg.or_else(|| config.device.clone())
        .unwrap_or_else(|| DEFAULT_DEVICE_PATH.to_string())
}
