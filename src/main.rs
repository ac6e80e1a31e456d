use std::env;
use std::error::Error;

use clap::Parser;
use rumblepad::cli::{main_cli, Args};
use rumblepad::sync::ShutdownToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    let args = Args::parse();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting rumblepad v{}", VERSION);

    // Setup CTRL+C handler
    let token = ShutdownToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Unable to listen for CTRL+C: {e:?}");
            return;
        }
        log::info!("Shutting down");
        ctrl_c_token.cancel();
    });

    if let Err(e) = main_cli(args, token).await {
        log::error!("{e}");
        return Err(e);
    }

    log::info!("rumblepad stopped");

    Ok(())
}
