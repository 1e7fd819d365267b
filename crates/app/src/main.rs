//! Entry point for RoomView: logging, CLI config, host loop.

mod config;

use anyhow::Result;
use asset::AssetPaths;
use platform::HostConfig;
use renderer::RoomRenderer;

use crate::config::AppConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_args(std::env::args().skip(1));
    log::info!(
        "Starting RoomView. Backend: {:?}, window_size={}x{}, assets={}",
        config.backends,
        config.width,
        config.height,
        config.assets_dir.display()
    );

    let host = HostConfig {
        width: config.width,
        height: config.height,
        backends: config.backends,
        ..HostConfig::default()
    };
    let renderer = RoomRenderer::new(AssetPaths::in_dir(config.assets_dir));
    platform::run(host, renderer)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
