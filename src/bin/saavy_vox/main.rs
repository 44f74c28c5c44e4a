//! saavy_vox - vocoder on the default audio devices
//!
//! Run with: cargo run -- [config.json]
//!
//! Sing into the default input; the vocoded synth plays on the default
//! output. Press Enter for the function button, `q` + Enter to quit.

mod controls;
mod host;

use std::{fs, path::Path};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use saavy_vox::EngineConfig;
use tracing::info;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => EngineConfig::default(),
    };

    host::run(config)?;
    info!("stopped");
    Ok(())
}

fn load_config(path: &Path) -> EyreResult<EngineConfig> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}
