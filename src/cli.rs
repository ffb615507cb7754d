use std::fs;
use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::SynthConfig;

/// Reads a config file, or falls back to the defaults when none is given.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> anyhow::Result<SynthConfig> {
    match path {
        Some(p) => {
            let s = fs::read_to_string(p)?;
            Ok(SynthConfig::from_toml_str(&s)?)
        }
        None => Ok(SynthConfig::default()),
    }
}

pub fn init_tracing(level: Level) -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .from_env()?
        .add_directive(format!("tablesynth={level}").parse()?);
    let indicatif_layer = IndicatifLayer::new();
    let writer = indicatif_layer.get_stderr_writer();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(indicatif_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
    Ok(())
}
