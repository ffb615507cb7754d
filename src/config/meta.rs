use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SynthLogLevel {
    Trace,
    Debug,
    Warn,
    Info,
    Error,
}

impl From<SynthLogLevel> for Level {
    fn from(value: SynthLogLevel) -> Self {
        match value {
            SynthLogLevel::Trace => Level::TRACE,
            SynthLogLevel::Debug => Level::DEBUG,
            SynthLogLevel::Warn => Level::WARN,
            SynthLogLevel::Info => Level::INFO,
            SynthLogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetaConfig {
    pub log_level: SynthLogLevel,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            log_level: SynthLogLevel::Info,
        }
    }
}
