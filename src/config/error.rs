use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthConfigError {
    #[error("An error reading a file referenced from the config")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "toml")]
    #[error("Unable to parse TOML: {0}")]
    Toml(#[from] toml_edit::de::Error),
    #[cfg(not(feature = "toml"))]
    #[error("Reading catalog files requires the toml feature")]
    TomlDisabled,
    #[error("{} describes {found} inputs but {expected} were requested", .path.display())]
    InputCountMismatch {
        path: PathBuf,
        found: u8,
        expected: u8,
    },
}
