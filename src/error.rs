use thiserror::Error;

use crate::config::error::SynthConfigError;
use crate::search::builder::SearchParamsBuilderError;
use crate::transform::builder::TransformParamsBuilderError;

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Input count must be 2, 3 or 4 (got {0})")]
    UnsupportedInputCount(u8),
    #[error("Truth table {table:#x} does not fit in {width} bits")]
    TableTooWide { table: u32, width: u32 },
    #[error("Term contains '{0}'; use only 0, 1 and lower case letters")]
    InvalidTermCharacter(char),
    #[error("Term length must be 4, 8 or 16 (got {0})")]
    InvalidTermLength(usize),
    #[error("All terms must have the same length and the same don't cares")]
    MismatchedTerms,
    #[error("Catalog is for {catalog} inputs but the request is for {request}")]
    CatalogMismatch { catalog: u8, request: u8 },
    #[error("The primitive catalog is empty")]
    EmptyCatalog,
    #[error("Maximum expression depth must be at least 1")]
    ZeroDepth,
    #[error("At least one output term is required")]
    NoTerms,
    #[error("Transforms are limited to {max} outputs (got {count})")]
    TooManyTerms { count: usize, max: usize },
    #[error("Hard limit must be at least 1")]
    ZeroHardLimit,
    #[error("The background job ended without reporting a result")]
    JobDisconnected,
    #[error("Config error: {0}")]
    Config(#[from] SynthConfigError),
    #[error("Invalid search params")]
    SearchParams(#[from] SearchParamsBuilderError),
    #[error("Invalid transform params")]
    TransformParams(#[from] TransformParamsBuilderError),
}
