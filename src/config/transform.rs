use serde::{Deserialize, Serialize};

use crate::transform::builder::DEFAULT_HARD_LIMIT;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransformConfig {
    #[serde(default = "default_hard_limit")]
    pub hard_limit: usize,
}

fn default_hard_limit() -> usize {
    DEFAULT_HARD_LIMIT
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            hard_limit: DEFAULT_HARD_LIMIT,
        }
    }
}
