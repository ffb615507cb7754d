use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Longest chain to try. Left out, it is one more than the input count.
    pub max_depth: Option<usize>,
}
