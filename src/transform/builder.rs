use std::sync::Arc;

use derive_builder::Builder;

use crate::catalog::CostDictionary;
use crate::error::SynthError;
use crate::table::{InputCount, TruthTable};
use crate::transform::TransitionSearch;

pub const DEFAULT_HARD_LIMIT: usize = 20;

#[derive(Clone, Debug, Builder)]
pub struct TransformParams {
    pub input_count: InputCount,
    /// One truth table per output.
    pub terms: Vec<TruthTable>,
    #[builder(default)]
    pub mask: TruthTable,
    /// Stop once this many invertible transforms have been collected.
    #[builder(default = "DEFAULT_HARD_LIMIT")]
    pub hard_limit: usize,
    #[builder(setter(custom))]
    pub dictionary: Arc<CostDictionary>,
}

impl TransformParamsBuilder {
    pub fn dictionary<T: Into<Arc<CostDictionary>>>(&mut self, dictionary: T) -> &mut Self {
        self.dictionary = Some(dictionary.into());
        self
    }
}

impl TransformParams {
    pub fn build(&self) -> Result<TransitionSearch, SynthError> {
        TransitionSearch::new(self)
    }
}
