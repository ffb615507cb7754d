use std::sync::Arc;

use derive_builder::Builder;

use crate::catalog::{Catalog, CostDictionary};
use crate::error::SynthError;
use crate::search::ExpressionSearch;
use crate::table::{InputCount, TruthTable};

#[derive(Clone, Debug, Builder)]
pub struct SearchParams {
    pub input_count: InputCount,
    /// Inclusive; defaults to one more than the input count.
    #[builder(setter(strip_option), default)]
    pub max_depth: Option<usize>,
    pub target: TruthTable,
    #[builder(default)]
    pub mask: TruthTable,
    #[builder(setter(custom))]
    pub catalog: Arc<Catalog>,
    #[builder(setter(custom))]
    pub dictionary: Arc<CostDictionary>,
}

impl SearchParamsBuilder {
    pub fn catalog<T: Into<Arc<Catalog>>>(&mut self, catalog: T) -> &mut Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn dictionary<T: Into<Arc<CostDictionary>>>(&mut self, dictionary: T) -> &mut Self {
        self.dictionary = Some(dictionary.into());
        self
    }
}

impl SearchParams {
    pub fn max_depth(&self) -> usize {
        self.max_depth
            .unwrap_or(self.input_count.get() as usize + 1)
    }

    pub fn build(&self) -> Result<ExpressionSearch, SynthError> {
        ExpressionSearch::new(self)
    }
}
