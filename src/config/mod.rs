use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CostDictionary};
use crate::config::catalog::CatalogConfig;
use crate::config::meta::MetaConfig;
use crate::config::search::SearchConfig;
use crate::config::transform::TransformConfig;
use crate::error::SynthError;
use crate::search::builder::{SearchParams, SearchParamsBuilder};
use crate::table::InputCount;
use crate::term::parse_terms;
use crate::transform::builder::{TransformParams, TransformParamsBuilder};

pub mod catalog;
pub mod error;
pub mod meta;
pub mod search;
pub mod transform;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
/// The serializable contents of a tablesynth .toml file. Every section is
/// optional. Combined with the terms given on the command line it produces
/// [SearchParams] or [TransformParams], which run the actual searches.
pub struct SynthConfig {
    #[serde(default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub transform: TransformConfig,
}

impl SynthConfig {
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, error::SynthConfigError> {
        Ok(toml_edit::de::from_str(s)?)
    }

    pub fn resolve_search(&self, term: &str) -> Result<SearchParams, SynthError> {
        let (input_count, tables, mask) = parse_terms(&[term])?;
        let (catalog, dictionary) = self.catalog.load(input_count)?;
        let mut b = SearchParamsBuilder::default();
        if let Some(depth) = self.search.max_depth {
            b.max_depth(depth);
        }
        b.input_count(input_count)
            .target(tables[0])
            .mask(mask)
            .catalog(catalog)
            .dictionary(dictionary);
        let params = b.build()?;
        Ok(params)
    }

    pub fn resolve_transform<S: AsRef<str>>(
        &self,
        terms: &[S],
    ) -> Result<TransformParams, SynthError> {
        let (input_count, tables, mask) = parse_terms(terms)?;
        let (_, dictionary) = self.catalog.load(input_count)?;
        let params = TransformParamsBuilder::default()
            .input_count(input_count)
            .terms(tables)
            .mask(mask)
            .hard_limit(self.transform.hard_limit)
            .dictionary(dictionary)
            .build()?;
        Ok(params)
    }

    /// Catalog and dictionary for `input_count`, shared between jobs.
    pub fn load_catalog(
        &self,
        input_count: InputCount,
    ) -> Result<(Arc<Catalog>, Arc<CostDictionary>), SynthError> {
        let (catalog, dictionary) = self.catalog.load(input_count)?;
        Ok((Arc::new(catalog), Arc::new(dictionary)))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::meta::SynthLogLevel;
    use crate::config::SynthConfig;
    use crate::transform::builder::DEFAULT_HARD_LIMIT;

    #[test]
    fn test_resolve_search() {
        let params = SynthConfig::default().resolve_search("01a0").unwrap();
        assert_eq!(params.input_count.get(), 2);
        assert_eq!(params.target, 0b0110);
        assert_eq!(params.mask, 0b0010);
        assert_eq!(params.max_depth(), 3);
        assert_eq!(params.catalog.len(), 3);
    }

    #[test]
    fn test_resolve_transform() {
        let mut config = SynthConfig::default();
        config.transform.hard_limit = 3;
        let params = config
            .resolve_transform(&["10001000", "01100110"])
            .unwrap();
        assert_eq!(params.terms, vec![0b1000_1000, 0b0110_0110]);
        assert_eq!(params.hard_limit, 3);
        assert!(config.resolve_transform(&["1000", "01100110"]).is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_parse() {
        let config = SynthConfig::from_toml_str(
            r#"
[meta]
log_level = "DEBUG"

[search]
max_depth = 2
"#,
        )
        .unwrap();
        assert_eq!(config.meta.log_level, SynthLogLevel::Debug);
        assert_eq!(config.search.max_depth, Some(2));
        assert_eq!(config.transform.hard_limit, DEFAULT_HARD_LIMIT);
        assert!(config.catalog.path.is_none());
        assert_eq!(SynthConfig::from_toml_str("").unwrap(), SynthConfig::default());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_default_survives_writing() {
        let s = toml_edit::ser::to_string_pretty(&SynthConfig::default()).unwrap();
        assert_eq!(SynthConfig::from_toml_str(&s).unwrap(), SynthConfig::default());
    }
}
