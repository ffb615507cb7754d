use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::catalog::{Catalog, CostDictionary};
use crate::config::error::SynthConfigError;
use crate::error::SynthError;
use crate::table::InputCount;

/// Where primitives and costs come from. Without a path the built-in
/// product catalog is used and its dictionary is enumerated on the spot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
    /// Chain length used when a dictionary has to be enumerated.
    /// Defaults to one more than the input count.
    pub dictionary_depth: Option<usize>,
}

/// On-disk catalog. A missing dictionary is enumerated from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogFile {
    pub catalog: Catalog,
    pub dictionary: Option<CostDictionary>,
}

impl CatalogFile {
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, SynthConfigError> {
        Ok(toml_edit::de::from_str(s)?)
    }

    #[cfg(feature = "toml")]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SynthConfigError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    #[cfg(not(feature = "toml"))]
    pub fn load<P: AsRef<Path>>(_path: P) -> Result<Self, SynthConfigError> {
        Err(SynthConfigError::TomlDisabled)
    }
}

impl CatalogConfig {
    pub fn depth_for(&self, input_count: InputCount) -> usize {
        self.dictionary_depth
            .unwrap_or(input_count.get() as usize + 1)
    }

    pub fn load(&self, input_count: InputCount) -> Result<(Catalog, CostDictionary), SynthError> {
        let depth = self.depth_for(input_count);
        let (catalog, dictionary) = match &self.path {
            None => (Catalog::products(input_count), None),
            Some(path) => {
                let file = CatalogFile::load(path)?;
                check_inputs(path, file.catalog.input_count, input_count)?;
                if let Some(d) = &file.dictionary {
                    check_inputs(path, d.input_count, input_count)?;
                }
                let catalog = Catalog::new(file.catalog.input_count, file.catalog.primitives)?;
                (catalog, file.dictionary)
            }
        };
        let dictionary = match dictionary {
            Some(d) => d,
            None => {
                event!(
                    Level::DEBUG,
                    "Enumerating a {} input dictionary to depth {}",
                    input_count,
                    depth
                );
                CostDictionary::enumerate(&catalog, depth)
            }
        };
        Ok((catalog, dictionary))
    }
}

fn check_inputs(path: &Path, found: InputCount, expected: InputCount) -> Result<(), SynthConfigError> {
    if found != expected {
        return Err(SynthConfigError::InputCountMismatch {
            path: path.to_path_buf(),
            found: found.get(),
            expected: expected.get(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::catalog::Primitive;
    use crate::config::catalog::{CatalogConfig, CatalogFile};
    use crate::table::InputCount;

    #[test]
    fn test_builtin() {
        let n = InputCount::new(3).unwrap();
        let (catalog, dictionary) = CatalogConfig::default().load(n).unwrap();
        assert_eq!(catalog.len(), 7);
        assert_eq!(dictionary.input_count, n);
        assert_eq!(dictionary.cost_of(0b1000_1000, 0), Some(1));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_parse_file() {
        let file = CatalogFile::from_toml_str(
            r#"
[catalog]
input_count = 2

[[catalog.primitives]]
label = "x"
table = 12
payload = "wire 1"

[[catalog.primitives]]
label = "y"
table = 10

[dictionary]
input_count = 2
entries = [[12, 1], [10, 1], [6, 2]]
"#,
        )
        .unwrap();
        assert_eq!(file.catalog.primitives[0].payload, "wire 1");
        // a primitive without a payload carries its label, as Primitive::new does
        assert_eq!(file.catalog.primitives[1].payload, "y");
        assert_eq!(file.catalog.primitives[1], Primitive::new("y", 0b1010));
        let dictionary = file.dictionary.unwrap();
        assert_eq!(dictionary.cost_of(0b0110, 0), Some(2));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_rejects_bad_input_count() {
        assert!(CatalogFile::from_toml_str("[catalog]\ninput_count = 5\nprimitives = []\n").is_err());
    }
}
