use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::error::SynthError::{CatalogMismatch, EmptyCatalog};
use crate::table::{InputCount, TruthTable};

pub mod dictionary;

pub use dictionary::CostDictionary;

const VARIABLE_NAMES: [char; 4] = ['a', 'b', 'c', 'd'];

/// A base signal that expressions are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PrimitiveEntry")]
pub struct Primitive {
    pub label: String,
    pub table: TruthTable,
    /// Opaque data handed back with every solution using this primitive.
    /// Defaults to the label.
    pub payload: String,
}

/// File form of a [Primitive], where the payload may be left out.
#[derive(Deserialize)]
struct PrimitiveEntry {
    label: String,
    table: TruthTable,
    payload: Option<String>,
}

impl From<PrimitiveEntry> for Primitive {
    fn from(value: PrimitiveEntry) -> Self {
        let p = Primitive::new(value.label, value.table);
        match value.payload {
            Some(payload) => p.with_payload(payload),
            None => p,
        }
    }
}

impl Primitive {
    pub fn new<S: Into<String>>(label: S, table: TruthTable) -> Self {
        let label = label.into();
        Self {
            payload: label.clone(),
            label,
            table,
        }
    }

    pub fn with_payload<S: Into<String>>(mut self, payload: S) -> Self {
        self.payload = payload.into();
        self
    }
}

/// The ordered primitive list for one input count. Chains refer to
/// primitives by their index in this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub input_count: InputCount,
    pub primitives: Vec<Primitive>,
}

impl Catalog {
    pub fn new(input_count: InputCount, primitives: Vec<Primitive>) -> Result<Self, SynthError> {
        if primitives.is_empty() {
            return Err(EmptyCatalog);
        }
        for p in &primitives {
            input_count.check(p.table)?;
        }
        Ok(Self {
            input_count,
            primitives,
        })
    }

    /// The single variables and every conjunction of them: `2^n - 1`
    /// primitives, shortest first.
    pub fn products(input_count: InputCount) -> Self {
        let n = input_count.get() as usize;
        let mut primitives: Vec<Primitive> = (1u32..(1 << n))
            .map(|subset| {
                let label: String = (0..n)
                    .filter(|k| subset & (1 << k) != 0)
                    .map(|k| VARIABLE_NAMES[k])
                    .collect();
                let table = (0..n)
                    .filter(|k| subset & (1 << k) != 0)
                    .fold(input_count.full_mask(), |acc, k| {
                        acc & variable_table(input_count, k)
                    });
                Primitive::new(label, table)
            })
            .collect();
        primitives.sort_by(|a, b| {
            a.label
                .len()
                .cmp(&b.label.len())
                .then_with(|| a.label.cmp(&b.label))
        });
        Self {
            input_count,
            primitives,
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn get(&self, index: usize) -> &Primitive {
        &self.primitives[index]
    }

    pub fn tables(&self) -> impl Iterator<Item = TruthTable> + '_ {
        self.primitives.iter().map(|p| p.table)
    }

    pub(crate) fn expect_inputs(&self, input_count: InputCount) -> Result<(), SynthError> {
        if self.input_count != input_count {
            Err(CatalogMismatch {
                catalog: self.input_count.get(),
                request: input_count.get(),
            })
        } else if self.is_empty() {
            Err(EmptyCatalog)
        } else {
            Ok(())
        }
    }
}

/// Truth table of input `k`, where input 0 is the most significant bit of
/// the assignment index.
pub fn variable_table(input_count: InputCount, k: usize) -> TruthTable {
    let n = input_count.get() as usize;
    (0..input_count.width())
        .filter(|i| (i >> (n - 1 - k)) & 1 == 1)
        .fold(0, |acc, i| acc | (1 << i))
}

#[cfg(test)]
mod tests {
    use crate::catalog::{variable_table, Catalog, Primitive};
    use crate::table::InputCount;

    #[test]
    fn test_variable_tables() {
        let two = InputCount::new(2).unwrap();
        assert_eq!(variable_table(two, 0), 0b1100);
        assert_eq!(variable_table(two, 1), 0b1010);
        let three = InputCount::new(3).unwrap();
        assert_eq!(variable_table(three, 0), 0b1111_0000);
        assert_eq!(variable_table(three, 2), 0b1010_1010);
    }

    #[test]
    fn test_products() {
        let catalog = Catalog::products(InputCount::new(2).unwrap());
        let labels: Vec<&str> = catalog.primitives.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "ab"]);
        assert_eq!(catalog.get(2).table, 0b1000);
        assert_eq!(Catalog::products(InputCount::new(4).unwrap()).len(), 15);
    }

    #[test]
    fn test_new_checks_width() {
        let two = InputCount::new(2).unwrap();
        assert!(Catalog::new(two, vec![Primitive::new("x", 0b1_0000)]).is_err());
        assert!(Catalog::new(two, vec![]).is_err());
        assert!(Catalog::new(two, vec![Primitive::new("x", 0b1100)]).is_ok());
    }
}
