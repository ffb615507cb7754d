use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

use crate::catalog::Catalog;
use crate::gate::GateKind;
use crate::search::chain::{breadth_first, ChainArena, ChainId, ChainVisitor};
use crate::table::{negate, InputCount, TruthTable};

/// Known minimal synthesis cost per truth table. Entries may repeat a value;
/// the cheapest one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostDictionary {
    pub input_count: InputCount,
    pub entries: Vec<(TruthTable, u32)>,
}

impl CostDictionary {
    pub fn new(input_count: InputCount, entries: Vec<(TruthTable, u32)>) -> Self {
        Self {
            input_count,
            entries,
        }
    }

    /// Every key OR-ed with `mask`, duplicates reduced to their minimum.
    pub fn masked(&self, mask: TruthTable) -> BTreeMap<TruthTable, u32> {
        let mut out = BTreeMap::new();
        for &(value, cost) in &self.entries {
            out.entry(value | mask)
                .and_modify(|c: &mut u32| *c = (*c).min(cost))
                .or_insert(cost);
        }
        out
    }

    pub fn cost_of(&self, value: TruthTable, mask: TruthTable) -> Option<u32> {
        self.entries
            .iter()
            .filter(|(v, _)| (v | mask) == (value | mask))
            .map(|(_, c)| *c)
            .min()
    }

    /// Builds a dictionary by enumerating every chain of `catalog` up to
    /// `max_depth` members. The cost of a value is the depth of the shortest
    /// chain that produces it through some gate, directly or complemented.
    /// A single primitive only produces its own table.
    #[instrument(skip(catalog), fields(inputs = %catalog.input_count))]
    pub fn enumerate(catalog: &Catalog, max_depth: usize) -> Self {
        let tables: Vec<TruthTable> = catalog.tables().collect();
        let mut table = DepthTable {
            input_count: catalog.input_count,
            tables: &tables,
            best: BTreeMap::new(),
        };
        let visited = breadth_first(&tables, max_depth, &mut table);
        event!(
            Level::DEBUG,
            "Visited {} chains, {} reachable values",
            visited,
            table.best.len()
        );
        Self {
            input_count: catalog.input_count,
            entries: table.best.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct DepthTable<'a> {
    input_count: InputCount,
    tables: &'a [TruthTable],
    best: BTreeMap<TruthTable, u32>,
}

impl DepthTable<'_> {
    fn record(&mut self, value: TruthTable, depth: usize) {
        // chains arrive in depth order, so the first sighting is the cheapest
        self.best.entry(value).or_insert(depth as u32);
    }
}

impl ChainVisitor for DepthTable<'_> {
    fn visit(&mut self, arena: &ChainArena, id: ChainId) {
        let node = arena.node(id);
        if node.depth == 1 {
            self.record(self.tables[node.index], 1);
            return;
        }
        for gate in GateKind::ALL {
            let value = node.state.result(gate);
            self.record(value, node.depth);
            self.record(negate(value, self.input_count), node.depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Catalog, CostDictionary, Primitive};
    use crate::table::InputCount;

    #[test]
    fn test_masked_takes_minimum() {
        let d = CostDictionary::new(
            InputCount::new(2).unwrap(),
            vec![(0b0110, 3), (0b0110, 2), (0b0111, 1)],
        );
        let m = d.masked(0);
        assert_eq!(m.get(&0b0110), Some(&2));
        let m = d.masked(0b0001);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&0b0111), Some(&1));
        assert_eq!(d.cost_of(0b0110, 0), Some(2));
        assert_eq!(d.cost_of(0b1110, 0), None);
    }

    #[test]
    fn test_enumerate_two_inputs() {
        let n = InputCount::new(2).unwrap();
        let catalog = Catalog::new(
            n,
            vec![Primitive::new("x", 0b1100), Primitive::new("y", 0b1010)],
        )
        .unwrap();
        let d = CostDictionary::enumerate(&catalog, 2);
        assert_eq!(d.cost_of(0b1100, 0), Some(1));
        assert_eq!(d.cost_of(0b1010, 0), Some(1));
        assert_eq!(d.cost_of(0b0110, 0), Some(2));
        assert_eq!(d.cost_of(0b1001, 0), Some(2));
        assert_eq!(d.cost_of(0b1000, 0), Some(2));
        assert_eq!(d.cost_of(0b0111, 0), Some(2));
        // complement of a single primitive needs a gate
        assert_eq!(d.cost_of(0b0011, 0), None);
    }

    #[test]
    fn test_enumerate_products() {
        let n = InputCount::new(2).unwrap();
        let d = CostDictionary::enumerate(&Catalog::products(n), 3);
        let m = d.masked(0);
        assert_eq!(m.get(&0b1000), Some(&1));
        // a ⊕ ab is a ∧ ¬b
        assert_eq!(m.get(&0b0100), Some(&2));
        assert_eq!(m.get(&0b1101), Some(&2));
        // one-hot xor never sets a bit seen twice, so a ∨ b ∨ ... stays unreachable
        assert_eq!(m.get(&0b1110), None);
        assert_eq!(m.len(), 10);
    }
}
