use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::search::Solution;
use crate::table::TruthTable;

/// Two dictionary values whose XOR reproduces a target outside the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplementaryPair {
    pub first: TruthTable,
    pub second: TruthTable,
    pub cost: u32,
}

/// One side of a split search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfSolution {
    pub target: TruthTable,
    pub cost: u32,
    pub solutions: Option<Vec<Solution>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSolution {
    pub first: HalfSolution,
    pub second: HalfSolution,
}

/// Cheapest pair `(a, b)` of dictionary keys with `(target ^ a) | mask == b`.
/// Keys are visited in ascending order and only a strictly cheaper pair
/// replaces the current best, so ties go to the smallest `a`.
pub fn cheapest_pair(
    dictionary: &BTreeMap<TruthTable, u32>,
    target: TruthTable,
    mask: TruthTable,
) -> Option<ComplementaryPair> {
    let mut best: Option<ComplementaryPair> = None;
    for (&a, &cost_a) in dictionary {
        let b = (target ^ a) | mask;
        if let Some(&cost_b) = dictionary.get(&b) {
            let cost = cost_a + cost_b;
            if best.map_or(true, |p| cost < p.cost) {
                best = Some(ComplementaryPair {
                    first: a,
                    second: b,
                    cost,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::search::split::cheapest_pair;

    #[test]
    fn test_cheapest_pair() {
        let dict = BTreeMap::from([(0b0001, 3), (0b0110, 1), (0b0111, 1), (0b1000, 1)]);
        // 0b1110 = 0b0110 ^ 0b1000 (cost 2) or 0b0001 ^ ... (not present)
        let p = cheapest_pair(&dict, 0b1110, 0).unwrap();
        assert_eq!((p.first, p.second, p.cost), (0b0110, 0b1000, 2));
    }

    #[test]
    fn test_tie_goes_to_lowest_value() {
        let dict = BTreeMap::from([(0b0011, 1), (0b0101, 1), (0b0110, 1), (0b0000, 5)]);
        // 0b0011^0b0101, 0b0101^0b0011 are the same pair; 0b0110^0b0000 costs more
        let p = cheapest_pair(&dict, 0b0110, 0).unwrap();
        assert_eq!((p.first, p.second), (0b0011, 0b0101));
    }

    #[test]
    fn test_no_pair() {
        let dict = BTreeMap::from([(0b0001, 1), (0b0010, 1)]);
        assert!(cheapest_pair(&dict, 0b1000, 0).is_none());
    }

    #[test]
    fn test_mask_is_applied_to_partner() {
        // keys arrive already OR-ed with the mask
        let dict = BTreeMap::from([(0b0111, 1), (0b1010, 1)]);
        // 0b1111 ^ 0b0111 = 0b1000, which only matches once bit 1 is forced on
        let p = cheapest_pair(&dict, 0b1111, 0b0010).unwrap();
        assert_eq!((p.first, p.second, p.cost), (0b0111, 0b1010, 2));
    }
}
