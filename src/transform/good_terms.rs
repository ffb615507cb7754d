use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::{subset_xor, TruthTable};

/// A dictionary value reachable as the XOR of some subset of the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodTerm {
    pub precursor: TruthTable,
    /// Bit `j` set means output `j` is part of the XOR.
    pub combination: u32,
    pub cost: u32,
}

/// Every non-empty subset of `terms` whose XOR (with `mask` applied) is in
/// `dictionary`, cheapest first. A value reached by several subsets keeps only
/// its cheapest generator, and among equals the smallest subset index.
pub fn good_terms(
    terms: &[TruthTable],
    mask: TruthTable,
    dictionary: &BTreeMap<TruthTable, u32>,
) -> Vec<GoodTerm> {
    let mut by_value: BTreeMap<TruthTable, GoodTerm> = BTreeMap::new();
    for combination in 1..(1u32 << terms.len()) {
        let precursor = subset_xor(terms, combination);
        if let Some(&cost) = dictionary.get(&(precursor | mask)) {
            let candidate = GoodTerm {
                precursor,
                combination,
                cost,
            };
            by_value
                .entry(precursor)
                .and_modify(|g| {
                    if cost < g.cost {
                        *g = candidate
                    }
                })
                .or_insert(candidate);
        }
    }
    let mut out: Vec<GoodTerm> = by_value.into_values().collect();
    out.sort_by_key(|g| (g.cost, g.combination));
    out
}
