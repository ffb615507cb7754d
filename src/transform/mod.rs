use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::ops::ControlFlow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

use crate::catalog::CostDictionary;
use crate::error::SynthError;
use crate::error::SynthError::{NoTerms, TooManyTerms, ZeroHardLimit};
use crate::table::{transpose, TruthTable};
use crate::transform::builder::TransformParams;
use crate::transform::good_terms::{good_terms, GoodTerm};
use crate::transform::matrix::{inverse_matrix, is_invertible, transition};
use crate::transform::odometer::Odometer;

pub mod builder;
pub mod display;
pub mod good_terms;
pub mod matrix;
pub mod odometer;

pub const MAX_TERMS: usize = 16;

/// An invertible GF(2) transform of the outputs and what it costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Sum of the dictionary costs of `transformed_terms`.
    pub cost: u32,
    /// Per transformed term, the original outputs it feeds (bit `j` = output `j`).
    pub rows: Vec<u32>,
    pub transformed_terms: Vec<TruthTable>,
    pub term_costs: Vec<u32>,
    /// The chosen forward combination per output, before merging.
    pub combinations: Vec<u32>,
    pub mask: TruthTable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub accepted: usize,
    pub tested: usize,
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.accepted, self.tested)
    }
}

/// Observes a running transform search. Returning `Break` stops the search
/// after the assignment that was just tested.
pub trait TransformMonitor {
    fn on_progress(&mut self, progress: Progress) -> ControlFlow<()>;
}

impl<F: FnMut(Progress) -> ControlFlow<()>> TransformMonitor for F {
    fn on_progress(&mut self, progress: Progress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Monitor that never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmonitored;

impl TransformMonitor for Unmonitored {
    fn on_progress(&mut self, _progress: Progress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Cheapest first.
    pub results: Vec<TransformResult>,
    pub progress: Progress,
    pub good_terms: usize,
    pub cancelled: bool,
}

pub struct TransitionSearch {
    terms: Vec<TruthTable>,
    mask: TruthTable,
    hard_limit: usize,
    dictionary: Arc<CostDictionary>,
}

impl TransitionSearch {
    pub fn new(params: &TransformParams) -> Result<Self, SynthError> {
        let input_count = params.input_count;
        if params.terms.is_empty() {
            return Err(NoTerms);
        }
        if params.terms.len() > MAX_TERMS {
            return Err(TooManyTerms {
                count: params.terms.len(),
                max: MAX_TERMS,
            });
        }
        if params.hard_limit == 0 {
            return Err(ZeroHardLimit);
        }
        if params.dictionary.input_count != input_count {
            return Err(SynthError::CatalogMismatch {
                catalog: params.dictionary.input_count.get(),
                request: input_count.get(),
            });
        }
        let terms = params
            .terms
            .iter()
            .map(|t| input_count.check(*t))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            terms,
            mask: input_count.check(params.mask)?,
            hard_limit: params.hard_limit,
            dictionary: params.dictionary.clone(),
        })
    }

    pub fn good_terms(&self) -> Vec<GoodTerm> {
        good_terms(&self.terms, self.mask, &self.dictionary.masked(self.mask))
    }

    #[instrument(skip_all, fields(outputs = self.terms.len(), hard_limit = self.hard_limit))]
    pub fn run<M: TransformMonitor>(&self, monitor: &mut M) -> TransformReport {
        let good = self.good_terms();
        event!(
            Level::DEBUG,
            "{} of {} linear combinations are in the dictionary",
            good.len(),
            (1u64 << self.terms.len()) - 1
        );
        let costs: HashMap<TruthTable, u32> = good.iter().map(|g| (g.precursor, g.cost)).collect();
        let mut results = vec![];
        let mut progress = Progress::default();
        let mut cancelled = false;
        for digits in Odometer::new(self.terms.len(), good.len()) {
            let rows: Vec<u32> = digits.iter().map(|d| good[*d].combination).collect();
            if let Some(result) = self.evaluate(rows, &costs) {
                event!(
                    Level::TRACE,
                    "Accepted {:?} at cost {}",
                    result.combinations,
                    result.cost
                );
                results.push(result);
                progress.accepted += 1;
            }
            progress.tested += 1;
            if monitor.on_progress(progress).is_break() {
                event!(Level::INFO, "Transform search cancelled at {}", progress);
                cancelled = true;
                break;
            }
            if results.len() >= self.hard_limit {
                event!(Level::DEBUG, "Hard limit of {} reached", self.hard_limit);
                break;
            }
        }
        results.sort_by_key(|r| r.cost);
        event!(Level::INFO, "Transform search finished at {}", progress);
        TransformReport {
            results,
            progress,
            good_terms: good.len(),
            cancelled,
        }
    }

    /// Builds the result for one row assignment, or `None` if it is singular.
    fn evaluate(&self, rows: Vec<u32>, costs: &HashMap<TruthTable, u32>) -> Option<TransformResult> {
        if !is_invertible(&rows) {
            return None;
        }
        let transitioned = transition(&rows, &self.terms);
        let routing = transpose(&inverse_matrix(&rows));
        let mut merged: Vec<(TruthTable, u32)> = Vec::with_capacity(rows.len());
        for (term, route) in transitioned.into_iter().zip(routing) {
            match merged.iter_mut().find(|(t, _)| *t == term) {
                Some((_, r)) => *r ^= route,
                None => merged.push((term, route)),
            }
        }
        let term_costs: Vec<u32> = merged
            .iter()
            .map(|(t, _)| costs.get(t).copied().unwrap_or_default())
            .collect();
        Some(TransformResult {
            cost: term_costs.iter().sum(),
            rows: merged.iter().map(|(_, r)| *r).collect(),
            transformed_terms: merged.iter().map(|(t, _)| *t).collect(),
            term_costs,
            combinations: rows,
            mask: self.mask,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::ops::ControlFlow;

    use crate::catalog::{Catalog, CostDictionary};
    use crate::table::{subset_xor, InputCount};
    use crate::transform::builder::TransformParamsBuilder;
    use crate::transform::{Progress, TransformReport, Unmonitored};

    fn run(n: u8, terms: Vec<u32>, mask: u32, hard_limit: usize) -> TransformReport {
        let n = InputCount::new(n).unwrap();
        let dict = CostDictionary::enumerate(&Catalog::products(n), n.get() as usize + 1);
        TransformParamsBuilder::default()
            .input_count(n)
            .terms(terms)
            .mask(mask)
            .hard_limit(hard_limit)
            .dictionary(dict)
            .build()
            .unwrap()
            .build()
            .unwrap()
            .run(&mut Unmonitored)
    }

    fn closure_is_full(rows: &[u32]) -> bool {
        let mut seen = HashSet::new();
        (1..(1u32 << rows.len())).all(|i| {
            let x = subset_xor(rows, i);
            x != 0 && seen.insert(x)
        })
    }

    #[test]
    fn test_single_result() {
        let n = InputCount::new(2).unwrap();
        let dict = CostDictionary::new(n, vec![(0b1100, 1), (0b1010, 1), (0b0110, 2)]);
        let report = TransformParamsBuilder::default()
            .input_count(n)
            .terms(vec![0b1100, 0b0110])
            .hard_limit(1)
            .dictionary(dict)
            .build()
            .unwrap()
            .build()
            .unwrap()
            .run(&mut Unmonitored);
        assert_eq!(report.results.len(), 1);
        let r = &report.results[0];
        assert_eq!(r.rows.len(), 2);
        assert_eq!(r.cost, r.term_costs.iter().sum::<u32>());
        // cheapest pair of good terms: x (1) and y = x ^ (x ⊕ y) (1)
        assert_eq!(r.cost, 2);
        assert_eq!(r.transformed_terms, vec![0b1100, 0b1010]);
        // output 0 is x; output 1 is x ^ y
        assert_eq!(r.rows, vec![0b11, 0b10]);
    }

    #[test]
    fn test_rows_recover_outputs() {
        let terms = vec![0b1000_1000, 0b0110_0110, 0b1111_0000];
        let report = run(3, terms.clone(), 0, 50);
        assert!(!report.results.is_empty());
        for r in &report.results {
            assert!(closure_is_full(&r.rows));
            for (j, term) in terms.iter().enumerate() {
                let feeding: u32 = r
                    .rows
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| *row & (1 << j) != 0)
                    .fold(0, |acc, (i, _)| acc | (1 << i));
                assert_eq!(subset_xor(&r.transformed_terms, feeding), *term);
            }
        }
    }

    #[test]
    fn test_sorted_and_capped() {
        let report = run(3, vec![0b1000_1000, 0b0110_0110, 0b1111_0000], 0, 3);
        assert!(report.results.len() <= 3);
        assert!(report.results.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert_eq!(report.progress.accepted, report.results.len());
        assert!(report.progress.tested >= report.progress.accepted);
    }

    #[test]
    fn test_progress_every_assignment() {
        let n = InputCount::new(3).unwrap();
        let dict = CostDictionary::enumerate(&Catalog::products(n), 4);
        let search = TransformParamsBuilder::default()
            .input_count(n)
            .terms(vec![0b1000_1000, 0b0110_0110])
            .hard_limit(1000)
            .dictionary(dict)
            .build()
            .unwrap()
            .build()
            .unwrap();
        let mut seen: Vec<Progress> = vec![];
        let report = search.run(&mut |p: Progress| {
            seen.push(p);
            ControlFlow::Continue(())
        });
        assert_eq!(seen.len(), report.progress.tested);
        assert!(seen.windows(2).all(|w| w[1].tested == w[0].tested + 1));
        assert_eq!(seen.last().copied(), Some(report.progress));
    }

    #[test]
    fn test_cancel() {
        let n = InputCount::new(3).unwrap();
        let dict = CostDictionary::enumerate(&Catalog::products(n), 4);
        let search = TransformParamsBuilder::default()
            .input_count(n)
            .terms(vec![0b1000_1000, 0b0110_0110, 0b1111_0000])
            .hard_limit(1000)
            .dictionary(dict)
            .build()
            .unwrap()
            .build()
            .unwrap();
        let report = search.run(&mut |p: Progress| {
            if p.tested == 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(report.cancelled);
        assert_eq!(report.progress.tested, 1);
    }

    #[test]
    fn test_dependent_outputs_have_no_transform() {
        // the second output repeats the first, so no invertible row set exists
        let report = run(2, vec![0b1100, 0b1100], 0, 5);
        assert!(report.results.is_empty());
    }

    #[test]
    fn test_validation() {
        let n = InputCount::new(2).unwrap();
        let dict = CostDictionary::new(n, vec![(0b1100, 1)]);
        let mut b = TransformParamsBuilder::default();
        b.input_count(n).dictionary(dict).terms(vec![]);
        assert!(b.build().unwrap().build().is_err());
        b.terms(vec![0b1_0000]);
        assert!(b.build().unwrap().build().is_err());
        b.terms(vec![0b0110]).hard_limit(0);
        assert!(b.build().unwrap().build().is_err());
    }
}
