use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

use crate::catalog::{Catalog, CostDictionary};
use crate::error::SynthError;
use crate::error::SynthError::ZeroDepth;
use crate::gate::GateKind;
use crate::search::builder::SearchParams;
use crate::search::chain::{breadth_first, ChainArena, ChainId, ChainNode, ChainVisitor};
use crate::search::split::{cheapest_pair, HalfSolution, SplitSolution};
use crate::table::{masked_eq, negate, InputCount, TruthTable};

pub mod builder;
pub mod chain;
pub mod split;

/// A chain that reproduces the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Printable expression, e.g. `⊕(a, b)` or `¬∧(a, bc)`.
    pub label: String,
    pub payloads: Vec<String>,
    pub indices: Vec<usize>,
    /// `None` for a lone primitive.
    pub gate: Option<GateKind>,
    pub negated: bool,
}

impl Solution {
    pub fn depth(&self) -> usize {
        self.indices.len()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// Every matching chain up to the depth limit, shallowest first.
    Direct(Vec<Solution>),
    /// The target was split into two cheaper dictionary values whose XOR
    /// reproduces it; each was searched on its own.
    Split(SplitSolution),
    /// Neither a direct expression nor a complementary pair exists.
    Unresolvable,
}

pub struct ExpressionSearch {
    input_count: InputCount,
    max_depth: usize,
    target: TruthTable,
    mask: TruthTable,
    catalog: Arc<Catalog>,
    dictionary: Arc<CostDictionary>,
}

impl ExpressionSearch {
    pub fn new(params: &SearchParams) -> Result<Self, SynthError> {
        let input_count = params.input_count;
        params.catalog.expect_inputs(input_count)?;
        if params.dictionary.input_count != input_count {
            return Err(SynthError::CatalogMismatch {
                catalog: params.dictionary.input_count.get(),
                request: input_count.get(),
            });
        }
        let max_depth = params.max_depth();
        if max_depth == 0 {
            return Err(ZeroDepth);
        }
        Ok(Self {
            input_count,
            max_depth,
            target: input_count.check(params.target)?,
            mask: input_count.check(params.mask)?,
            catalog: params.catalog.clone(),
            dictionary: params.dictionary.clone(),
        })
    }

    #[instrument(skip(self), fields(target = self.target, mask = self.mask))]
    pub fn run(&self) -> SearchOutcome {
        let target = self.target | self.mask;
        let dictionary = self.dictionary.masked(self.mask);
        if dictionary.contains_key(&target) {
            if let Some(solutions) = self.solve(target) {
                event!(Level::INFO, "Found {} expressions", solutions.len());
                return SearchOutcome::Direct(solutions);
            }
            event!(
                Level::WARN,
                "No expression within depth {}, trying a split",
                self.max_depth
            );
        }
        // a half equal to the target would only repeat the failed search
        let mut partners = dictionary.clone();
        partners.remove(&target);
        match cheapest_pair(&partners, target, self.mask) {
            Some(pair) => {
                event!(
                    Level::INFO,
                    "Splitting into {:#b} ^ {:#b} (cost {})",
                    pair.first,
                    pair.second,
                    pair.cost
                );
                let half = |value: TruthTable| HalfSolution {
                    target: value,
                    cost: dictionary.get(&value).copied().unwrap_or_default(),
                    solutions: self.solve(value),
                };
                SearchOutcome::Split(SplitSolution {
                    first: half(pair.first),
                    second: half(pair.second),
                })
            }
            None => {
                event!(Level::ERROR, "No complementary pair for {:#b}", target);
                SearchOutcome::Unresolvable
            }
        }
    }

    /// Breadth-first search for `target`. `None` when nothing matches.
    pub fn solve(&self, target: TruthTable) -> Option<Vec<Solution>> {
        let tables: Vec<TruthTable> = self.catalog.tables().map(|t| t | self.mask).collect();
        let mut matcher = Matcher {
            catalog: &self.catalog,
            tables: &tables,
            input_count: self.input_count,
            target: target | self.mask,
            mask: self.mask,
            solutions: vec![],
        };
        let visited = breadth_first(&tables, self.max_depth, &mut matcher);
        event!(
            Level::DEBUG,
            "Visited {} chains for {:#b}, {} matches",
            visited,
            target,
            matcher.solutions.len()
        );
        Some(matcher.solutions).filter(|s| !s.is_empty())
    }
}

struct Matcher<'a> {
    catalog: &'a Catalog,
    /// Catalog tables with the mask already applied.
    tables: &'a [TruthTable],
    input_count: InputCount,
    target: TruthTable,
    mask: TruthTable,
    solutions: Vec<Solution>,
}

impl Matcher<'_> {
    fn solution(&self, indices: Vec<usize>, gate: Option<GateKind>, negated: bool) -> Solution {
        let labels: Vec<&str> = indices
            .iter()
            .map(|i| self.catalog.get(*i).label.as_str())
            .collect();
        let label = match gate {
            None => labels.join(", "),
            Some(g) => format!(
                "{}{}({})",
                if negated { "¬" } else { "" },
                g.symbol(),
                labels.join(", ")
            ),
        };
        Solution {
            label,
            payloads: indices
                .iter()
                .map(|i| self.catalog.get(*i).payload.clone())
                .collect(),
            indices,
            gate,
            negated,
        }
    }
}

impl ChainVisitor for Matcher<'_> {
    fn visit(&mut self, arena: &ChainArena, id: ChainId) {
        let node = arena.node(id);
        if node.depth == 1 {
            if self.tables[node.index] == self.target {
                let s = self.solution(vec![node.index], None, false);
                self.solutions.push(s);
            }
            return;
        }
        for gate in GateKind::ALL {
            let value = node.state.result(gate);
            let negated = if masked_eq(value, self.target, self.mask) {
                false
            } else if masked_eq(negate(value, self.input_count), self.target, self.mask) {
                true
            } else {
                continue;
            };
            let s = self.solution(arena.indices(id), Some(gate), negated);
            self.solutions.push(s);
        }
    }

    fn expand(&self, node: &ChainNode) -> bool {
        node.state.viable(self.target, self.mask, self.input_count)
    }
}
