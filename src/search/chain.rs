use std::collections::VecDeque;
use std::mem;

use tracing::{event, Level};

use crate::gate::GateState;
use crate::table::TruthTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(usize);

/// One candidate expression: the primitive at `index` appended to `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainNode {
    pub parent: Option<ChainId>,
    pub index: usize,
    pub depth: usize,
    pub state: GateState,
}

/// Append-only storage for chain nodes. A node may be the parent of many
/// later nodes, so nodes are never modified once pushed.
#[derive(Debug, Default)]
pub struct ChainArena {
    nodes: Vec<ChainNode>,
}

impl ChainArena {
    pub fn root(&mut self, index: usize, table: TruthTable) -> ChainId {
        self.push(ChainNode {
            parent: None,
            index,
            depth: 1,
            state: GateState::seed(table),
        })
    }

    pub fn extend(&mut self, parent: ChainId, index: usize, table: TruthTable) -> ChainId {
        let p = self.node(parent);
        debug_assert!(index > p.index, "chain indices must increase");
        let node = ChainNode {
            parent: Some(parent),
            index,
            depth: p.depth + 1,
            state: p.state.extend(table),
        };
        self.push(node)
    }

    fn push(&mut self, node: ChainNode) -> ChainId {
        self.nodes.push(node);
        ChainId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: ChainId) -> &ChainNode {
        &self.nodes[id.0]
    }

    /// Primitive indices of the chain, first member first.
    pub fn indices(&self, id: ChainId) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.node(id).depth);
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.node(c);
            out.push(node.index);
            cur = node.parent;
        }
        out.reverse();
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Receives every chain of a breadth-first enumeration.
pub trait ChainVisitor {
    fn visit(&mut self, arena: &ChainArena, id: ChainId);

    /// Return `false` to drop every extension of this chain.
    fn expand(&self, _node: &ChainNode) -> bool {
        true
    }
}

/// Enumerates every strictly-increasing index subset of `tables` with at
/// most `max_depth` members. All chains of one depth are visited before any
/// chain of the next. Returns the number of chains visited.
pub fn breadth_first<V: ChainVisitor>(
    tables: &[TruthTable],
    max_depth: usize,
    visitor: &mut V,
) -> usize {
    let mut arena = ChainArena::default();
    let mut current: VecDeque<ChainId> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| arena.root(i, *t))
        .collect();
    let mut next = VecDeque::new();
    let mut visited = 0;
    let mut depth = 1;
    while !current.is_empty() {
        let level_size = current.len();
        while let Some(id) = current.pop_front() {
            visitor.visit(&arena, id);
            visited += 1;
            let node = *arena.node(id);
            if node.depth < max_depth && visitor.expand(&node) {
                for (j, table) in tables.iter().enumerate().skip(node.index + 1) {
                    next.push_back(arena.extend(id, j, *table));
                }
            }
        }
        event!(
            Level::TRACE,
            "Depth {} visited {} chains, {} queued",
            depth,
            level_size,
            next.len()
        );
        mem::swap(&mut current, &mut next);
        depth += 1;
    }
    visited
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::gate::GateKind;
    use crate::search::chain::{breadth_first, ChainArena, ChainId, ChainVisitor};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(usize, Vec<usize>)>,
    }

    impl ChainVisitor for Recorder {
        fn visit(&mut self, arena: &ChainArena, id: ChainId) {
            self.seen.push((arena.node(id).depth, arena.indices(id)));
        }
    }

    #[test]
    fn test_enumerates_combinations() {
        let mut r = Recorder::default();
        let visited = breadth_first(&[1, 2, 4, 8], 4, &mut r);
        // every non-empty subset exactly once
        assert_eq!(visited, 15);
        let unique: HashSet<Vec<usize>> = r.seen.iter().map(|(_, i)| i.clone()).collect();
        assert_eq!(unique.len(), 15);
        assert!(r
            .seen
            .iter()
            .all(|(_, i)| i.windows(2).all(|w| w[0] < w[1])));
    }

    #[test]
    fn test_depth_order() {
        let mut r = Recorder::default();
        breadth_first(&[1, 2, 4, 8], 3, &mut r);
        assert!(r.seen.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(r.seen.iter().filter(|(d, _)| *d == 2).count(), 6);
        assert!(r.seen.iter().all(|(d, _)| *d <= 3));
        assert_eq!(r.seen[4], (2, vec![0, 1]));
    }

    #[test]
    fn test_accumulator_follows_parent() {
        let mut arena = ChainArena::default();
        let a = arena.root(0, 0b1100);
        let ab = arena.extend(a, 1, 0b1010);
        let ac = arena.extend(a, 2, 0b0110);
        // siblings share a parent without disturbing each other
        assert_eq!(arena.node(ab).state.result(GateKind::Xor), 0b0110);
        assert_eq!(arena.node(ac).state.result(GateKind::Xor), 0b1010);
        assert_eq!(arena.node(a).state.result(GateKind::And), 0b1100);
        assert_eq!(arena.indices(ac), vec![0, 2]);
    }

    struct NoExpand;

    impl ChainVisitor for NoExpand {
        fn visit(&mut self, _arena: &ChainArena, _id: ChainId) {}
        fn expand(&self, _node: &crate::search::chain::ChainNode) -> bool {
            false
        }
    }

    #[test]
    fn test_expand_prunes() {
        assert_eq!(breadth_first(&[1, 2, 4], 3, &mut NoExpand), 3);
    }
}
