use serde::{Deserialize, Serialize};

use crate::table::{negate, InputCount, TruthTable};

/// A commutative combination rule folded over a chain of primitives one
/// member at a time. Accumulators are plain values: a child's accumulator is
/// derived from its parent's and is never written again.
pub trait Gate {
    type Acc: Copy;

    fn symbol(&self) -> &'static str;
    fn seed(&self, term: TruthTable) -> Self::Acc;
    fn extend(&self, acc: &Self::Acc, term: TruthTable) -> Self::Acc;
    fn result(&self, acc: &Self::Acc) -> TruthTable;
    /// Whether some extension of this chain could still produce `target` or
    /// its complement outside `mask`.
    fn viable(&self, acc: &Self::Acc, target: TruthTable, mask: TruthTable, n: InputCount)
        -> bool;
}

/// Exclusive-or in the one-hot sense: a bit survives only while exactly one
/// member has it set. Once a bit is seen twice it is in `conflict` for good.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XorAcc {
    pub encountered: TruthTable,
    pub conflict: TruthTable,
}

impl Gate for Xor {
    type Acc = XorAcc;

    fn symbol(&self) -> &'static str {
        "⊕"
    }

    fn seed(&self, term: TruthTable) -> XorAcc {
        XorAcc {
            encountered: term,
            conflict: 0,
        }
    }

    fn extend(&self, acc: &XorAcc, term: TruthTable) -> XorAcc {
        XorAcc {
            encountered: acc.encountered | term,
            conflict: acc.conflict | (acc.encountered & term),
        }
    }

    fn result(&self, acc: &XorAcc) -> TruthTable {
        acc.encountered & !acc.conflict
    }

    fn viable(&self, acc: &XorAcc, target: TruthTable, mask: TruthTable, n: InputCount) -> bool {
        // conflict bits read 0 forever, so they must be 0 in the target (or 1 for the complement)
        let stuck = acc.conflict & !mask;
        stuck & target == 0 || stuck & negate(target, n) == 0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct And;

impl Gate for And {
    type Acc = TruthTable;

    fn symbol(&self) -> &'static str {
        "∧"
    }

    fn seed(&self, term: TruthTable) -> TruthTable {
        term
    }

    fn extend(&self, acc: &TruthTable, term: TruthTable) -> TruthTable {
        acc & term
    }

    fn result(&self, acc: &TruthTable) -> TruthTable {
        *acc
    }

    fn viable(&self, acc: &TruthTable, target: TruthTable, mask: TruthTable, n: InputCount) -> bool {
        // the intersection only shrinks: every required bit must still be present
        let lost = !acc & !mask;
        lost & target == 0 || lost & negate(target, n) == 0
    }
}

/// The fixed gate set. Every search step tries each of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateKind {
    Xor,
    And,
}

impl GateKind {
    pub const ALL: [GateKind; 2] = [GateKind::Xor, GateKind::And];

    pub fn symbol(&self) -> &'static str {
        match self {
            GateKind::Xor => Xor.symbol(),
            GateKind::And => And.symbol(),
        }
    }
}

/// Per-node state for every gate in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateState {
    pub xor: XorAcc,
    pub and: TruthTable,
}

impl GateState {
    pub fn seed(term: TruthTable) -> Self {
        Self {
            xor: Xor.seed(term),
            and: And.seed(term),
        }
    }

    pub fn extend(&self, term: TruthTable) -> Self {
        Self {
            xor: Xor.extend(&self.xor, term),
            and: And.extend(&self.and, term),
        }
    }

    pub fn result(&self, gate: GateKind) -> TruthTable {
        match gate {
            GateKind::Xor => Xor.result(&self.xor),
            GateKind::And => And.result(&self.and),
        }
    }

    pub fn viable(&self, target: TruthTable, mask: TruthTable, n: InputCount) -> bool {
        Xor.viable(&self.xor, target, mask, n) || And.viable(&self.and, target, mask, n)
    }
}
