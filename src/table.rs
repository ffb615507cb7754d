use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::error::SynthError::{TableTooWide, UnsupportedInputCount};

/// One bit per input assignment; only the low `2^n` bits are meaningful.
pub type TruthTable = u32;

/// Number of inputs of the boolean functions being synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct InputCount(u8);

impl InputCount {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 4;

    pub fn new(count: u8) -> Result<Self, SynthError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(UnsupportedInputCount(count))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Number of bits in a truth table over this many inputs.
    pub fn width(&self) -> u32 {
        1 << self.0
    }

    pub fn full_mask(&self) -> TruthTable {
        ((1u64 << self.width()) - 1) as TruthTable
    }

    /// Rejects tables with bits set above the logical width.
    pub fn check(&self, table: TruthTable) -> Result<TruthTable, SynthError> {
        if table & !self.full_mask() != 0 {
            Err(TableTooWide {
                table,
                width: self.width(),
            })
        } else {
            Ok(table)
        }
    }

    pub fn all() -> impl Iterator<Item = InputCount> {
        (Self::MIN..=Self::MAX).map(InputCount)
    }
}

impl TryFrom<u8> for InputCount {
    type Error = SynthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        InputCount::new(value)
    }
}

impl From<InputCount> for u8 {
    fn from(value: InputCount) -> Self {
        value.0
    }
}

impl Display for InputCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complement restricted to the logical width of the table.
pub fn negate(table: TruthTable, inputs: InputCount) -> TruthTable {
    !table & inputs.full_mask()
}

pub fn masked_eq(a: TruthTable, b: TruthTable, mask: TruthTable) -> bool {
    (a | mask) == (b | mask)
}

pub fn is_power_of_two(x: u32) -> bool {
    x != 0 && x & (x - 1) == 0
}

/// XOR of every `rows[j]` whose bit `j` is set in `index`.
pub fn subset_xor(rows: &[u32], index: u32) -> u32 {
    rows.iter()
        .enumerate()
        .filter(|(j, _)| index & (1 << j) != 0)
        .fold(0, |acc, (_, r)| acc ^ r)
}

/// Transposes a square bit matrix stored one row per integer.
pub fn transpose(rows: &[u32]) -> Vec<u32> {
    (0..rows.len())
        .map(|i| {
            rows.iter()
                .enumerate()
                .fold(0, |col, (j, r)| col | (((r >> i) & 1) << j))
        })
        .collect()
}

/// Renders the low `width` bits MSB-first.
pub fn format_bits(table: TruthTable, width: u32) -> String {
    (0..width)
        .rev()
        .map(|i| if (table >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}
