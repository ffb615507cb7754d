use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::error::SynthError::{InvalidTermCharacter, InvalidTermLength, MismatchedTerms, NoTerms};
use crate::table::{InputCount, TruthTable};

/// A truth table typed as text: `0`/`1` per position, MSB first, with any
/// lower case letter marking a don't-care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTerm {
    pub input_count: InputCount,
    /// Don't-care positions are set in both `table` and `mask`.
    pub table: TruthTable,
    pub mask: TruthTable,
}

impl FromStr for ParsedTerm {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = s.chars().find(|c| !matches!(c, '0' | '1' | 'a'..='z')) {
            return Err(InvalidTermCharacter(c));
        }
        let input_count = match s.len() {
            4 => InputCount::new(2)?,
            8 => InputCount::new(3)?,
            16 => InputCount::new(4)?,
            other => return Err(InvalidTermLength(other)),
        };
        let mut table = 0;
        let mut mask = 0;
        for c in s.chars() {
            table <<= 1;
            mask <<= 1;
            match c {
                '0' => {}
                '1' => table |= 1,
                _ => {
                    table |= 1;
                    mask |= 1;
                }
            }
        }
        Ok(ParsedTerm {
            input_count,
            table,
            mask,
        })
    }
}

/// Parses the outputs of a multi-output request. Every term must agree on
/// input count and don't-care positions.
pub fn parse_terms<S: AsRef<str>>(
    terms: &[S],
) -> Result<(InputCount, Vec<TruthTable>, TruthTable), SynthError> {
    let parsed: Vec<ParsedTerm> = terms
        .iter()
        .map(|t| t.as_ref().parse())
        .collect::<Result<_, _>>()?;
    let first = parsed.first().ok_or(NoTerms)?;
    if parsed
        .iter()
        .any(|p| p.input_count != first.input_count || p.mask != first.mask)
    {
        return Err(MismatchedTerms);
    }
    Ok((
        first.input_count,
        parsed.iter().map(|p| p.table).collect(),
        first.mask,
    ))
}
