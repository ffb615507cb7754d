use std::fmt::{Display, Formatter};

use colored::Colorize;

use crate::table::InputCount;
use crate::transform::TransformResult;

/// Renders a transform as one line per transformed term: which outputs it
/// feeds, its truth table (don't cares dimmed) and its cost.
pub struct TransformResultDisplay<'a> {
    pub result: &'a TransformResult,
    pub input_count: InputCount,
}

impl Display for TransformResultDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let outputs = self.result.combinations.len();
        let width = self.input_count.width();
        writeln!(f, "{} {}", "cost".bold(), self.result.cost)?;
        let terms = self
            .result
            .transformed_terms
            .iter()
            .zip(&self.result.rows)
            .zip(&self.result.term_costs);
        for ((term, route), cost) in terms {
            write!(f, "  [")?;
            for j in 0..outputs {
                let token = if route & (1 << j) != 0 {
                    "1".green()
                } else {
                    "0".normal()
                };
                write!(f, "{token}")?;
            }
            write!(f, "] ")?;
            for i in (0..width).rev() {
                let bit = if term & (1 << i) != 0 { "1" } else { "0" };
                if self.result.mask & (1 << i) != 0 {
                    write!(f, "{}", bit.dimmed())?;
                } else {
                    write!(f, "{bit}")?;
                }
            }
            writeln!(f, " {}", format!("({cost})").yellow())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::table::InputCount;
    use crate::transform::display::TransformResultDisplay;
    use crate::transform::TransformResult;

    #[test]
    fn test_plain_rendering() {
        colored::control::set_override(false);
        let result = TransformResult {
            cost: 2,
            rows: vec![0b11, 0b10],
            transformed_terms: vec![0b1100, 0b1010],
            term_costs: vec![1, 1],
            combinations: vec![0b01, 0b11],
            mask: 0,
        };
        let shown = TransformResultDisplay {
            result: &result,
            input_count: InputCount::new(2).unwrap(),
        }
        .to_string();
        assert_eq!(shown, "cost 2\n  [11] 1100 (1)\n  [01] 1010 (1)\n");
    }
}
