use crate::table::{is_power_of_two, subset_xor, TruthTable};

/// Whether `rows` (one combination index per output) are linearly
/// independent over GF(2): every row is non-zero and distinct, and no XOR of
/// two or more rows lands back on a row.
pub fn is_invertible(rows: &[u32]) -> bool {
    if rows.iter().any(|r| *r == 0) {
        return false;
    }
    for (i, r) in rows.iter().enumerate() {
        if rows[i + 1..].contains(r) {
            return false;
        }
    }
    let pad = 1u32 << rows.len();
    for index in 3..pad {
        if is_power_of_two(index) {
            continue;
        }
        if rows.contains(&subset_xor(rows, index)) {
            return false;
        }
    }
    true
}

/// Output `i` of the result is the XOR of the `terms` selected by `rows[i]`.
pub fn transition(rows: &[u32], terms: &[TruthTable]) -> Vec<TruthTable> {
    rows.iter().map(|r| subset_xor(terms, *r)).collect()
}

/// For each coordinate `k`, the combination of `rows` whose XOR is exactly
/// `1 << k`. Only meaningful for invertible `rows`.
pub fn inverse_matrix(rows: &[u32]) -> Vec<u32> {
    let n = rows.len();
    let mut inverse = vec![0; n];
    let mut found = 0;
    for index in 1..(1u32 << n) {
        let x = subset_xor(rows, index);
        if is_power_of_two(x) {
            inverse[x.trailing_zeros() as usize] = index;
            found += 1;
            if found == n {
                break;
            }
        }
    }
    inverse
}
