/// Walks index sequences `d[0] < d[1] < ... < d[n-1]` over `0..dim` in
/// lexicographic order, one digit pointer at a time.
///
/// When a digit overflows the pointer retreats and the previous digit is
/// bumped; otherwise the next digit is seeded from the current one and
/// bumped past it, so no sequence is a permutation of another.
#[derive(Debug, Clone)]
pub struct Odometer {
    digits: Vec<usize>,
    dim: usize,
    idx: Option<usize>,
}

impl Odometer {
    pub fn new(len: usize, dim: usize) -> Self {
        Self {
            digits: vec![0; len],
            dim,
            idx: if len == 0 { None } else { Some(0) },
        }
    }

    fn bump(&mut self) {
        if let Some(i) = self.idx {
            self.digits[i] += 1;
        }
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let idx = self.idx?;
            if self.digits[idx] >= self.dim {
                self.idx = idx.checked_sub(1);
                self.bump();
            } else if idx == self.digits.len() - 1 {
                let out = self.digits.clone();
                self.bump();
                return Some(out);
            } else {
                self.digits[idx + 1] = self.digits[idx];
                self.idx = Some(idx + 1);
                self.bump();
            }
        }
    }
}
