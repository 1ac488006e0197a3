//! Lexicographic k-combinations over index ranges.

/// Iterator over every `k`-combination of `0..n` in lexicographic order.
///
/// `Combinations::new(4, 2)` yields `[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]`.
/// When `k == 0` or `k > n` the iterator is empty.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let current = if k == 0 || k > n {
            None
        } else {
            Some((0..k).collect())
        };
        Self { n, k, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let combination = self.current.take()?;

        // Advance: find the rightmost index that can still move right.
        let mut next = combination.clone();
        let mut i = self.k;
        while i > 0 {
            i -= 1;
            if next[i] < self.n - self.k + i {
                next[i] += 1;
                for j in (i + 1)..self.k {
                    next[j] = next[j - 1] + 1;
                }
                self.current = Some(next);
                break;
            }
        }

        Some(combination)
    }
}

/// Binomial coefficient C(n, k).
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
}
