//! Reusable scratch grid for edit-distance dynamic programming

use std::fmt::Write as _;

/// Square `(max_len + 1)²` grid, row-major.
///
/// Row 0 and column 0 hold `0..=max_len` from allocation onwards; only
/// interior cells are rewritten by [`bounded_distance`](super::bounded_distance).
#[derive(Debug, Clone)]
pub struct EditMatrix {
    cells: Vec<u32>,
    dim: usize,
}

impl EditMatrix {
    /// Allocate a grid for words of up to `max_len` characters
    pub fn new(max_len: usize) -> Self {
        let dim = max_len + 1;
        let mut cells = vec![0; dim * dim];
        for i in 1..dim {
            cells[i * dim] = i as u32;
            cells[i] = i as u32;
        }
        Self { cells, dim }
    }

    /// Longest word this grid can score
    pub fn max_len(&self) -> usize {
        self.dim - 1
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.dim + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: u32) {
        self.cells[i * self.dim + j] = value;
    }

    /// Tab-separated dump of the `rows × cols` corner, labelled with the words
    pub fn render(&self, x: &[char], y: &[char]) -> String {
        let mut out = String::from("*");
        for c in x {
            let _ = write!(out, "\t{}", c);
        }
        out.push('\n');
        for j in 0..=y.len() {
            out.push(if j == 0 { '*' } else { y[j - 1] });
            for i in 0..=x.len() {
                let _ = write!(out, "\t{}", self.get(i, j));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_seeded() {
        let m = EditMatrix::new(4);
        assert_eq!(m.max_len(), 4);
        for i in 0..=4 {
            assert_eq!(m.get(i, 0), i as u32);
            assert_eq!(m.get(0, i), i as u32);
        }
        assert_eq!(m.get(2, 3), 0);
    }

    #[test]
    fn test_render_shape() {
        let m = EditMatrix::new(3);
        let dump = m.render(&['A', 'B'], &['C']);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "*\tA\tB");
        assert_eq!(lines[1], "*\t0\t1\t2");
    }
}
