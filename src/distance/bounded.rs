//! Bounded Levenshtein distance.
//!
//! `|len(x) - len(y)|` is a lower bound on edit distance, and so is the
//! minimum of any completed DP row, since every later cell is reached from
//! that row at non-negative cost. Either bound exceeding `max_edits` ends
//! the computation early with [`Distance::AtLeast`].

use super::EditMatrix;
use log::error;

/// Result of a bounded distance query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    /// The true edit distance
    Exact(u32),
    /// The true distance is at least this much (and exceeded the threshold
    /// of the query that produced it)
    AtLeast(u32),
}

impl Distance {
    /// Exact distance if it is no more than `max_edits`
    pub fn within(self, max_edits: u32) -> Option<u32> {
        match self {
            Distance::Exact(d) if d <= max_edits => Some(d),
            _ => None,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, Distance::Exact(_))
    }

    /// Whether this value settles a query at `max_edits` without recomputation
    pub fn answers(self, max_edits: u32) -> bool {
        match self {
            Distance::Exact(_) => true,
            Distance::AtLeast(bound) => bound > max_edits,
        }
    }

    /// The exact value or the lower bound
    pub fn value(self) -> u32 {
        match self {
            Distance::Exact(d) | Distance::AtLeast(d) => d,
        }
    }
}

/// Edit distance between `x` and `y`, giving up once it provably exceeds
/// `max_edits`.
///
/// `matrix` must be able to hold both words; its border is relied on and
/// never rewritten.
///
/// # Panics
///
/// Panics if the matrix is too small, or if an exact distance of zero is
/// computed for different words (a corrupt matrix border).
pub fn bounded_distance(x: &[char], y: &[char], matrix: &mut EditMatrix, max_edits: u32) -> Distance {
    let (xlen, ylen) = (x.len(), y.len());
    let by_len = xlen.abs_diff(ylen) as u32;
    if by_len > max_edits {
        return Distance::AtLeast(by_len);
    }
    assert!(
        xlen <= matrix.max_len() && ylen <= matrix.max_len(),
        "edit matrix sized for {} characters, got words of {} and {}",
        matrix.max_len(),
        xlen,
        ylen
    );

    if ylen > 0 {
        for i in 1..=xlen {
            let mut row_min = u32::MAX;
            for j in 1..=ylen {
                let substitute = matrix.get(i - 1, j - 1) + u32::from(x[i - 1] != y[j - 1]);
                let delete = matrix.get(i - 1, j) + 1;
                let insert = matrix.get(i, j - 1) + 1;
                let cell = substitute.min(delete).min(insert);
                matrix.set(i, j, cell);
                row_min = row_min.min(cell);
            }
            if row_min > max_edits {
                return Distance::AtLeast(row_min);
            }
        }
    }

    let dist = matrix.get(xlen, ylen);
    if dist == 0 && x != y {
        let xs: String = x.iter().collect();
        let ys: String = y.iter().collect();
        let dump = matrix.render(x, y);
        error!(
            "Calculated zero edit distance for non-identical words {} and {}\n{}",
            xs, ys, dump
        );
        panic!(
            "calculated zero edit distance for non-identical words {} and {}\n{}",
            xs, ys, dump
        );
    }
    Distance::Exact(dist)
}

/// Unbounded two-row Levenshtein distance, used as a reference
pub fn levenshtein(x: &[char], y: &[char]) -> u32 {
    let mut prev: Vec<u32> = (0..=y.len() as u32).collect();
    let mut curr = vec![0u32; y.len() + 1];
    for (i, xc) in x.iter().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, yc) in y.iter().enumerate() {
            let cost = u32::from(xc != yc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[y.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn dist(x: &str, y: &str, max_edits: u32) -> Distance {
        let mut m = EditMatrix::new(16);
        bounded_distance(&chars(x), &chars(y), &mut m, max_edits)
    }

    #[test]
    fn test_exact_within_budget() {
        assert_eq!(dist("KITTEN", "SITTING", 3), Distance::Exact(3));
        assert_eq!(dist("CAT", "BAT", 1), Distance::Exact(1));
        assert_eq!(dist("CAT", "CATS", 1), Distance::Exact(1));
        assert_eq!(dist("CATS", "CAT", 1), Distance::Exact(1));
        assert_eq!(dist("CAT", "CAT", 0), Distance::Exact(0));
    }

    #[test]
    fn test_length_rejection() {
        assert_eq!(dist("A", "ABCDEF", 1), Distance::AtLeast(5));
        assert_eq!(dist("", "ABC", 2), Distance::AtLeast(3));
    }

    #[test]
    fn test_row_bailout() {
        // Same length, nothing in common: the first row already exceeds 0.
        assert_eq!(dist("CAT", "DOG", 0), Distance::AtLeast(1));
        match dist("ABCD", "WXYZ", 2) {
            Distance::AtLeast(b) => assert!(b > 2 && b <= 4),
            other => panic!("expected a bound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_words() {
        assert_eq!(dist("", "", 0), Distance::Exact(0));
        assert_eq!(dist("AB", "", 2), Distance::Exact(2));
        assert_eq!(dist("", "AB", 2), Distance::Exact(2));
    }

    #[test]
    fn test_matrix_reuse_across_calls() {
        let mut m = EditMatrix::new(8);
        let words = ["SHORT", "SHORE", "HORSE", "S", "SHORTEST", "TROHS"];
        for x in words {
            for y in words {
                let expected = levenshtein(&chars(x), &chars(y));
                assert_eq!(
                    bounded_distance(&chars(x), &chars(y), &mut m, 8),
                    Distance::Exact(expected),
                    "{} vs {}",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "zero edit distance")]
    fn test_corrupt_border_is_fatal() {
        let mut m = EditMatrix::new(4);
        m.set(0, 1, 0);
        bounded_distance(&chars("A"), &chars("AA"), &mut m, 2);
    }

    #[test]
    #[should_panic(expected = "edit matrix sized")]
    fn test_matrix_too_small() {
        let mut m = EditMatrix::new(2);
        bounded_distance(&chars("ABC"), &chars("ABD"), &mut m, 3);
    }

    #[test]
    fn test_answers() {
        assert!(Distance::Exact(4).answers(1));
        assert!(Distance::AtLeast(3).answers(2));
        assert!(!Distance::AtLeast(3).answers(3));
        assert_eq!(Distance::Exact(2).within(2), Some(2));
        assert_eq!(Distance::Exact(3).within(2), None);
        assert_eq!(Distance::AtLeast(3).within(5), None);
    }

    proptest! {
        #[test]
        fn prop_exact_when_budget_suffices(x in "[A-D]{0,7}", y in "[A-D]{0,7}", slack in 0u32..3) {
            let (x, y) = (chars(&x), chars(&y));
            let truth = levenshtein(&x, &y);
            let mut m = EditMatrix::new(7);
            prop_assert_eq!(bounded_distance(&x, &y, &mut m, truth + slack), Distance::Exact(truth));
        }

        #[test]
        fn prop_bounds_are_sound(x in "[A-D]{0,7}", y in "[A-D]{0,7}", max_edits in 0u32..7) {
            let (x, y) = (chars(&x), chars(&y));
            let truth = levenshtein(&x, &y);
            let mut m = EditMatrix::new(7);
            match bounded_distance(&x, &y, &mut m, max_edits) {
                Distance::Exact(d) => prop_assert_eq!(d, truth),
                Distance::AtLeast(b) => {
                    prop_assert!(b > max_edits);
                    prop_assert!(b <= truth);
                }
            }
        }

        #[test]
        fn prop_zero_iff_identical(x in "[A-C]{0,5}", y in "[A-C]{0,5}") {
            let (x, y) = (chars(&x), chars(&y));
            let mut m = EditMatrix::new(5);
            prop_assert_eq!(bounded_distance(&x, &x, &mut m, 0), Distance::Exact(0));
            let d = bounded_distance(&x, &y, &mut m, 5);
            prop_assert_eq!(d == Distance::Exact(0), x == y);
        }
    }
}
