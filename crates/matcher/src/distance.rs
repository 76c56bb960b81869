//! Levenshtein edit distance.
//!
//! Distances count Unicode scalar values, not bytes, so `"cafe"` and
//! `"café"` are one substitution apart.

/// Minimum number of single-character insertions, deletions or
/// substitutions turning `a` into `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `Some(distance)` when `a` and `b` are at most `max` edits apart.
///
/// The character count difference is a lower bound on the distance, so
/// pairs whose lengths differ by more than `max` skip the DP entirely.
pub fn within_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len.abs_diff(b_len) > max {
        return None;
    }

    let distance = edit_distance(a, b);
    (distance <= max).then_some(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_zero() {
        for s in ["", "a", "kitten", "東京"] {
            assert_eq!(edit_distance(s, s), 0);
        }
    }

    #[test]
    fn symmetric() {
        let pairs = [("kitten", "sitting"), ("", "abc"), ("flaw", "lawn"), ("quik", "quick")];
        for (a, b) in pairs {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn textbook_values() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("quik", "quick"), 1);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(edit_distance("cafe", "café"), 1);
        assert_eq!(edit_distance("harish", "harīṣh"), 2);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(within_distance("kitten", "sitting", 3), Some(3));
        assert_eq!(within_distance("kitten", "sitting", 2), None);
        assert_eq!(within_distance("fox", "fox", 0), Some(0));
    }

    #[test]
    fn length_gap_short_circuits() {
        assert_eq!(within_distance("a", "abcdef", 1), None);
        assert_eq!(within_distance("a", "abcdef", 5), Some(5));
    }
}
