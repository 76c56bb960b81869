use std::hash::Hash;

use fxhash::FxHashSet;

/// Removes repeated values, keeping the first occurrence of each.
///
/// Equality is exact value equality; surviving elements keep their original
/// relative order.
pub fn dedup<T: Eq + Hash>(items: Vec<T>) -> Vec<T> {
    dedup_by_key(items, |item| item)
}

/// Like [`dedup`], comparing elements by a borrowed key.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash + ?Sized,
    F: Fn(&T) -> &K,
{
    let keep: Vec<bool> = {
        let mut seen: FxHashSet<&K> = FxHashSet::default();
        seen.reserve(items.len());
        items.iter().map(|item| seen.insert(key(item))).collect()
    };

    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence_order() {
        let out = dedup(vec!["b", "a", "b", "c", "a"]);
        assert_eq!(out, vec!["b", "a", "c"]);
    }

    #[test]
    fn output_has_no_repeats_and_same_element_set() {
        let input = vec![3, 1, 3, 3, 2, 1, 5, 2];
        let out = dedup(input.clone());

        let unique: FxHashSet<_> = out.iter().collect();
        assert_eq!(unique.len(), out.len());

        let expected: FxHashSet<_> = input.iter().collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn empty_input() {
        let out: Vec<String> = dedup(Vec::new());
        assert!(out.is_empty());
    }

    #[test]
    fn by_key_ignores_other_fields() {
        let items = vec![("fox", 0), ("dog", 4), ("fox", 8)];
        let out = dedup_by_key(items, |(word, _)| word);
        assert_eq!(out, vec![("fox", 0), ("dog", 4)]);
    }
}
