// Directed commenter overlap between communities.
//
// For a source community A and a target B the relatedness weight is
//
//   |A ∩ B| / |A|
//
// i.e. the share of A's commenters who also comment in B. It is asymmetric:
// a small community whose users all post in a large one scores 1.0 toward it,
// while the large one scores far lower in the other direction.
//
// Sources with no commenters have no defined weight and get no row at all.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::membership::MembershipSets;

/// Source community -> (target community -> weight).
///
/// Only pairs with source != target and a non-empty source are present.
/// A missing entry means "not scored", not zero.
pub type RelatednessMatrix = BTreeMap<String, BTreeMap<String, f64>>;

/// Number of authors present in both sets.
///
/// Walks the smaller set and looks each name up in the larger one.
pub fn intersection_size(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|author| large.contains(*author)).count()
}

/// Weight from `source` toward `target`, or `None` when `source` is empty.
pub fn directed_overlap(source: &HashSet<String>, target: &HashSet<String>) -> Option<f64> {
    if source.is_empty() {
        return None;
    }
    Some(intersection_size(source, target) as f64 / source.len() as f64)
}

/// Score every ordered pair of distinct communities.
pub fn score_pairs(sets: &MembershipSets) -> RelatednessMatrix {
    let mut matrix = RelatednessMatrix::new();

    for (source, source_members) in sets {
        if source_members.is_empty() {
            debug!(community = %source, "No commenters, skipping as a source");
            continue;
        }

        let row: BTreeMap<String, f64> = sets
            .iter()
            .filter(|(target, _)| *target != source)
            .filter_map(|(target, target_members)| {
                directed_overlap(source_members, target_members)
                    .map(|weight| (target.clone(), weight))
            })
            .collect();

        if !row.is_empty() {
            matrix.insert(source.clone(), row);
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn numbered(prefix: &str, range: std::ops::Range<usize>) -> HashSet<String> {
        range.map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_intersection_size() {
        let a = set(&["x", "y", "z"]);
        let b = set(&["y", "z", "w", "v"]);
        assert_eq!(intersection_size(&a, &b), 2);
        assert_eq!(intersection_size(&b, &a), 2);
        assert_eq!(intersection_size(&a, &set(&[])), 0);
    }

    #[test]
    fn test_weights_are_asymmetric() {
        // |A| = 10, |B| = 5, |A ∩ B| = 3
        let a = numbered("u", 0..10);
        let mut b = numbered("u", 0..3);
        b.extend(numbered("other", 0..2));

        let a_to_b = directed_overlap(&a, &b).unwrap();
        let b_to_a = directed_overlap(&b, &a).unwrap();
        assert!((a_to_b - 0.3).abs() < 1e-12, "got {a_to_b}");
        assert!((b_to_a - 0.6).abs() < 1e-12, "got {b_to_a}");
    }

    #[test]
    fn test_empty_source_has_no_weight() {
        assert_eq!(directed_overlap(&set(&[]), &set(&["x"])), None);
        assert_eq!(directed_overlap(&set(&["x"]), &set(&[])), Some(0.0));
    }

    #[test]
    fn test_score_pairs_skips_self_and_empty_sources() {
        let mut sets = MembershipSets::new();
        sets.insert("a".into(), set(&["x", "y"]));
        sets.insert("b".into(), set(&["x"]));
        sets.insert("c".into(), set(&[]));

        let matrix = score_pairs(&sets);

        assert_eq!(matrix.len(), 2, "empty source c must have no row");
        assert!(!matrix["a"].contains_key("a"));
        assert!(!matrix["b"].contains_key("b"));
        assert_eq!(matrix["a"]["b"], 0.5);
        assert_eq!(matrix["a"]["c"], 0.0);
        assert_eq!(matrix["b"]["a"], 1.0);
        assert_eq!(matrix["b"]["c"], 0.0);
    }

    #[test]
    fn test_full_cross_product_size() {
        let mut sets = MembershipSets::new();
        for name in ["a", "b", "c", "d"] {
            sets.insert(name.into(), set(&["shared", name]));
        }
        let matrix = score_pairs(&sets);
        let entries: usize = matrix.values().map(|row| row.len()).sum();
        assert_eq!(entries, 4 * 4 - 4);
    }

    #[test]
    fn test_weights_stay_in_unit_interval() {
        let mut sets = MembershipSets::new();
        sets.insert("big".into(), numbered("u", 0..100));
        sets.insert("small".into(), numbered("u", 50..60));
        sets.insert("disjoint".into(), numbered("v", 0..7));

        for row in score_pairs(&sets).values() {
            for &weight in row.values() {
                assert!((0.0..=1.0).contains(&weight), "weight out of range: {weight}");
            }
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let mut sets = MembershipSets::new();
        sets.insert("a".into(), set(&["x", "y", "z"]));
        sets.insert("b".into(), set(&["y"]));
        sets.insert("c".into(), set(&["z", "q"]));

        assert_eq!(score_pairs(&sets), score_pairs(&sets));
    }
}
