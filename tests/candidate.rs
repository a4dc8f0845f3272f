#![cfg(test)]

use cardano_seed_recover::candidate::iterate;

/// # Reference
///   SPEC_FULL.md §8, T7.
#[test]
fn t7_iterate_canonical_vector() {
    let groups = vec![vec!["fst1", "fst2"], vec!["scd1"], vec!["thd1"]];
    let result: Vec<Vec<&str>> = iterate(groups, false, vec!["all1", "all2"], 4, vec![0, 3]).collect();
    assert_eq!(
        result,
        vec![
            vec!["all1", "fst1", "scd1", "thd1"],
            vec!["all2", "fst1", "scd1", "thd1"],
            vec!["fst1", "scd1", "thd1", "all1"],
            vec!["fst1", "scd1", "thd1", "all2"],
            vec!["all1", "fst2", "scd1", "thd1"],
            vec!["all2", "fst2", "scd1", "thd1"],
            vec!["fst2", "scd1", "thd1", "all1"],
            vec!["fst2", "scd1", "thd1", "all2"],
        ]
    );
}

#[test]
fn iterate_is_deterministic_across_runs() {
    let build = || {
        let groups = vec![vec!["a", "b"], vec!["c", "d"]];
        iterate(groups, true, vec!["x"], 3, vec![1]).collect::<Vec<_>>()
    };
    assert_eq!(build(), build());
}

#[test]
fn iterate_with_reorder_includes_the_unreordered_sequence() {
    let groups = vec![vec!["a"], vec!["b"], vec!["c"]];
    let result: Vec<Vec<&str>> = iterate(groups, true, vec![], 3, vec![]).collect();
    assert!(result.contains(&vec!["a", "b", "c"]));
}

#[test]
fn iterate_does_not_materialize_a_huge_candidate_space() {
    // 12 positions with 12 alternatives each: a full cartesian product
    // would be 12^12, far too large to enumerate. Taking a handful of
    // outputs must stay cheap.
    let groups: Vec<Vec<i32>> = (0..12).map(|_| (0..12).collect()).collect();
    let first5: Vec<Vec<i32>> = iterate(groups, false, vec![], 12, vec![]).take(5).collect();
    assert_eq!(first5.len(), 5);
}
