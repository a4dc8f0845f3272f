//! Lazy candidate-phrase generators: `combine`, `permute`, `reorder`,
//! `extend`, and their composition in `iterate`.
//!
//! Every producer here is a pull-based iterator built from `flat_map`/`map`
//! chains rather than an eagerly materialized list, so evaluating the first
//! K outputs of a composed pipeline never allocates the full cartesian
//! product; live memory is bounded by the recursion depth times the
//! candidate length.

/// Cartesian product over a sequence of groups. Yields in lexicographic
/// order over group indices: the first group varies slowest.
pub fn combine<T>(groups: Vec<Vec<T>>) -> Box<dyn Iterator<Item = Vec<T>>>
where
    T: Clone + 'static,
{
    let mut groups = groups;
    if groups.is_empty() {
        return Box::new(std::iter::once(Vec::new()));
    }
    let first = groups.remove(0);
    let rest = groups;
    Box::new(first.into_iter().flat_map(move |elem| {
        let rest = rest.clone();
        combine(rest).map(move |mut tail| {
            tail.insert(0, elem.clone());
            tail
        })
    }))
}

/// All permutations of `seq`, in the canonical "remove element i, recurse
/// on the rest" order (so `seq` itself is the first yield).
pub fn permute<T>(seq: Vec<T>) -> Box<dyn Iterator<Item = Vec<T>>>
where
    T: Clone + 'static,
{
    if seq.is_empty() {
        return Box::new(std::iter::once(Vec::new()));
    }
    Box::new((0..seq.len()).flat_map(move |i| {
        let mut rest = seq.clone();
        let picked = rest.remove(i);
        permute(rest).map(move |mut tail| {
            tail.insert(0, picked.clone());
            tail
        })
    }))
}

/// The "plausible misreading" reorderings of `seq`: for each `jump` from 1
/// to `|seq| - 1`, read the sequence starting at every offset `s < jump`,
/// stepping by `jump`, concatenating the `s` sweeps in order. `jump == 1`
/// reproduces `seq` unchanged and is always the first yield.
pub fn reorder<T>(seq: Vec<T>) -> Box<dyn Iterator<Item = Vec<T>>>
where
    T: Clone + 'static,
{
    let len = seq.len();
    Box::new((1..len.max(1)).map(move |jump| {
        let mut out = Vec::with_capacity(len);
        for s in 0..jump {
            let mut m = s;
            while m < len {
                out.push(seq[m].clone());
                m += jump;
            }
        }
        out
    }))
}

/// Insert elements of `alphabet` into `given` at positions drawn from
/// `positions`, recursively, until the result reaches `length`.
///
/// At each step the next insertion point is chosen among the smallest
/// `positions.len() - missing + 1` candidates (so there are always enough
/// remaining slots for the words still missing), and every `alphabet`
/// element is tried at that point before recursing on the suffix with a
/// shifted, truncated position list.
pub fn extend<T>(
    given: Vec<T>,
    alphabet: Vec<T>,
    length: usize,
    positions: Vec<usize>,
) -> Box<dyn Iterator<Item = Vec<T>>>
where
    T: Clone + 'static,
{
    if length == given.len() {
        return Box::new(std::iter::once(given));
    }
    let missing = length - given.len();
    let last_first_position = positions.len() + 1 - missing;

    Box::new((0..last_first_position).flat_map(move |i| {
        let position = positions[i];
        let rest_length = length - position - 1;
        let rest_positions: Vec<usize> = positions[i + 1..]
            .iter()
            .map(|&p| p - position - 1)
            .collect();
        let prefix: Vec<T> = given[..position].to_vec();
        let suffix: Vec<T> = given[position..].to_vec();
        let alphabet = alphabet.clone();

        alphabet.clone().into_iter().flat_map(move |x| {
            let prefix = prefix.clone();
            let rest_positions = rest_positions.clone();
            extend(suffix.clone(), alphabet.clone(), rest_length, rest_positions).map(move |tail| {
                let mut out = prefix.clone();
                out.push(x.clone());
                out.extend(tail);
                out
            })
        })
    }))
}

/// Compose `combine`/`reorder`/`extend` (and optionally `permute`'s sibling
/// `reorder`) into the full candidate stream: optionally reorder the
/// position-wise groups, combine across them, then extend to the target
/// length by inserting unknown words.
pub fn iterate<T>(
    groups: Vec<Vec<T>>,
    reorder_flag: bool,
    fill_alphabet: Vec<T>,
    target_len: usize,
    open_positions: Vec<usize>,
) -> Box<dyn Iterator<Item = Vec<T>>>
where
    T: Clone + 'static,
{
    if reorder_flag {
        let alphabet = fill_alphabet;
        let positions = open_positions;
        Box::new(reorder(groups).flat_map(move |r| {
            let alphabet = alphabet.clone();
            let positions = positions.clone();
            combine(r).flat_map(move |c| extend(c, alphabet.clone(), target_len, positions.clone()))
        }))
    } else {
        let alphabet = fill_alphabet;
        let positions = open_positions;
        Box::new(
            combine(groups)
                .flat_map(move |c| extend(c, alphabet.clone(), target_len, positions.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_order() {
        let groups = vec![vec![1, 2, 3], vec![1], vec![1, 2]];
        let result: Vec<Vec<i32>> = combine(groups).collect();
        assert_eq!(
            result,
            vec![
                vec![1, 1, 1],
                vec![1, 1, 2],
                vec![2, 1, 1],
                vec![2, 1, 2],
                vec![3, 1, 1],
                vec![3, 1, 2],
            ]
        );
    }

    #[test]
    fn test_permute_order() {
        let result: Vec<Vec<i32>> = permute(vec![1, 2, 3]).collect();
        assert_eq!(
            result,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn test_reorder_identity_first() {
        let result: Vec<Vec<i32>> = reorder(vec![1, 2, 3, 4]).collect();
        assert_eq!(result[0], vec![1, 2, 3, 4]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_reorder_jump_two() {
        let result: Vec<Vec<i32>> = reorder(vec![1, 2, 3, 4, 5]).collect();
        // jump=2: s=0 -> 1,3,5; s=1 -> 2,4
        assert_eq!(result[1], vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_extend_canonical_vector() {
        let result: Vec<Vec<i32>> = extend(vec![1, 2, 3, 4, 5], vec![8, 9], 7, vec![0, 3, 6]).collect();
        assert_eq!(
            result,
            vec![
                vec![8, 1, 2, 8, 3, 4, 5],
                vec![8, 1, 2, 9, 3, 4, 5],
                vec![8, 1, 2, 3, 4, 5, 8],
                vec![8, 1, 2, 3, 4, 5, 9],
                vec![9, 1, 2, 8, 3, 4, 5],
                vec![9, 1, 2, 9, 3, 4, 5],
                vec![9, 1, 2, 3, 4, 5, 8],
                vec![9, 1, 2, 3, 4, 5, 9],
                vec![1, 2, 3, 8, 4, 5, 8],
                vec![1, 2, 3, 8, 4, 5, 9],
                vec![1, 2, 3, 9, 4, 5, 8],
                vec![1, 2, 3, 9, 4, 5, 9],
            ]
        );
    }

    #[test]
    fn test_extend_identity_when_already_target_length() {
        let result: Vec<Vec<i32>> = extend(vec![1, 2, 3], vec![9], 3, vec![0, 1, 2]).collect();
        assert_eq!(result, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_t7_iterate_vector() {
        let groups = vec![vec!["fst1", "fst2"], vec!["scd1"], vec!["thd1"]];
        let result: Vec<Vec<&str>> =
            iterate(groups, false, vec!["all1", "all2"], 4, vec![0, 3]).collect();
        assert_eq!(result.len(), 8);
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
    fn test_laziness_does_not_diverge_on_large_space() {
        // 10 groups of 10 alternatives each: full cartesian product is 10^10.
        // Taking the first 3 must not attempt to materialize it.
        let groups: Vec<Vec<i32>> = (0..10).map(|_| (0..10).collect()).collect();
        let first3: Vec<Vec<i32>> = combine(groups).take(3).collect();
        assert_eq!(first3.len(), 3);
    }
}
