use linked_bst::{Error, Tree};

use std::collections::BTreeMap;

use crate::Op;

/// Applies a set of operations to a tree and to a map counting the copies of each item.
/// This way we can ensure that after a random smattering of adds, removes and rebuilds
/// both hold the same multiset of items.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, counts: &mut BTreeMap<T, usize>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                bst.add(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => {
                let removed = bst.remove(x);
                match counts.get_mut(x) {
                    Some(count) => {
                        if removed.as_ref() != Ok(x) {
                            return false;
                        }
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(x);
                        }
                    }
                    None => {
                        if removed != Err(Error::NotFound) {
                            return false;
                        }
                    }
                }
            }
            Op::Rebalance => {
                let before = bst.len();
                bst.rebalance();
                let expected_height = match before {
                    0 => -1,
                    n => n.ilog2() as isize,
                };
                if bst.len() != before || bst.height() != expected_height {
                    return false;
                }
            }
        }
    }

    true
}

/// Expands the counts back into the sorted sequence of items.
fn sorted<T: Clone>(counts: &BTreeMap<T, usize>) -> Vec<T> {
    counts
        .iter()
        .flat_map(|(x, count)| std::iter::repeat(x.clone()).take(*count))
        .collect()
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut counts = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut counts)
            && tree.len() == counts.values().sum::<usize>()
            && tree.inorder().cloned().eq(sorted(&counts))
            && counts.keys().all(|x| tree.find(x) == Some(x))
    }

    fn inorder_is_sorted(xs: Vec<i32>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let mut expected = xs;
        expected.sort();

        tree.len() == expected.len() && tree.inorder().eq(expected.iter())
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        nots.iter()
            .filter(|x| !xs.contains(*x))
            .all(|x| tree.find(x).is_none() && !tree.contains(x))
    }

    fn remove_everything(xs: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let all_removed = xs.iter().all(|x| tree.remove(x) == Ok(*x));

        all_removed && tree.is_empty() && tree.height() == -1 && tree.iter().next().is_none()
    }

    fn rebalance_keeps_items(xs: Vec<i16>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let before: Vec<_> = tree.inorder().copied().collect();
        tree.rebalance();
        let after: Vec<_> = tree.inorder().copied().collect();

        let expected_height = match xs.len() {
            0 => -1,
            n => n.ilog2() as isize,
        };
        before == after
            && tree.len() == xs.len()
            && tree.height() == expected_height
            && tree.is_balanced()
    }

    fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let expected: Vec<_> = tree.inorder().filter(|x| low <= **x && **x <= high).collect();

        tree.range_find(&low, &high) == expected
    }

    fn range_find_after_rebalance(xs: Vec<i8>, low: i8, high: i8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        tree.rebalance();
        let expected: Vec<_> = tree.inorder().filter(|x| low <= **x && **x <= high).collect();

        tree.range_find(&low, &high) == expected
    }

    fn successor_matches_scan(xs: Vec<i8>, probe: i8) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        tree.successor(&probe) == tree.inorder().find(|x| **x > probe)
    }

    fn predecessor_matches_scan(xs: Vec<i8>, probe: i8) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        tree.predecessor(&probe) == tree.inorder().filter(|x| **x < probe).last()
    }

    fn neighbours_after_rebalance(xs: Vec<i8>, probe: i8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        tree.rebalance();

        tree.successor(&probe) == tree.inorder().find(|x| **x > probe)
            && tree.predecessor(&probe) == tree.inorder().filter(|x| **x < probe).last()
    }

    fn preorder_visits_everything(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let root_first = tree.iter().next() == xs.first();

        let mut visited: Vec<_> = tree.iter().copied().collect();
        visited.sort();
        let mut expected = xs.clone();
        expected.sort();

        root_first && visited == expected
    }
}
