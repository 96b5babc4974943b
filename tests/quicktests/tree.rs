use avl::Tree;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a hashmap of counts.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same values in both, and that the tree
/// stayed an AVL tree throughout.
fn do_ops(ops: &[Op], tree: &mut Tree, counts: &mut HashMap<i32, usize>) {
    for op in ops {
        match *op {
            Op::Insert(x) => {
                tree.insert(x.into());
                *counts.entry(x.into()).or_default() += 1;
            }
            Op::Delete(x) => {
                let x = i32::from(x);
                let present = counts.get(&x).is_some_and(|&count| count > 0);
                if present {
                    *counts.get_mut(&x).unwrap() -= 1;
                }
                assert_eq!(tree.delete(x), present);
            }
        }
        tree.assert_invariants();
    }
}

/// The tallest an AVL tree holding `n` values may be.
fn height_bound(n: usize) -> i32 {
    (1.44 * ((n + 2) as f64).log2()).ceil() as i32 - 1
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op>) -> bool {
        let mut tree = Tree::new();
        let mut counts = HashMap::new();

        do_ops(&ops, &mut tree, &mut counts);
        let expected: usize = counts.values().sum();
        tree.len() == expected
            && counts
                .iter()
                .all(|(&value, &count)| tree.contains(value) == (count > 0))
    }
}

quickcheck::quickcheck! {
    fn sorted_round_trip(xs: Vec<i32>) -> bool {
        let tree: Tree = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort_unstable();

        tree.assert_invariants();
        tree.iter().collect::<Vec<_>>() == sorted
    }
}

quickcheck::quickcheck! {
    fn height_is_logarithmic(xs: HashSet<i32>) -> bool {
        let tree: Tree = xs.iter().copied().collect();

        xs.is_empty() || tree.height() <= height_bound(xs.len())
    }
}

quickcheck::quickcheck! {
    fn delete_then_reinsert(xs: Vec<i8>, pick: usize) -> bool {
        if xs.is_empty() {
            return true;
        }
        let mut tree: Tree = xs.iter().map(|&x| i32::from(x)).collect();
        let value = i32::from(xs[pick % xs.len()]);

        let deleted = tree.delete(value);
        tree.assert_invariants();
        tree.insert(value);
        tree.assert_invariants();

        let mut sorted: Vec<i32> = xs.iter().map(|&x| i32::from(x)).collect();
        sorted.sort_unstable();
        deleted && tree.iter().collect::<Vec<_>>() == sorted
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree = xs.iter().map(|&x| i32::from(x)).collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|&x| !tree.contains(x.into()))
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree = xs.iter().map(|&x| i32::from(x)).collect();
        for &delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while tree.delete(delete.into()) {}
            tree.assert_invariants();
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        deletes.iter().all(|&x| !tree.contains(x.into()))
            && still_present.iter().all(|&x| tree.contains(x.into()))
            && tree.len() == still_present.len()
    }
}

quickcheck::quickcheck! {
    fn missing_delete_leaves_render_alone(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree: Tree = xs
            .iter()
            .filter(|&&x| x != missing)
            .map(|&x| i32::from(x))
            .collect();
        let before = tree.render();

        !tree.delete(missing.into()) && tree.render() == before
    }
}
