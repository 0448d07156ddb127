// ==============================================
// PROPERTY TESTS (integration)
// ==============================================

use memokit::policy::lru::LruCache;
use memokit::policy::splay::SplayTree;
use memokit::workload::range_sum::RangeSumIndex;
use memokit::workload::sequence::{fibonacci, fibonacci_uncached};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum ArrayOp {
    Query(usize, usize),
    Update(usize, i64),
}

fn array_op(len: usize) -> impl Strategy<Value = ArrayOp> {
    prop_oneof![
        4 => (0..len, 0..len).prop_map(|(a, b)| ArrayOp::Query(a.min(b), a.max(b))),
        1 => (0..len, -1000i64..1000).prop_map(|(i, v)| ArrayOp::Update(i, v)),
    ]
}

proptest! {
    /// Cached sums equal direct sums under any interleaving of updates.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_range_sum_equivalence(
        values in prop::collection::vec(-1000i64..1000, 1..40),
        capacity in 1usize..16,
        seed_ops in prop::collection::vec(array_op(40), 0..200)
    ) {
        let len = values.len();
        let mut index = RangeSumIndex::new(values, capacity);
        for op in seed_ops {
            match op {
                ArrayOp::Query(l, r) if r < len => {
                    prop_assert_eq!(index.range_sum(l, r), index.range_sum_uncached(l, r));
                }
                ArrayOp::Update(i, v) if i < len => {
                    index.update(i, v).unwrap();
                    for (&(l, r), _) in index.cache().iter() {
                        prop_assert!(!(l <= i && i <= r), "stale range ({}, {}) survived", l, r);
                    }
                }
                _ => {}
            }
        }
    }

    /// Memoized terms equal the iterative reference for any store warm-up order.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_memoized_sequence_matches_reference(
        ns in prop::collection::vec(0u64..=186, 1..20),
        capacity in 1usize..8
    ) {
        let mut tree = SplayTree::new();
        let mut lru = LruCache::new(capacity);
        for n in ns {
            let expected = fibonacci_uncached(n);
            prop_assert_eq!(fibonacci(n, &mut tree), expected);
            prop_assert_eq!(fibonacci(n, &mut lru), expected);
        }
        prop_assert!(tree.check_invariants().is_ok());
        prop_assert!(lru.check_invariants().is_ok());
    }
}
