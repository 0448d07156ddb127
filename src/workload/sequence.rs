//! Memoized Fibonacci sequence.
//!
//! [`fibonacci`] consults the store before computing each term and records
//! every term it computes, visiting `n - 1` before `n - 2` exactly as the
//! naive recursive definition would. The recursion is replaced by an explicit
//! work stack so large `n` cannot exhaust the call stack.

use crate::traits::MemoStore;

/// Largest `n` for which F(n) fits in a `u128`.
pub const MAX_FIBONACCI_U128: u64 = 186;

enum Frame {
    /// Look up or start computing term `n`.
    Enter(u64),
    /// Both predecessors of `n` are on the value stack.
    Combine(u64),
}

/// Returns F(n) (with F(0) = 0, F(1) = 1), memoizing through `store`.
///
/// Returns `None` when F(n) overflows `u128`, i.e. for
/// `n > MAX_FIBONACCI_U128`. Terms computed before the overflow stay stored.
///
/// # Example
///
/// ```
/// use memokit::policy::splay::SplayTree;
/// use memokit::workload::sequence::fibonacci;
///
/// let mut tree = SplayTree::new();
/// assert_eq!(fibonacci(90, &mut tree), Some(2_880_067_194_370_816_120));
/// assert_eq!(tree.len(), 91);
/// ```
pub fn fibonacci<S>(n: u64, store: &mut S) -> Option<u128>
where
    S: MemoStore<u64, u128> + ?Sized,
{
    let mut frames = vec![Frame::Enter(n)];
    let mut values: Vec<u128> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(k) => {
                if let Some(v) = store.lookup(&k) {
                    values.push(v);
                } else if k <= 1 {
                    let v = u128::from(k);
                    store.store(k, v);
                    values.push(v);
                } else {
                    frames.push(Frame::Combine(k));
                    frames.push(Frame::Enter(k - 2));
                    frames.push(Frame::Enter(k - 1));
                }
            },
            Frame::Combine(k) => {
                let second = values.pop()?;
                let first = values.pop()?;
                let Some(v) = first.checked_add(second) else {
                    tracing::debug!(n = k, "fibonacci term overflows u128");
                    return None;
                };
                store.store(k, v);
                values.push(v);
            },
        }
    }

    values.pop()
}

/// Iterative F(n) without any memo store. `None` on `u128` overflow.
pub fn fibonacci_uncached(n: u64) -> Option<u128> {
    let (mut a, mut b) = (0u128, 1u128);
    for _ in 0..n {
        let next = a.checked_add(b)?;
        a = b;
        b = next;
    }
    Some(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::lru::LruCache;
    use crate::policy::splay::SplayTree;
    use crate::policy::unbounded::UnboundedMemo;

    /// Records every call so the access pattern can be asserted.
    #[derive(Default)]
    struct Recorder {
        memo: UnboundedMemo<u64, u128>,
        log: Vec<String>,
    }

    impl MemoStore<u64, u128> for Recorder {
        fn lookup(&mut self, key: &u64) -> Option<u128> {
            self.log.push(format!("find {}", key));
            self.memo.lookup(key)
        }

        fn store(&mut self, key: u64, value: u128) {
            self.log.push(format!("insert {}", key));
            self.memo.store(key, value);
        }

        fn len(&self) -> usize {
            MemoStore::len(&self.memo)
        }
    }

    #[test]
    fn small_terms() {
        let expected = [0u128, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, want) in expected.iter().enumerate() {
            let mut tree = SplayTree::new();
            assert_eq!(fibonacci(n as u64, &mut tree), Some(*want));
            assert_eq!(fibonacci_uncached(n as u64), Some(*want));
        }
    }

    #[test]
    fn access_order_matches_recursive_definition() {
        let mut rec = Recorder::default();
        assert_eq!(fibonacci(3, &mut rec), Some(2));
        assert_eq!(
            rec.log,
            vec![
                "find 3", "find 2", "find 1", "insert 1", "find 0", "insert 0", "insert 2",
                "find 1", "insert 3",
            ]
        );
    }

    #[test]
    fn second_call_is_a_single_lookup() {
        let mut rec = Recorder::default();
        fibonacci(30, &mut rec);
        rec.log.clear();
        assert_eq!(fibonacci(30, &mut rec), Some(832_040));
        assert_eq!(rec.log, vec!["find 30"]);
    }

    #[test]
    fn largest_representable_term() {
        let mut memo = UnboundedMemo::new();
        let v = fibonacci(MAX_FIBONACCI_U128, &mut memo).unwrap();
        assert_eq!(Some(v), fibonacci_uncached(MAX_FIBONACCI_U128));
        assert_eq!(fibonacci(MAX_FIBONACCI_U128 + 1, &mut memo), None);
        assert_eq!(fibonacci_uncached(MAX_FIBONACCI_U128 + 1), None);
    }

    #[test]
    fn bounded_store_still_yields_correct_terms() {
        let mut lru = LruCache::new(4);
        assert_eq!(fibonacci(60, &mut lru), fibonacci_uncached(60));
        assert!(lru.len() <= 4);
    }

    #[test]
    fn large_n_runs_without_recursion() {
        let mut tree = SplayTree::new();
        assert_eq!(fibonacci(180, &mut tree), fibonacci_uncached(180));
        assert_eq!(tree.len(), 181);
    }
}
