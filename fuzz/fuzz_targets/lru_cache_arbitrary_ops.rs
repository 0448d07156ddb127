#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::policy::lru::LruCache;

// Fuzz arbitrary get/put/remove/invalidate sequences on LruCache with
// range keys.
//
// First byte selects capacity; every following 3-byte chunk is one op.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 32) + 1;
    let mut cache: LruCache<(u8, u8), u16> = LruCache::new(capacity);

    for chunk in rest.chunks_exact(3) {
        let (op, a, b) = (chunk[0] % 4, chunk[1], chunk[2]);
        let key = (a.min(b), a.max(b));

        match op {
            0 => {
                cache.put(key, u16::from(a) + u16::from(b));
                assert_eq!(cache.peek(&key), Some(&(u16::from(a) + u16::from(b))));
            }
            1 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.iter().next().map(|(k, _)| *k), Some(key));
                }
            }
            2 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            }
            _ => {
                cache.invalidate_ranges_containing(&a);
                assert!(cache.iter().all(|(&(l, r), _)| !(l <= a && a <= r)));
                assert_eq!(cache.invalidate_ranges_containing(&a), 0);
            }
        }
        assert!(cache.len() <= capacity);
    }

    assert!(cache.check_invariants().is_ok());
});
