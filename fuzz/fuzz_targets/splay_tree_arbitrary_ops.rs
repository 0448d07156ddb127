#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;
use memokit::policy::splay::SplayTree;

// Fuzz arbitrary insert/find/contains sequences on SplayTree against a
// BTreeMap model.
fuzz_target!(|data: &[u8]| {
    let mut tree: SplayTree<u8, u8> = SplayTree::new();
    let mut model = BTreeMap::new();

    for chunk in data.chunks_exact(3) {
        let (op, key, value) = (chunk[0] % 3, chunk[1], chunk[2]);

        match op {
            0 => {
                assert_eq!(tree.insert(key, value), model.insert(key, value));
                assert_eq!(tree.root_key(), Some(&key));
            }
            1 => {
                assert_eq!(tree.find(&key).copied(), model.get(&key).copied());
                if model.contains_key(&key) {
                    assert_eq!(tree.root_key(), Some(&key));
                }
            }
            _ => {
                let root = tree.root_key().copied();
                assert_eq!(tree.contains_key(&key), model.contains_key(&key));
                assert_eq!(tree.root_key().copied(), root);
            }
        }
        assert_eq!(tree.len(), model.len());
    }

    assert!(tree.check_invariants().is_ok());
    assert!(tree.keys().copied().eq(model.keys().copied()));
});
