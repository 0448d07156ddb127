#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Tests random sequences of push_front, pop_back, move_to_front, remove and
// clear operations.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut all_ids = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let value = u32::from(chunk[1]);

        match op {
            0 => {
                let id = list.push_front(value);
                all_ids.push(id);
                assert_eq!(list.front(), Some(&value));
                assert!(list.contains(id));
            }
            1 => {
                let old_len = list.len();
                if list.pop_back().is_some() {
                    assert_eq!(list.len(), old_len - 1);
                }
            }
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.front(), list.get(id));
                    }
                }
            }
            3 => {
                if !all_ids.is_empty() {
                    let id = all_ids.swap_remove(value as usize % all_ids.len());
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                    }
                }
            }
            _ => {
                list.clear();
                all_ids.clear();
                assert!(list.is_empty());
            }
        }
        list.debug_validate_invariants();
    }
});
