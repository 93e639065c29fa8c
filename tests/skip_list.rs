use ordkit::SkipList;

#[test]
fn inserts_and_finds_duplicates() {
    let mut list = SkipList::new(4, 0.5);
    for key in [1, 2, 1, 1, 2, 3] {
        list.insert(key);
    }

    assert!(list.contains(&1));
    assert!(list.contains(&2));
    assert!(list.contains(&3));
    assert!(!list.contains(&4));
    assert_eq!(list.len(), 6);
}

#[test]
fn removes_one_occurrence_per_call() {
    let mut list = SkipList::new(4, 0.5);
    for key in [1, 2, 1, 1, 1, 2, 3] {
        list.insert(key);
    }

    // Not in the list.
    assert!(!list.remove(&4));

    assert!(list.remove(&1));
    assert!(list.remove(&2));
    assert!(list.remove(&1));
    assert!(list.remove(&1));
    assert!(list.remove(&1));
    assert!(list.remove(&2));
    assert!(list.remove(&3));

    // The list is now empty.
    assert!(list.is_empty());
    assert!(!list.remove(&1));
    assert!(!list.remove(&2));
    assert!(!list.remove(&3));
    assert!(!list.remove(&4));
}

#[test]
fn seeded_lists_are_reproducible() {
    let mut a = SkipList::with_seed(4, 0.5, 7);
    let mut b = SkipList::with_seed(4, 0.5, 7);

    for key in 0..128 {
        a.insert(key % 17);
        b.insert(key % 17);
    }
    for key in 0..17 {
        assert_eq!(a.remove(&key), b.remove(&key));
        assert_eq!(a.contains(&key), b.contains(&key));
    }
    assert_eq!(a.len(), b.len());
}

#[test]
fn survives_degenerate_probabilities() {
    // p = 0.0 keeps every tower at level 0; p = 1.0 pins them at max_level.
    for p in [0.0, 1.0] {
        let mut list = SkipList::new(4, p);
        for key in (0..64).rev() {
            list.insert(key);
        }
        for key in 0..64 {
            assert!(list.contains(&key));
            assert!(list.remove(&key));
        }
        assert!(list.is_empty());
    }
}
