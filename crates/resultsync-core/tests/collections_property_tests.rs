/// Property tests for the index structures.
use proptest::prelude::*;
use resultsync_core::{BiMap, ComparatorChain, OrderedUniqueList};

#[derive(Debug, Clone)]
enum ListOp {
    Append(u8),
    Insert(u8, prop::sample::Index),
    RemoveAt(prop::sample::Index),
    Remove(u8),
    InsertSorted(u8),
}

fn list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        any::<u8>().prop_map(ListOp::Append),
        (any::<u8>(), any::<prop::sample::Index>()).prop_map(|(e, i)| ListOp::Insert(e, i)),
        any::<prop::sample::Index>().prop_map(ListOp::RemoveAt),
        any::<u8>().prop_map(ListOp::Remove),
        any::<u8>().prop_map(ListOp::InsertSorted),
    ]
}

fn assert_inverse(list: &OrderedUniqueList<u8>) -> Result<(), TestCaseError> {
    for (i, element) in list.iter().enumerate() {
        prop_assert_eq!(list.index_of(element), Some(i));
        prop_assert_eq!(list.element_at(i), element);
    }
    Ok(())
}

#[test]
fn prop_side_index_is_exact_inverse() {
    proptest!(|(ops in prop::collection::vec(list_op(), 0..80))| {
        let mut list = OrderedUniqueList::new();
        let chain = ComparatorChain::natural();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                ListOp::Append(e) => {
                    let added = list.append(e);
                    prop_assert_eq!(added, !model.contains(&e));
                    if added {
                        model.push(e);
                    }
                }
                ListOp::Insert(e, at) => {
                    let ordinal = at.index(model.len() + 1);
                    let added = list.insert(e, ordinal);
                    prop_assert_eq!(added, !model.contains(&e));
                    if added {
                        model.insert(ordinal, e);
                    }
                }
                ListOp::RemoveAt(at) => {
                    if !model.is_empty() {
                        let ordinal = at.index(model.len());
                        prop_assert_eq!(list.remove_at(ordinal), model.remove(ordinal));
                    }
                }
                ListOp::Remove(e) => {
                    let expected = model.iter().position(|m| *m == e);
                    prop_assert_eq!(list.remove(&e), expected);
                    if let Some(ordinal) = expected {
                        model.remove(ordinal);
                    }
                }
                ListOp::InsertSorted(e) => {
                    // keep the model sorted so sorted insertion has a defined target
                    model.sort();
                    list.sort(&chain);
                    list.insert_sorted(e, &chain);
                    if !model.contains(&e) {
                        let ordinal = model.partition_point(|m| *m <= e);
                        model.insert(ordinal, e);
                    }
                }
            }
            prop_assert_eq!(list.as_slice(), model.as_slice());
            assert_inverse(&list)?;
        }
    });
}

#[test]
fn prop_bulk_sorted_insert_matches_one_by_one() {
    proptest!(|(
        base in prop::collection::btree_set(any::<u16>(), 0..30),
        incoming in prop::collection::vec(any::<u16>(), 0..30),
    )| {
        let chain = ComparatorChain::natural();
        let mut bulk: OrderedUniqueList<u16> = base.iter().copied().collect();
        let mut single = bulk.clone();

        bulk.insert_sorted_all(incoming.clone(), &chain);
        for element in incoming {
            single.insert_sorted(element, &chain);
        }

        prop_assert_eq!(bulk.as_slice(), single.as_slice());
        for (i, element) in bulk.iter().enumerate() {
            prop_assert_eq!(bulk.index_of(element), Some(i));
        }
        let mut sorted = bulk.as_slice().to_vec();
        sorted.sort();
        prop_assert_eq!(bulk.as_slice(), sorted.as_slice());
    });
}

#[test]
fn prop_stable_sort_keeps_tie_order() {
    proptest!(|(elements in prop::collection::btree_set(any::<u16>(), 0..40))| {
        // shuffle deterministically by reversing, then sort by a coarse key
        let list: OrderedUniqueList<u16> = elements.iter().rev().copied().collect();
        let chain = ComparatorChain::new().then_by_key(|e: &u16| e / 16);
        let sorted = list.sorted(&chain);

        let mut expected = list.as_slice().to_vec();
        expected.sort_by_key(|e| e / 16);
        prop_assert_eq!(sorted.as_slice(), expected.as_slice());
        for (i, element) in sorted.iter().enumerate() {
            prop_assert_eq!(sorted.index_of(element), Some(i));
        }
    });
}

#[test]
fn prop_bimap_put_keeps_bijection() {
    proptest!(|(pairs in prop::collection::vec((0u8..20, 0u8..20), 0..60))| {
        let mut map: BiMap<u8, u8> = BiMap::new();
        for (identity, position) in pairs {
            map.put(identity, position);
            map.put(identity, position);

            prop_assert_eq!(map.position_of(&identity), Some(&position));
            prop_assert_eq!(map.identity_at(&position), Some(&identity));

            for (p, o) in map.iter() {
                prop_assert_eq!(map.position_of(o), Some(p));
                prop_assert_eq!(map.identity_at(p), Some(o));
            }
            let positions: std::collections::HashSet<_> = map.positions().collect();
            prop_assert_eq!(positions.len(), map.len());
        }
    });
}
