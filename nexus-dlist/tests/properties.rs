//! Randomized checks against a `Vec` model.

use nexus_dlist::{BoxedList, Cursor, Full, InsertError, List, ListError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    PushBack(u32),
    PopFront,
    Insert(usize, u32),
    Remove(usize),
    Set(usize, u32),
    Get(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    // Indices deliberately overshoot typical lengths to hit the bounds
    prop_oneof![
        4 => any::<u32>().prop_map(Op::PushBack),
        1 => Just(Op::PopFront),
        3 => (0..40usize, any::<u32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => (0..40usize).prop_map(Op::Remove),
        2 => (0..40usize, any::<u32>()).prop_map(|(i, v)| Op::Set(i, v)),
        2 => (0..40usize).prop_map(Op::Get),
        1 => Just(Op::Clear),
    ]
}

fn contents(list: &List<u32>) -> Vec<u32> {
    list.iter().copied().collect()
}

proptest! {
    #[test]
    fn matches_vec_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut list: List<u32> = List::new();
        let mut model: Vec<u32> = Vec::new();

        for op in ops {
            let len = model.len();
            match op {
                Op::PushBack(v) => {
                    prop_assert_eq!(list.push_back(v), Ok(()));
                    model.push(v);
                }
                Op::PopFront => {
                    if model.is_empty() {
                        prop_assert_eq!(list.pop_front(), Err(ListError::Empty));
                    } else {
                        prop_assert_eq!(list.pop_front(), Ok(model.remove(0)));
                    }
                }
                Op::Insert(i, v) => {
                    if i <= len {
                        prop_assert_eq!(list.insert(i, v), Ok(()));
                        model.insert(i, v);
                    } else {
                        prop_assert_eq!(
                            list.insert(i, v),
                            Err(InsertError::OutOfRange { index: i, len, value: v })
                        );
                    }
                }
                Op::Remove(i) => {
                    if i < len {
                        prop_assert_eq!(list.remove(i), Ok(model.remove(i)));
                    } else {
                        prop_assert_eq!(
                            list.remove(i),
                            Err(ListError::OutOfRange { index: i, len })
                        );
                    }
                }
                Op::Set(i, v) => {
                    if i < len {
                        prop_assert_eq!(list.set(i, v), Ok(()));
                        model[i] = v;
                    } else {
                        prop_assert_eq!(
                            list.set(i, v),
                            Err(ListError::OutOfRange { index: i, len })
                        );
                    }
                }
                Op::Get(i) => {
                    prop_assert_eq!(list.get(i).ok(), model.get(i));
                }
                Op::Clear => {
                    list.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.is_empty(), model.is_empty());
            prop_assert_eq!(list.front(), model.first());
            prop_assert_eq!(list.back(), model.last());
        }

        prop_assert_eq!(contents(&list), model);
    }

    #[test]
    fn len_counts_appends(values in prop::collection::vec(any::<u32>(), 0..100)) {
        let mut list: List<u32> = List::new();
        for (k, v) in values.iter().enumerate() {
            prop_assert_eq!(list.len(), k);
            list.push_back(*v).unwrap();
        }
        prop_assert_eq!(list.len(), values.len());
    }

    #[test]
    fn pop_front_is_fifo(values in prop::collection::vec(any::<u32>(), 0..100)) {
        let mut list: List<u32> = List::new();
        for v in &values {
            list.push_back(*v).unwrap();
        }

        let mut popped = Vec::new();
        while let Ok(v) = list.pop_front() {
            popped.push(v);
        }
        prop_assert_eq!(popped, values);
    }

    #[test]
    fn insert_at_head_reverses(values in prop::collection::vec(any::<u32>(), 0..100)) {
        let mut list: List<u32> = List::new();
        for v in &values {
            list.insert(0, *v).unwrap();
        }

        let mut expected = values;
        expected.reverse();
        prop_assert_eq!(contents(&list), expected);
    }

    #[test]
    fn find_index_returns_lowest_match(
        values in prop::collection::vec(0..8u32, 0..60),
        needle in 0..8u32,
    ) {
        let mut list: List<u32> = List::new();
        for v in &values {
            list.push_back(*v).unwrap();
        }

        let expected = values
            .iter()
            .position(|v| *v == needle)
            .ok_or(ListError::NotFound);
        prop_assert_eq!(list.find_index(&needle, |a, b| a == b), expected);
    }

    #[test]
    fn cursor_visits_each_element_once(values in prop::collection::vec(any::<u32>(), 0..60)) {
        let mut list: List<u32> = List::new();
        for v in &values {
            list.push_back(*v).unwrap();
        }

        let mut cursor = list.cursor();
        let mut forward = Vec::new();
        cursor.move_first();
        while let Some(v) = cursor.current() {
            forward.push(*v);
            cursor.move_next();
        }
        prop_assert!(cursor.is_end());
        cursor.move_next();
        prop_assert!(cursor.is_end());

        let mut backward = Vec::new();
        cursor.move_last();
        while let Some(v) = cursor.current() {
            backward.push(*v);
            cursor.move_prev();
        }
        prop_assert!(cursor.is_end());

        backward.reverse();
        prop_assert_eq!(&forward, &values);
        prop_assert_eq!(backward, values);
    }

    #[test]
    fn bytes_round_trip(records in prop::collection::vec(any::<[u8; 24]>(), 1..40)) {
        let mut list: BoxedList<[u8; 24]> = BoxedList::with_capacity(records.len()).unwrap();
        for r in &records {
            list.push_back(*r).unwrap();
        }

        for (i, r) in records.iter().enumerate() {
            prop_assert_eq!(list.get(i), Ok(r));
        }
        prop_assert_eq!(list.push_back([7; 24]), Err(Full([7; 24])));
    }
}
