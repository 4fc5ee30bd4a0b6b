//! Interval and Row-id Set Property Tests
//!
//! Tests for the merge algebra the planner relies on:
//! - Union and intersection agree with pointwise membership
//! - Both are commutative and associative
//! - Insertion keeps intervals sorted, non-empty, disjoint and non-touching
//! - Row-id set sizes satisfy inclusion-exclusion
//! - Value encodings preserve logical order

use halo::codec::{DataType, RowId};
use halo::planner::{Interval, IntervalSet, RowIdSet};
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Strategies
// =============================================================================

fn arb_bound() -> impl Strategy<Value = Option<Vec<u8>>> {
    prop_oneof![
        1 => Just(None),
        6 => (0u8..24).prop_map(|b| Some(vec![b])),
    ]
}

fn arb_interval() -> impl Strategy<Value = Interval> {
    (arb_bound(), arb_bound()).prop_map(|(start, stop)| Interval::new(start, stop))
}

fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(arb_interval(), 0..6)
}

fn arb_set() -> impl Strategy<Value = IntervalSet> {
    arb_intervals().prop_map(|intervals| IntervalSet::from_intervals(0, intervals))
}

fn arb_row_ids() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..64, 0..40)
}

/// Every single-byte key around the generated bounds, plus the empty key
fn probe_keys() -> Vec<Vec<u8>> {
    std::iter::once(Vec::new())
        .chain((0u8..26).map(|b| vec![b]))
        .collect()
}

fn row_id_set(ids: &[u64]) -> RowIdSet {
    ids.iter().copied().map(RowId::new).collect()
}

fn canonical(set: &RowIdSet) -> BTreeSet<u64> {
    set.to_u64s().into_iter().collect()
}

// =============================================================================
// Interval Set Properties
// =============================================================================

proptest! {
    #[test]
    fn union_matches_membership(a in arb_set(), b in arb_set()) {
        let union = a.union(&b).unwrap();
        for key in probe_keys() {
            prop_assert_eq!(union.contains(&key), a.contains(&key) || b.contains(&key));
        }
    }

    #[test]
    fn intersect_matches_membership(a in arb_set(), b in arb_set()) {
        let both = a.intersect(&b).unwrap();
        for key in probe_keys() {
            prop_assert_eq!(both.contains(&key), a.contains(&key) && b.contains(&key));
        }
    }

    #[test]
    fn union_and_intersect_commute(a in arb_set(), b in arb_set()) {
        prop_assert_eq!(a.union(&b).unwrap(), b.union(&a).unwrap());
        prop_assert_eq!(a.intersect(&b).unwrap(), b.intersect(&a).unwrap());
    }

    #[test]
    fn union_and_intersect_associate(a in arb_set(), b in arb_set(), c in arb_set()) {
        prop_assert_eq!(
            a.union(&b).unwrap().union(&c).unwrap(),
            a.union(&b.union(&c).unwrap()).unwrap()
        );
        prop_assert_eq!(
            a.intersect(&b).unwrap().intersect(&c).unwrap(),
            a.intersect(&b.intersect(&c).unwrap()).unwrap()
        );
    }

    #[test]
    fn empty_set_is_union_identity(a in arb_set()) {
        let empty = IntervalSet::new(0);
        prop_assert_eq!(a.union(&empty).unwrap(), a.clone());
        prop_assert!(a.intersect(&empty).unwrap().is_empty());
    }

    #[test]
    fn insert_keeps_canonical_form(intervals in arb_intervals()) {
        let set = IntervalSet::from_intervals(0, intervals.clone());

        for interval in set.iter() {
            prop_assert!(!interval.is_empty());
        }
        for pair in set.intervals().windows(2) {
            // Strictly apart: neither overlapping nor touching
            match (&pair[0].stop, &pair[1].start) {
                (Some(stop), Some(start)) => prop_assert!(stop < start),
                _ => prop_assert!(false, "unbounded interval followed by another"),
            }
        }
        for key in probe_keys() {
            let expected = intervals.iter().any(|iv| iv.contains(&key));
            prop_assert_eq!(set.contains(&key), expected);
        }
    }

    #[test]
    fn insert_order_does_not_matter(intervals in arb_intervals()) {
        let forward = IntervalSet::from_intervals(0, intervals.clone());
        let backward = IntervalSet::from_intervals(0, intervals.into_iter().rev());
        prop_assert_eq!(forward, backward);
    }
}

// =============================================================================
// Row-id Set Properties
// =============================================================================

proptest! {
    #[test]
    fn row_id_merges_match_set_algebra(a in arb_row_ids(), b in arb_row_ids()) {
        let left = row_id_set(&a);
        let right = row_id_set(&b);
        let left_ids: BTreeSet<u64> = a.iter().copied().collect();
        let right_ids: BTreeSet<u64> = b.iter().copied().collect();

        let union = left.union(&right);
        let both = left.intersect(&right);

        prop_assert!(union.is_sorted());
        prop_assert_eq!(union.to_u64s(), left_ids.union(&right_ids).copied().collect::<Vec<_>>());
        prop_assert_eq!(both.to_u64s(), left_ids.intersection(&right_ids).copied().collect::<Vec<_>>());
        prop_assert_eq!(union.len() + both.len(), left_ids.len() + right_ids.len());
    }

    #[test]
    fn row_id_merges_leave_inputs_untouched(a in arb_row_ids(), b in arb_row_ids()) {
        let left = row_id_set(&a);
        let right = row_id_set(&b);
        let before = (left.clone(), right.clone());

        let _ = left.union(&right);
        let _ = left.intersect(&right);
        prop_assert_eq!((left.clone(), right.clone()), before);
        prop_assert_eq!(canonical(&left.union(&right)), canonical(&right.union(&left)));
    }
}

// =============================================================================
// Encoding Order Properties
// =============================================================================

proptest! {
    #[test]
    fn int32_encoding_preserves_order(a in any::<i32>(), b in any::<i32>()) {
        let ea = DataType::Int32.encode(a.to_string().as_bytes()).unwrap();
        let eb = DataType::Int32.encode(b.to_string().as_bytes()).unwrap();
        prop_assert_eq!(ea.cmp(&eb), a.cmp(&b));
    }

    #[test]
    fn int64_encoding_preserves_order(a in any::<i64>(), b in any::<i64>()) {
        let ea = DataType::Int64.encode(a.to_string().as_bytes()).unwrap();
        let eb = DataType::Int64.encode(b.to_string().as_bytes()).unwrap();
        prop_assert_eq!(ea.cmp(&eb), a.cmp(&b));
    }

    #[test]
    fn double_encoding_preserves_order(a in -1.0e12f64..1.0e12, b in -1.0e12f64..1.0e12) {
        prop_assume!(a != b);
        let ea = DataType::Double.encode(a.to_string().as_bytes()).unwrap();
        let eb = DataType::Double.encode(b.to_string().as_bytes()).unwrap();
        prop_assert_eq!(ea < eb, a < b);
    }

    #[test]
    fn varchar_index_bounds_bracket_stored_keys(value in "[a-z]{0,8}", id in 1u64..1_000_000) {
        let data_type = DataType::Varchar(8);
        let encoded = data_type.encode(value.as_bytes()).unwrap();
        let key = halo::codec::index_key(&data_type, &encoded, RowId::new(id)).unwrap();
        let lower = halo::codec::lower_bound(&data_type, &encoded).unwrap();
        let upper = halo::codec::upper_bound(&data_type, &encoded).unwrap();
        prop_assert!(lower < key);
        prop_assert!(key < upper);
    }
}
