//! Property tests for the explicit store and physical type filtering

use std::collections::BTreeSet;

use globalcoords::{CoordValue, GlobalCoords};
use proptest::prelude::*;

const TYPES: &[Option<&str>] = &[None, Some("time"), Some("em.wl"), Some("custom:x")];

#[derive(Debug, Clone)]
enum Op {
    Add { name: u8, physical_type: usize },
    Remove { name: u8 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8, 0..TYPES.len()).prop_map(|(name, physical_type)| Op::Add { name, physical_type }),
        (0u8..8).prop_map(|name| Op::Remove { name }),
    ]
}

proptest! {
    /// Property: the count is successful adds minus successful removes.
    #[test]
    fn prop_len_tracks_successful_mutations(ops in prop::collection::vec(op(), 0..40)) {
        let mut coords: GlobalCoords = GlobalCoords::new();
        let mut added = 0usize;
        let mut removed = 0usize;

        for op in ops {
            match op {
                Op::Add { name, physical_type } => {
                    let value = CoordValue::from(format!("v{name}"));
                    if coords.add(format!("c{name}"), TYPES[physical_type], value).is_ok() {
                        added += 1;
                    }
                }
                Op::Remove { name } => {
                    if coords.remove(&format!("c{name}")).is_ok() {
                        removed += 1;
                    }
                }
            }
        }

        prop_assert_eq!(coords.len(), added - removed);
        prop_assert_eq!(coords.keys().len(), coords.len());
    }

    /// Property: filtering yields exactly the entries with the requested type, in order.
    #[test]
    fn prop_filter_selects_matching_subset(
        entries in prop::collection::vec((0u8..16, 0..TYPES.len()), 0..24),
        wanted in 0..TYPES.len(),
    ) {
        let mut coords: GlobalCoords = GlobalCoords::new();
        let mut seen = BTreeSet::new();
        let mut expected = Vec::new();

        for (name, physical_type) in entries {
            if !seen.insert(name) {
                continue;
            }
            let key = format!("c{name}");
            coords.add(key.clone(), TYPES[physical_type], CoordValue::from("x")).unwrap();
            if physical_type == wanted {
                expected.push(key);
            }
        }

        let filtered = coords.filter_by_physical_type(TYPES[wanted]);
        prop_assert_eq!(filtered.keys().collect::<Vec<_>>(), expected);
        for (_, entry) in filtered.entries() {
            prop_assert_eq!(entry.physical_type.as_deref(), TYPES[wanted]);
        }
    }
}
