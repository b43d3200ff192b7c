//! Integration tests for the part-label tree.

use proptest::prelude::*;
use scriptmark::model::{PartLabel, MAX_CHILDREN, MAX_DEPTH};
use scriptmark::parts::{decode_labels, encode_labels, sort_part_labels, PartTree};
use scriptmark::Error;

fn label(s: &str) -> PartLabel {
    s.parse().unwrap()
}

/// Grow a tree from a list of (operation, pick) pairs. Rejected additions
/// are ignored, the way the editor shows a warning and moves on.
fn grow(question: u32, ops: &[(u8, usize)]) -> PartTree {
    let mut tree = PartTree::new(question);
    for &(op, pick) in ops {
        if op == 0 || tree.is_empty() {
            let _ = tree.add_top_level();
        } else {
            let labels: Vec<PartLabel> = tree.iter().cloned().collect();
            let parent = labels[pick % labels.len()].clone();
            let _ = tree.add_subpart(&parent);
        }
    }
    tree
}

#[test]
fn test_sort_numeric_segments() {
    assert_eq!(
        sort_part_labels(&["2.10", "2.2", "2"]).unwrap(),
        vec!["2", "2.2", "2.10"]
    );
    assert_eq!(
        sort_part_labels(&["1.2", "1.1.3", "1.1", "1.10.1", "1.1.2"]).unwrap(),
        vec!["1.1", "1.1.2", "1.1.3", "1.2", "1.10.1"]
    );
    assert!(sort_part_labels(&["1..2"]).is_err());
}

#[test]
fn test_remove_middle_renumbers_subtree() {
    let mut tree = PartTree::from_strings(2, &["2.1", "2.2", "2.3", "2.3.1"]).unwrap();
    let renumbering = tree.remove(&label("2.2")).unwrap();

    assert_eq!(tree.to_strings(), vec!["2.1", "2.2", "2.2.1"]);
    assert_eq!(renumbering.removed, vec![label("2.2")]);
    assert_eq!(renumbering.map(&label("2.3")), Some(label("2.2")));
    assert_eq!(renumbering.map(&label("2.3.1")), Some(label("2.2.1")));
    assert_eq!(renumbering.map(&label("2.1")), Some(label("2.1")));
}

#[test]
fn test_remove_in_deep_tree() {
    let mut tree = PartTree::from_strings(
        1,
        &[
            "1.1", "1.1.1", "1.1.2", "1.1.2.1", "1.1.3", "1.1.3.1", "1.1.3.1.1", "1.2",
        ],
    )
    .unwrap();
    tree.remove(&label("1.1.2")).unwrap();
    assert_eq!(
        tree.to_strings(),
        vec!["1.1", "1.1.1", "1.1.2", "1.1.2.1", "1.1.2.1.1", "1.2"]
    );
    assert!(tree.check().is_ok());
}

#[test]
fn test_limits_fail_without_mutation() {
    let mut tree = PartTree::new(3);
    for _ in 0..MAX_CHILDREN {
        tree.add_top_level().unwrap();
    }
    let snapshot = tree.clone();
    assert!(matches!(tree.add_top_level(), Err(Error::Validation(_))));
    assert_eq!(tree, snapshot);

    let parent = label("3.1");
    for _ in 0..MAX_CHILDREN {
        tree.add_subpart(&parent).unwrap();
    }
    let snapshot = tree.clone();
    assert!(matches!(tree.add_subpart(&parent), Err(Error::Validation(_))));
    assert_eq!(tree, snapshot);
}

#[test]
fn test_codec_roundtrip_preserves_order() {
    let labels = vec![label("4.2"), label("4.1.1"), label("4.1")];
    let encoded = encode_labels(&labels).unwrap();
    assert_eq!(decode_labels(&encoded).unwrap(), labels);
}

proptest! {
    #[test]
    fn prop_growth_respects_limits(ops in prop::collection::vec((0u8..3, 0usize..64), 0..80)) {
        let tree = grow(1, &ops);
        prop_assert!(tree.check().is_ok());
        for l in tree.iter() {
            prop_assert!(l.depth() <= MAX_DEPTH);
            prop_assert!(tree.children(l).count() <= MAX_CHILDREN);
        }
    }

    #[test]
    fn prop_remove_keeps_siblings_contiguous(
        ops in prop::collection::vec((0u8..3, 0usize..64), 1..80),
        victim in 0usize..64,
    ) {
        let mut tree = grow(2, &ops);
        let before: Vec<PartLabel> = tree.iter().cloned().collect();
        let target = before[victim % before.len()].clone();

        let renumbering = tree.remove(&target).unwrap();

        prop_assert!(tree.check().is_ok());
        prop_assert!(!tree.contains(&target) || renumbering.moved.iter().any(|(_, new)| *new == target));
        prop_assert_eq!(tree.len(), before.len() - renumbering.removed.len());
        for old in &before {
            match renumbering.map(old) {
                Some(new) => prop_assert!(tree.contains(&new)),
                None => prop_assert!(target.covers(old)),
            }
        }
    }

    #[test]
    fn prop_codec_roundtrip(ops in prop::collection::vec((0u8..3, 0usize..64), 0..40)) {
        let labels: Vec<PartLabel> = grow(5, &ops).iter().rev().cloned().collect();
        let decoded = decode_labels(&encode_labels(&labels).unwrap()).unwrap();
        prop_assert_eq!(decoded, labels);
    }
}
