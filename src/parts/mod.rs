//! Part-label tree engine.
//!
//! Each question owns a forest of dotted-decimal labels (`2.1`, `2.1.3`, ...).
//! [`PartTree`] enforces the numbering rules on every mutation:
//!
//! - siblings are numbered `1..=k` with no gaps,
//! - a label has at most [`MAX_DEPTH`](crate::model::MAX_DEPTH) segments,
//! - a node has at most [`MAX_CHILDREN`](crate::model::MAX_CHILDREN) children.
//!
//! Labels are only turned back into strings at the persistence boundary,
//! see [`encode_labels`] and [`decode_labels`].

mod codec;
mod tree;

pub use codec::{decode_labels, encode_labels};
pub use tree::{PartTree, Renumbering};

use crate::error::Result;
use crate::model::PartLabel;

/// Sort dotted label strings segment by segment.
///
/// A missing segment sorts before any present one, so a parent comes
/// immediately before its first child.
///
/// # Example
///
/// ```
/// use scriptmark::parts::sort_part_labels;
///
/// let sorted = sort_part_labels(&["2.10", "2.2", "2"]).unwrap();
/// assert_eq!(sorted, vec!["2", "2.2", "2.10"]);
/// ```
pub fn sort_part_labels<S: AsRef<str>>(labels: &[S]) -> Result<Vec<String>> {
    let mut parsed = labels
        .iter()
        .map(|s| s.as_ref().parse::<PartLabel>())
        .collect::<Result<Vec<_>>>()?;
    parsed.sort();
    Ok(parsed.into_iter().map(|l| l.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_numeric_not_lexicographic() {
        let sorted = sort_part_labels(&["2.10", "2.2", "2"]).unwrap();
        assert_eq!(sorted, vec!["2", "2.2", "2.10"]);
    }

    #[test]
    fn test_sort_parent_before_children() {
        let sorted = sort_part_labels(&["1.2", "1.1.2", "1.1", "1.1.1", "1.10"]).unwrap();
        assert_eq!(sorted, vec!["1.1", "1.1.1", "1.1.2", "1.2", "1.10"]);
    }

    #[test]
    fn test_sort_rejects_malformed() {
        assert!(sort_part_labels(&["1.1", "1.x"]).is_err());
    }
}
