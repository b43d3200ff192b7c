//! The per-question label forest.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{PartLabel, MAX_CHILDREN, MAX_DEPTH};

/// The set of part labels belonging to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPartTree")]
pub struct PartTree {
    question_number: u32,
    labels: BTreeSet<PartLabel>,
}

#[derive(Deserialize)]
struct RawPartTree {
    question_number: u32,
    labels: Vec<PartLabel>,
}

impl TryFrom<RawPartTree> for PartTree {
    type Error = Error;

    fn try_from(raw: RawPartTree) -> Result<Self> {
        Self::from_labels(raw.question_number, raw.labels)
    }
}

/// How labels moved after a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renumbering {
    /// The removed label and all of its descendants
    pub removed: Vec<PartLabel>,
    /// Labels that shifted down, as (old, new)
    pub moved: Vec<(PartLabel, PartLabel)>,
}

impl Renumbering {
    /// Where `label` ended up: `None` if it was removed.
    pub fn map(&self, label: &PartLabel) -> Option<PartLabel> {
        if self.removed.contains(label) {
            return None;
        }
        self.moved
            .iter()
            .find(|(old, _)| old == label)
            .map(|(_, new)| new.clone())
            .or_else(|| Some(label.clone()))
    }

    /// Check if nothing moved besides the removed subtree.
    pub fn is_trivial(&self) -> bool {
        self.moved.is_empty()
    }
}

impl PartTree {
    /// An empty tree for question `question_number`.
    pub fn new(question_number: u32) -> Self {
        Self {
            question_number,
            labels: BTreeSet::new(),
        }
    }

    /// Build a tree from existing labels, checking every invariant.
    pub fn from_labels(
        question_number: u32,
        labels: impl IntoIterator<Item = PartLabel>,
    ) -> Result<Self> {
        let tree = Self {
            question_number,
            labels: labels.into_iter().collect(),
        };
        tree.check()?;
        Ok(tree)
    }

    /// Build a tree from persisted strings.
    pub fn from_strings<S: AsRef<str>>(question_number: u32, labels: &[S]) -> Result<Self> {
        let parsed = labels
            .iter()
            .map(|s| s.as_ref().parse::<PartLabel>())
            .collect::<Result<Vec<_>>>()?;
        Self::from_labels(question_number, parsed)
    }

    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    /// Number of parts at every depth.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &PartLabel) -> bool {
        self.labels.contains(label)
    }

    /// Labels in sorted order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PartLabel> {
        self.labels.iter()
    }

    /// Sorted labels as dotted strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.to_string()).collect()
    }

    /// Direct children of `parent`, in order.
    pub fn children<'a>(&'a self, parent: &'a PartLabel) -> impl Iterator<Item = &'a PartLabel> {
        self.labels.iter().filter(move |l| parent.is_parent_of(l))
    }

    /// Add the next top-level part, e.g. `2.4` after `2.1`..`2.3`.
    pub fn add_top_level(&mut self) -> Result<PartLabel> {
        let root = PartLabel::root(self.question_number)?;
        self.add_child(&root)
    }

    /// Add the next sub-part under an existing part.
    pub fn add_subpart(&mut self, parent: &PartLabel) -> Result<PartLabel> {
        if !self.labels.contains(parent) {
            return Err(Error::not_found(format!(
                "part {} in question {}",
                parent, self.question_number
            )));
        }
        self.add_child(parent)
    }

    fn add_child(&mut self, parent: &PartLabel) -> Result<PartLabel> {
        if parent.depth() >= MAX_DEPTH {
            log::debug!("refusing to nest below {}", parent);
            return Err(Error::validation(format!(
                "part {} cannot be nested further",
                parent
            )));
        }

        let existing: Vec<u32> = self.children(parent).map(|l| l.last()).collect();
        if existing.len() >= MAX_CHILDREN {
            log::debug!("{} already has {} children", parent, existing.len());
            let owner = if parent.is_root() {
                format!("question {}", parent)
            } else {
                format!("part {}", parent)
            };
            return Err(Error::validation(format!(
                "{} already has {} parts",
                owner, MAX_CHILDREN
            )));
        }

        let next = existing.iter().copied().max().unwrap_or(0) + 1;
        let label = parent.child(next)?;
        self.labels.insert(label.clone());
        Ok(label)
    }

    /// Remove a part with its whole subtree and close the numbering gap.
    ///
    /// Every later sibling moves down by one at the removed label's depth,
    /// and its descendants move with it.
    pub fn remove(&mut self, label: &PartLabel) -> Result<Renumbering> {
        if !self.labels.contains(label) {
            return Err(Error::not_found(format!(
                "part {} in question {}",
                label, self.question_number
            )));
        }
        let parent = match label.parent() {
            Some(p) => p,
            None => return Err(Error::validation("cannot remove a question root")),
        };

        let depth_index = label.depth() - 1;
        let removed_segment = label.last();
        let mut renumbering = Renumbering::default();

        for old in std::mem::take(&mut self.labels) {
            if label.covers(&old) {
                renumbering.removed.push(old);
            } else if parent.is_ancestor_of(&old) && old.segments()[depth_index] > removed_segment
            {
                let new = old.with_segment(depth_index, old.segments()[depth_index] - 1);
                renumbering.moved.push((old, new.clone()));
                self.labels.insert(new);
            } else {
                self.labels.insert(old);
            }
        }

        log::debug!(
            "removed {} ({} labels gone, {} renumbered)",
            label,
            renumbering.removed.len(),
            renumbering.moved.len()
        );
        Ok(renumbering)
    }

    /// Verify the numbering invariants.
    pub fn check(&self) -> Result<()> {
        let mut children: BTreeMap<PartLabel, Vec<u32>> = BTreeMap::new();

        for label in &self.labels {
            if label.question_number() != self.question_number {
                return Err(Error::validation(format!(
                    "part {} does not belong to question {}",
                    label, self.question_number
                )));
            }
            if label.depth() > MAX_DEPTH {
                return Err(Error::validation(format!("part {} is nested too deep", label)));
            }
            let parent = match label.parent() {
                Some(p) => p,
                None => {
                    return Err(Error::validation(format!(
                        "{} is a question, not a part",
                        label
                    )))
                }
            };
            if !parent.is_root() && !self.labels.contains(&parent) {
                return Err(Error::validation(format!("part {} has no parent", label)));
            }
            children.entry(parent).or_default().push(label.last());
        }

        for (parent, suffixes) in children {
            if suffixes.len() > MAX_CHILDREN {
                return Err(Error::validation(format!(
                    "{} has {} parts (max {})",
                    parent,
                    suffixes.len(),
                    MAX_CHILDREN
                )));
            }
            // BTreeSet iteration yields siblings in increasing order
            let contiguous = suffixes.iter().zip(1u32..).all(|(s, i)| *s == i);
            if !contiguous {
                return Err(Error::validation(format!(
                    "parts under {} are not numbered 1..{}",
                    parent,
                    suffixes.len()
                )));
            }
        }
        Ok(())
    }
}
