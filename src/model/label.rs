//! Dotted-decimal part labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of segments in a label, question number included.
pub const MAX_DEPTH: usize = 6;

/// Maximum number of direct children under any node.
pub const MAX_CHILDREN: usize = 6;

/// Identifier of a question sub-part, e.g. `3.2.1`.
///
/// The first segment is the question's display number; every further
/// segment is the 1-based position of the part under its parent.
/// Labels order segment by segment, so a parent sorts immediately before
/// its first child and `2.2` sorts before `2.10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartLabel {
    segments: Vec<u32>,
}

impl PartLabel {
    /// Build a label from its segments.
    ///
    /// Fails on an empty segment list or a zero segment.
    pub fn new(segments: Vec<u32>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::validation("part label has no segments"));
        }
        if segments.contains(&0) {
            return Err(Error::validation(format!(
                "part label {:?} contains a zero segment",
                segments
            )));
        }
        Ok(Self { segments })
    }

    /// The root label of a question.
    pub fn root(question_number: u32) -> Result<Self> {
        Self::new(vec![question_number])
    }

    /// The segments of this label.
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The question number this label belongs to.
    pub fn question_number(&self) -> u32 {
        self.segments[0]
    }

    /// The final segment (position under the parent).
    pub fn last(&self) -> u32 {
        self.segments[self.segments.len() - 1]
    }

    /// Whether this label is a question root rather than a part.
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// The parent label, or `None` for a question root.
    pub fn parent(&self) -> Option<PartLabel> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The label of the `index`-th child (1-based).
    pub fn child(&self, index: u32) -> Result<PartLabel> {
        let mut segments = self.segments.clone();
        segments.push(index);
        Self::new(segments)
    }

    /// Whether `other` lies strictly below this label.
    pub fn is_ancestor_of(&self, other: &PartLabel) -> bool {
        other.segments.len() > self.segments.len() && other.segments.starts_with(&self.segments)
    }

    /// Whether `other` is this label or lies below it.
    pub fn covers(&self, other: &PartLabel) -> bool {
        other == self || self.is_ancestor_of(other)
    }

    /// Whether `other` is a direct child of this label.
    pub fn is_parent_of(&self, other: &PartLabel) -> bool {
        other.segments.len() == self.segments.len() + 1 && self.is_ancestor_of(other)
    }

    /// Return a copy with the segment at `index` replaced.
    pub(crate) fn with_segment(&self, index: usize, value: u32) -> PartLabel {
        let mut segments = self.segments.clone();
        segments[index] = value;
        Self { segments }
    }
}

impl fmt::Display for PartLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromStr for PartLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("empty part label"));
        }
        let segments = trimmed
            .split('.')
            .map(|seg| {
                seg.parse::<u32>()
                    .map_err(|_| Error::validation(format!("invalid part label: {:?}", s)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(segments)
    }
}

impl TryFrom<String> for PartLabel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PartLabel> for String {
    fn from(label: PartLabel) -> Self {
        label.to_string()
    }
}
