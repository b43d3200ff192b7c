//! Exam questions.

use serde::{Deserialize, Serialize};

use super::PartLabel;
use crate::parts::PartTree;

/// Server-side question identifier.
pub type QuestionId = i64;

/// Server-side exam identifier.
pub type ExamId = i64;

/// A question of the exam together with its part tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Opaque server id
    pub id: QuestionId,

    /// Display number (1, 2, 3, ...)
    pub number: u32,

    /// Maximum marks awarded for the question
    pub max_marks: u32,

    /// Prompt text
    pub text: String,

    /// Sub-part labels
    pub parts: PartTree,
}

impl Question {
    /// Create a question without parts.
    pub fn new(id: QuestionId, number: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            number,
            max_marks: 10,
            text: text.into(),
            parts: PartTree::new(number),
        }
    }

    /// Set maximum marks.
    pub fn with_max_marks(mut self, max_marks: u32) -> Self {
        self.max_marks = max_marks;
        self
    }

    /// Replace the part tree.
    pub fn with_parts(mut self, parts: PartTree) -> Self {
        self.parts = parts;
        self
    }

    /// Caption used at the top of the question's composites.
    pub fn caption(&self) -> String {
        question_caption(self.number)
    }
}

/// Caption naming a question.
pub fn question_caption(number: u32) -> String {
    format!("Question {}", number)
}

/// Caption naming a sub-part.
pub fn part_caption(label: &PartLabel) -> String {
    format!("Part {}", label)
}
