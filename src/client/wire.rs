//! Request and response bodies exchanged with the exam server.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{DocumentRole, ExamId, Question, QuestionId};
use crate::parts::{decode_labels, encode_labels, PartTree};

fn default_max_marks() -> u32 {
    10
}

/// One entry of the exam's question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub question_number: u32,
    #[serde(default = "default_max_marks")]
    pub max_marks: u32,
    #[serde(default)]
    pub text: String,
    /// JSON-encoded list of dotted part labels
    #[serde(default)]
    pub part_labels: Option<String>,
}

impl QuestionRecord {
    /// Convert into a [`Question`], validating the stored part labels.
    pub fn into_question(self) -> Result<Question> {
        let labels = decode_labels(self.part_labels.as_deref().unwrap_or_default())?;
        let parts = PartTree::from_labels(self.question_number, labels)?;
        Ok(Question::new(self.id, self.question_number, self.text)
            .with_max_marks(self.max_marks)
            .with_parts(parts))
    }
}

/// Body of a part-label / marks update for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartLabelUpdate {
    pub question_id: QuestionId,
    /// JSON-encoded list, same form as [`QuestionRecord::part_labels`]
    pub part_labels: String,
    pub max_marks: u32,
}

impl PartLabelUpdate {
    pub fn from_question(question: &Question) -> Result<Self> {
        let labels: Vec<_> = question.parts.iter().cloned().collect();
        Ok(Self {
            question_id: question.id,
            part_labels: encode_labels(&labels)?,
            max_marks: question.max_marks,
        })
    }
}

/// Body for creating a question.
#[derive(Debug, Clone, Serialize)]
pub struct NewQuestion {
    pub question_number: u32,
    pub text: String,
    pub max_marks: u32,
}

impl NewQuestion {
    pub fn new(question_number: u32, text: impl Into<String>) -> Self {
        Self {
            question_number,
            text: text.into(),
            max_marks: default_max_marks(),
        }
    }

    pub fn with_max_marks(mut self, max_marks: u32) -> Self {
        self.max_marks = max_marks;
        self
    }
}

/// Which documents have been uploaded for an exam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAvailability {
    #[serde(rename = "Question-Paper", default)]
    pub question_paper: bool,
    #[serde(rename = "Marking-Scheme", default)]
    pub marking_scheme: bool,
    #[serde(rename = "Solution-Script", default)]
    pub solution_script: bool,
    #[serde(rename = "Answer-Script", default)]
    pub answer_script: bool,
}

impl DocumentAvailability {
    /// Check if `role`'s document has been uploaded.
    pub fn has(&self, role: DocumentRole) -> bool {
        match role {
            DocumentRole::QuestionPaper => self.question_paper,
            DocumentRole::MarkingScheme => self.marking_scheme,
            DocumentRole::SolutionScript => self.solution_script,
            DocumentRole::AnswerScript => self.answer_script,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct StageBody {
    pub exam_stage: i64,
}

/// Grade for one question; `grade` is absent when the grader gave no number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionGrade {
    pub question_number: u32,
    #[serde(default)]
    pub grade: Option<u32>,
    #[serde(default)]
    pub reasoning: String,
}

/// Result of a grading run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingReport {
    pub exam_id: ExamId,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub results: Vec<QuestionGrade>,
}

impl GradingReport {
    /// Sum of the grades that were produced.
    pub fn total(&self) -> u32 {
        self.results.iter().filter_map(|r| r.grade).sum()
    }

    /// Questions the grader returned no number for.
    pub fn ungraded(&self) -> Vec<u32> {
        self.results
            .iter()
            .filter(|r| r.grade.is_none())
            .map(|r| r.question_number)
            .collect()
    }
}
