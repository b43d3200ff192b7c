//! Exam lifecycle stages and the document roles they map to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stage at which writing triggers the grading run.
pub const GRADING_STAGE: i64 = 7;

/// Stage recorded once grading results are in.
pub const GRADED_STAGE: i64 = 8;

/// The exam lifecycle counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentStage(pub i64);

impl DocumentStage {
    /// The document being worked on at this stage.
    ///
    /// Stages 0–2 are the question paper, 3 the marking scheme, 4 the
    /// solution script and 5–8 the answer scripts. Anything else is invalid.
    pub fn role(&self) -> Result<DocumentRole> {
        match self.0 {
            0..=2 => Ok(DocumentRole::QuestionPaper),
            3 => Ok(DocumentRole::MarkingScheme),
            4 => Ok(DocumentRole::SolutionScript),
            5..=8 => Ok(DocumentRole::AnswerScript),
            other => Err(Error::validation(format!("invalid exam stage {}", other))),
        }
    }

    /// Human-readable name of the stage.
    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "question upload",
            1 => "label extract",
            2 => "solution upload",
            3 => "marking annotate",
            4 => "solution annotate",
            5 => "answer upload",
            6 => "answer annotate",
            7 => "grading",
            8 => "graded",
            _ => "unknown",
        }
    }

    /// The following stage.
    pub fn next(&self) -> DocumentStage {
        DocumentStage(self.0 + 1)
    }

    pub fn is_grading(&self) -> bool {
        self.0 == GRADING_STAGE
    }
}

impl fmt::Display for DocumentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

/// Which document of an exam a capture session works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    QuestionPaper,
    MarkingScheme,
    SolutionScript,
    AnswerScript,
}

impl DocumentRole {
    /// Snake-case identifier used in URLs and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentRole::QuestionPaper => "question_paper",
            DocumentRole::MarkingScheme => "marking_scheme",
            DocumentRole::SolutionScript => "solution_script",
            DocumentRole::AnswerScript => "answer_script",
        }
    }

    /// Key used by the document availability endpoint.
    pub fn availability_key(&self) -> &'static str {
        match self {
            DocumentRole::QuestionPaper => "Question-Paper",
            DocumentRole::MarkingScheme => "Marking-Scheme",
            DocumentRole::SolutionScript => "Solution-Script",
            DocumentRole::AnswerScript => "Answer-Script",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "question_paper" => Ok(DocumentRole::QuestionPaper),
            "marking_scheme" => Ok(DocumentRole::MarkingScheme),
            "solution_script" => Ok(DocumentRole::SolutionScript),
            "answer_script" => Ok(DocumentRole::AnswerScript),
            _ => Err(Error::validation(format!("unknown document type: {}", s))),
        }
    }
}

/// Who is capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Lecturer or reviewer preparing the exam documents
    Instructor,
    /// Examinee annotating their own answer script
    Student,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_roles() {
        let roles: Vec<_> = (0..=8)
            .map(|s| DocumentStage(s).role().unwrap())
            .collect();
        assert_eq!(
            roles,
            vec![
                DocumentRole::QuestionPaper,
                DocumentRole::QuestionPaper,
                DocumentRole::QuestionPaper,
                DocumentRole::MarkingScheme,
                DocumentRole::SolutionScript,
                DocumentRole::AnswerScript,
                DocumentRole::AnswerScript,
                DocumentRole::AnswerScript,
                DocumentRole::AnswerScript,
            ]
        );
    }

    #[test]
    fn test_invalid_stage() {
        assert!(DocumentStage(-1).role().is_err());
        assert!(DocumentStage(9).role().is_err());
    }

    #[test]
    fn test_role_strings() {
        assert_eq!(DocumentRole::AnswerScript.to_string(), "answer_script");
        assert_eq!(
            "Marking-Scheme".parse::<DocumentRole>().unwrap(),
            DocumentRole::MarkingScheme
        );
        assert!("essay".parse::<DocumentRole>().is_err());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(DocumentStage(7).to_string(), "7 (grading)");
        assert!(DocumentStage(7).is_grading());
        assert_eq!(DocumentStage(6).next(), DocumentStage(7));
    }
}
