//! Document stage state machine.
//!
//! The exam's stage counter decides which document may be captured and by
//! whom; writing the grading stage starts the grading run.

use std::sync::Arc;

use crate::capture::{CaptureMode, CaptureOptions, CaptureSession};
use crate::client::{ExamBackend, GradingReport};
use crate::error::{Error, Result};
use crate::model::{DocumentRole, DocumentStage, ExamId, UserRole, GRADED_STAGE};

/// The document worked on at `stage`.
pub fn role_for_stage(stage: DocumentStage) -> Result<DocumentRole> {
    stage.role()
}

/// The capture mode `user` works in on `document`.
///
/// Instructors capture the question paper question by question and annotate
/// the marking scheme and solution script against fixed questions; students
/// only annotate their answer script.
pub fn capture_mode_for(user: UserRole, document: DocumentRole) -> Result<CaptureMode> {
    match (user, document) {
        (UserRole::Instructor, DocumentRole::QuestionPaper) => Ok(CaptureMode::Sequential),
        (UserRole::Instructor, DocumentRole::MarkingScheme)
        | (UserRole::Instructor, DocumentRole::SolutionScript)
        | (UserRole::Student, DocumentRole::AnswerScript) => Ok(CaptureMode::Selective),
        (user, document) => Err(Error::Permission(format!(
            "{:?} cannot capture the {}",
            user, document
        ))),
    }
}

/// The stage of one exam, kept in step with the server.
pub struct StageMachine {
    backend: Arc<dyn ExamBackend>,
    exam_id: ExamId,
    stage: DocumentStage,
}

impl StageMachine {
    /// Read the exam's current stage.
    pub async fn load(backend: Arc<dyn ExamBackend>, exam_id: ExamId) -> Result<Self> {
        let stage = backend.get_stage(exam_id).await?;
        stage.role()?;
        log::debug!("exam {} is at stage {}", exam_id, stage);
        Ok(Self {
            backend,
            exam_id,
            stage,
        })
    }

    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    pub fn stage(&self) -> DocumentStage {
        self.stage
    }

    /// The document the current stage works on.
    pub fn role(&self) -> Result<DocumentRole> {
        self.stage.role()
    }

    /// Check that `user` may capture `document` now.
    ///
    /// Fails with `Permission` when the pairing is not allowed or the stage
    /// is on another document, and with `NotFound` when the document has not
    /// been uploaded.
    pub async fn authorize(&self, user: UserRole, document: DocumentRole) -> Result<CaptureMode> {
        let mode = capture_mode_for(user, document)?;
        let current = self.role()?;
        if current != document {
            return Err(Error::Permission(format!(
                "exam {} is at stage {}, which works on the {}",
                self.exam_id, self.stage, current
            )));
        }
        let available = self.backend.available_documents(self.exam_id).await?;
        if !available.has(document) {
            return Err(Error::not_found(format!(
                "{} of exam {}",
                document.availability_key(),
                self.exam_id
            )));
        }
        Ok(mode)
    }

    /// Authorize and start a capture session over the exam's questions.
    pub async fn open_session(
        &self,
        user: UserRole,
        document: DocumentRole,
        options: CaptureOptions,
    ) -> Result<CaptureSession> {
        let mode = self.authorize(user, document).await?;
        let questions = self.backend.fetch_questions(self.exam_id).await?;
        CaptureSession::new(self.exam_id, document, mode, questions, options)
    }

    /// Write `target` as the new stage. Stages only move forward.
    ///
    /// Writing the grading stage runs the grader; once its report is in the
    /// stage moves on to graded and the report is returned.
    pub async fn advance_to(&mut self, target: DocumentStage) -> Result<Option<GradingReport>> {
        if target <= self.stage {
            return Err(Error::validation(format!(
                "exam {} is at stage {}; cannot move to stage {}",
                self.exam_id, self.stage, target
            )));
        }
        target.role()?;
        self.backend.set_stage(self.exam_id, target).await?;
        log::info!("exam {}: stage {} -> {}", self.exam_id, self.stage, target);
        self.stage = target;

        if !target.is_grading() {
            return Ok(None);
        }
        let report = self.backend.request_grading(self.exam_id).await?;
        let graded = DocumentStage(GRADED_STAGE);
        self.backend.set_stage(self.exam_id, graded).await?;
        self.stage = graded;
        log::info!(
            "exam {} graded: {} marks over {} questions",
            self.exam_id,
            report.total(),
            report.results.len()
        );
        Ok(Some(report))
    }

    /// Move to the following stage.
    pub async fn advance(&mut self) -> Result<Option<GradingReport>> {
        self.advance_to(self.stage.next()).await
    }
}

impl std::fmt::Debug for StageMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageMachine")
            .field("exam_id", &self.exam_id)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_modes() {
        use DocumentRole::*;
        assert_eq!(
            capture_mode_for(UserRole::Instructor, QuestionPaper).unwrap(),
            CaptureMode::Sequential
        );
        for doc in [MarkingScheme, SolutionScript] {
            assert_eq!(
                capture_mode_for(UserRole::Instructor, doc).unwrap(),
                CaptureMode::Selective
            );
        }
        assert_eq!(
            capture_mode_for(UserRole::Student, AnswerScript).unwrap(),
            CaptureMode::Selective
        );
        assert!(matches!(
            capture_mode_for(UserRole::Student, QuestionPaper),
            Err(Error::Permission(_))
        ));
        assert!(matches!(
            capture_mode_for(UserRole::Instructor, AnswerScript),
            Err(Error::Permission(_))
        ));
    }

    #[test]
    fn test_role_for_stage() {
        assert_eq!(
            role_for_stage(DocumentStage(4)).unwrap(),
            DocumentRole::SolutionScript
        );
        assert!(role_for_stage(DocumentStage(9)).is_err());
        assert!(role_for_stage(DocumentStage(-1)).is_err());
    }
}
