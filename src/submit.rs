//! Submitting finished responses.
//!
//! Every response is finalized into a [`QuestionPayload`] and posted on its
//! own; all posts run concurrently and are joined. Only when every question
//! landed does an answer-script submission request extraction, move the
//! exam to grading and collect the grading report.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};

use crate::assemble::{finalize_question, QuestionPayload};
use crate::capture::CaptureSession;
use crate::client::{ExamBackend, GradingReport};
use crate::compose::Composer;
use crate::error::{Error, Result};
use crate::model::{DocumentRole, DocumentStage, ExamId, QuestionResponse, GRADING_STAGE};
use crate::stage::StageMachine;

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    /// Question numbers that were stored
    pub submitted: Vec<u32>,

    /// Whether extraction was requested
    pub extracted: bool,

    /// Stage after the submission
    pub stage: DocumentStage,

    /// Grading results, for answer scripts
    pub grading: Option<GradingReport>,
}

/// Submits the responses of one document.
pub struct Submitter {
    backend: Arc<dyn ExamBackend>,
    exam_id: ExamId,
    document: DocumentRole,
    extract_sent: bool,
}

impl Submitter {
    pub fn new(backend: Arc<dyn ExamBackend>, exam_id: ExamId, document: DocumentRole) -> Self {
        Self {
            backend,
            exam_id,
            document,
            extract_sent: false,
        }
    }

    /// A submitter for the document `session` captured.
    pub fn for_session(backend: Arc<dyn ExamBackend>, session: &CaptureSession) -> Self {
        Self::new(backend, session.exam_id(), session.document())
    }

    pub fn document(&self) -> DocumentRole {
        self.document
    }

    /// Check if extraction has been requested, successfully or not.
    pub fn extract_sent(&self) -> bool {
        self.extract_sent
    }

    /// Finalize every response into its payload.
    pub async fn finalize(
        responses: &[QuestionResponse],
        composer: &Composer,
    ) -> Result<Vec<QuestionPayload>> {
        try_join_all(responses.iter().map(|r| finalize_question(r, composer))).await
    }

    /// Post every payload concurrently.
    ///
    /// Returns the stored question numbers, or `Error::Submission` naming
    /// every question that failed.
    pub async fn submit_payloads(&self, payloads: &[QuestionPayload]) -> Result<Vec<u32>> {
        let results = join_all(payloads.iter().map(|p| async move {
            let result = self
                .backend
                .submit_response(self.exam_id, self.document, p)
                .await;
            (p.question_number, result)
        }))
        .await;

        let mut submitted = Vec::new();
        let mut failed = Vec::new();
        for (number, result) in results {
            match result {
                Ok(()) => submitted.push(number),
                Err(e) => {
                    log::warn!("question {} was not stored: {}", number, e);
                    failed.push(number);
                }
            }
        }

        if !failed.is_empty() {
            return Err(Error::Submission { failed });
        }
        log::info!(
            "stored {} questions for the {} of exam {}",
            submitted.len(),
            self.document,
            self.exam_id
        );
        Ok(submitted)
    }

    /// Submit `responses` and run the follow-up steps.
    ///
    /// Extraction is requested at most once per submitter; an extraction
    /// failure is returned and leaves the stage untouched.
    pub async fn submit(
        &mut self,
        stage: &mut StageMachine,
        responses: &[QuestionResponse],
        composer: &Composer,
    ) -> Result<SubmissionReport> {
        let payloads = Self::finalize(responses, composer).await?;
        self.submit_finalized(stage, &payloads).await
    }

    /// Submit payloads that were already finalized, then run the follow-up
    /// steps the same way [`submit`](Self::submit) does.
    pub async fn submit_finalized(
        &mut self,
        stage: &mut StageMachine,
        payloads: &[QuestionPayload],
    ) -> Result<SubmissionReport> {
        if stage.exam_id() != self.exam_id {
            return Err(Error::validation(format!(
                "stage belongs to exam {}, not exam {}",
                stage.exam_id(),
                self.exam_id
            )));
        }
        let current = stage.role()?;
        if current != self.document {
            return Err(Error::Permission(format!(
                "exam {} is collecting the {}, not the {}",
                self.exam_id, current, self.document
            )));
        }
        if self.document == DocumentRole::AnswerScript && stage.stage().0 >= GRADING_STAGE {
            return Err(Error::Permission(format!(
                "exam {} has already been sent for grading",
                self.exam_id
            )));
        }
        if payloads.iter().all(QuestionPayload::is_empty) {
            return Err(Error::validation("nothing has been captured to submit"));
        }
        if self.document == DocumentRole::AnswerScript && self.extract_sent {
            return Err(Error::validation(
                "extraction was already requested for this submission",
            ));
        }

        let submitted = self.submit_payloads(payloads).await?;
        let mut report = SubmissionReport {
            submitted,
            extracted: false,
            stage: stage.stage(),
            grading: None,
        };
        if self.document != DocumentRole::AnswerScript {
            return Ok(report);
        }

        self.extract_sent = true;
        self.backend
            .process_document(self.exam_id, self.document)
            .await?;
        report.extracted = true;

        report.grading = stage.advance_to(DocumentStage(GRADING_STAGE)).await?;
        report.stage = stage.stage();
        Ok(report)
    }
}

impl std::fmt::Debug for Submitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submitter")
            .field("exam_id", &self.exam_id)
            .field("document", &self.document)
            .field("extract_sent", &self.extract_sent)
            .finish_non_exhaustive()
    }
}
