//! Exam server interface.
//!
//! Everything the capture flow needs from the server goes through the
//! [`ExamBackend`] trait, so the flow can run against [`HttpBackend`] or
//! an in-memory stand-in.
//!
//! # Example
//!
//! ```no_run
//! use scriptmark::client::{ClientOptions, ExamBackend, HttpBackend};
//!
//! # async fn run() -> scriptmark::Result<()> {
//! let backend = HttpBackend::new(
//!     ClientOptions::new("http://localhost:8000").with_token("secret"),
//! )?;
//! for question in backend.fetch_questions(12).await? {
//!     println!("{} ({} marks)", question.caption(), question.max_marks);
//! }
//! # Ok(())
//! # }
//! ```

mod http;
mod wire;

pub use http::HttpBackend;
pub use wire::{
    DocumentAvailability, GradingReport, NewQuestion, PartLabelUpdate, QuestionGrade,
    QuestionRecord,
};

use std::time::Duration;

use async_trait::async_trait;

use crate::assemble::QuestionPayload;
use crate::error::Result;
use crate::model::{DocumentRole, DocumentStage, ExamId, Question};

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server root, without a trailing slash
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Calls the capture flow makes against the exam server.
#[async_trait]
pub trait ExamBackend: Send + Sync {
    /// Questions of an exam with their current part labels, by question number.
    async fn fetch_questions(&self, exam_id: ExamId) -> Result<Vec<Question>>;

    /// Persist edited part labels and max marks of one question.
    async fn update_parts(&self, exam_id: ExamId, update: &PartLabelUpdate) -> Result<()>;

    /// Create a question and return it with its server id.
    async fn create_question(&self, exam_id: ExamId, question: &NewQuestion) -> Result<Question>;

    /// Current lifecycle stage.
    async fn get_stage(&self, exam_id: ExamId) -> Result<DocumentStage>;

    /// Write a new lifecycle stage.
    async fn set_stage(&self, exam_id: ExamId, stage: DocumentStage) -> Result<()>;

    /// Which documents have been uploaded.
    async fn available_documents(&self, exam_id: ExamId) -> Result<DocumentAvailability>;

    /// Store one finalized question.
    async fn submit_response(
        &self,
        exam_id: ExamId,
        document: DocumentRole,
        payload: &QuestionPayload,
    ) -> Result<()>;

    /// Run extraction over everything submitted for `document`.
    ///
    /// Not idempotent; callers issue it at most once per submission.
    async fn process_document(&self, exam_id: ExamId, document: DocumentRole) -> Result<()>;

    /// Grade the exam's answer script.
    async fn request_grading(&self, exam_id: ExamId) -> Result<GradingReport>;
}
