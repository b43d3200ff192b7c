//! [`ExamBackend`] over HTTP.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::wire::StageBody;
use super::{
    ClientOptions, DocumentAvailability, ExamBackend, GradingReport, NewQuestion,
    PartLabelUpdate, QuestionRecord,
};
use crate::assemble::QuestionPayload;
use crate::error::{Error, Result};
use crate::model::{DocumentRole, DocumentStage, ExamId, Question};

/// Exam server client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    options: ClientOptions,
}

impl HttpBackend {
    /// Build a client.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;
        Ok(Self { http, options })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.options.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.options.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::not_found(what.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} failed with status {}: {}", what, status, body);
            return Err(Error::Network(format!(
                "{} failed with status {}",
                what, status
            )));
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = self.send(request, what).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ExamBackend for HttpBackend {
    async fn fetch_questions(&self, exam_id: ExamId) -> Result<Vec<Question>> {
        let request = self
            .http
            .get(self.url(&format!("/exams/{}/questions/all", exam_id)));
        let records: Vec<QuestionRecord> = self
            .json(request, &format!("questions of exam {}", exam_id))
            .await?;
        let mut questions = records
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>>>()?;
        questions.sort_by_key(|q| q.number);
        log::debug!("fetched {} questions for exam {}", questions.len(), exam_id);
        Ok(questions)
    }

    async fn update_parts(&self, exam_id: ExamId, update: &PartLabelUpdate) -> Result<()> {
        let request = self
            .http
            .patch(self.url(&format!(
                "/exams/{}/questions/{}",
                exam_id, update.question_id
            )))
            .json(update);
        self.send(request, &format!("question {}", update.question_id))
            .await?;
        Ok(())
    }

    async fn create_question(&self, exam_id: ExamId, question: &NewQuestion) -> Result<Question> {
        let request = self
            .http
            .post(self.url(&format!("/exams/{}/questions", exam_id)))
            .json(question);
        let record: QuestionRecord = self
            .json(request, &format!("exam {}", exam_id))
            .await?;
        record.into_question()
    }

    async fn get_stage(&self, exam_id: ExamId) -> Result<DocumentStage> {
        let request = self.http.get(self.url(&format!("/exams/{}/stage", exam_id)));
        let body: StageBody = self
            .json(request, &format!("stage of exam {}", exam_id))
            .await?;
        Ok(DocumentStage(body.exam_stage))
    }

    async fn set_stage(&self, exam_id: ExamId, stage: DocumentStage) -> Result<()> {
        let request = self
            .http
            .put(self.url(&format!("/exams/{}/stage", exam_id)))
            .json(&StageBody {
                exam_stage: stage.0,
            });
        self.send(request, &format!("stage of exam {}", exam_id))
            .await?;
        log::info!("exam {} moved to stage {}", exam_id, stage);
        Ok(())
    }

    async fn available_documents(&self, exam_id: ExamId) -> Result<DocumentAvailability> {
        let request = self.http.get(self.url(&format!(
            "/student/exam/{}/available-documents",
            exam_id
        )));
        self.json(request, &format!("documents of exam {}", exam_id))
            .await
    }

    async fn submit_response(
        &self,
        exam_id: ExamId,
        document: DocumentRole,
        payload: &QuestionPayload,
    ) -> Result<()> {
        let request = self
            .http
            .post(self.url(&format!(
                "/exam/{}/question_response/{}",
                exam_id, document
            )))
            .json(payload);
        self.send(request, &format!("question {}", payload.question_number))
            .await?;
        Ok(())
    }

    async fn process_document(&self, exam_id: ExamId, document: DocumentRole) -> Result<()> {
        let request = self
            .http
            .post(self.url(&format!("/exams/{}/process/{}", exam_id, document)));
        self.send(request, &format!("{} of exam {}", document, exam_id))
            .await?;
        Ok(())
    }

    async fn request_grading(&self, exam_id: ExamId) -> Result<GradingReport> {
        let request = self
            .http
            .post(self.url(&format!("/exams/{}/grade", exam_id)));
        self.json(request, &format!("grading of exam {}", exam_id))
            .await
    }
}
