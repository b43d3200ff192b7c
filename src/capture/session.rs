//! The editing session for one document of one exam.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{CaptureMode, CaptureOptions, Gesture};
use crate::assemble::assemble_question;
use crate::client::{ExamBackend, PartLabelUpdate};
use crate::compose::{crop, Composer, PageSource, RenderScale};
use crate::error::{Error, Result};
use crate::model::{
    ContentKind, DocumentRole, EncodedImage, ExamId, PartLabel, Point, Question, QuestionId,
    QuestionResponse, Region, Shape,
};
use crate::parts::Renumbering;

/// All capture state for one document: the questions, the regions of the
/// active question, the gesture in progress and the finished responses.
///
/// Regions are addressed by their 1-based `seq`, which always equals their
/// position in [`regions`](Self::regions). In selective mode the regions a
/// question was last finished with are kept, so switching back to it and
/// finishing again starts from the full set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSession {
    exam_id: ExamId,
    document: DocumentRole,
    mode: CaptureMode,
    options: CaptureOptions,
    questions: Vec<Question>,
    active: usize,
    regions: Vec<Region>,
    gesture: Gesture,
    responses: Vec<QuestionResponse>,
    locked: BTreeSet<QuestionId>,
    edited: BTreeSet<QuestionId>,
    #[serde(default)]
    finished_regions: BTreeMap<QuestionId, Vec<Region>>,
}

impl CaptureSession {
    /// Start a session over `questions`, with the first one active.
    pub fn new(
        exam_id: ExamId,
        document: DocumentRole,
        mode: CaptureMode,
        questions: Vec<Question>,
        options: CaptureOptions,
    ) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::not_found(format!("questions of exam {}", exam_id)));
        }
        log::debug!(
            "capture session for {} of exam {} ({:?}, {} questions)",
            document,
            exam_id,
            mode,
            questions.len()
        );
        Ok(Self {
            exam_id,
            document,
            mode,
            options,
            questions,
            active: 0,
            regions: Vec::new(),
            gesture: Gesture::Idle,
            responses: Vec::new(),
            locked: BTreeSet::new(),
            edited: BTreeSet::new(),
            finished_regions: BTreeMap::new(),
        })
    }

    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    pub fn document(&self) -> DocumentRole {
        self.document
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// The question regions are currently captured for.
    pub fn active_question(&self) -> Option<&Question> {
        self.questions.get(self.active)
    }

    /// Regions of the active question, in assembly order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Finished responses, sorted by question number.
    pub fn responses(&self) -> &[QuestionResponse] {
        &self.responses
    }

    pub fn into_responses(self) -> Vec<QuestionResponse> {
        self.responses
    }

    /// Check if no further capture is possible in sequential mode.
    pub fn is_complete(&self) -> bool {
        self.active >= self.questions.len()
    }

    /// Check if a question was finished in sequential mode and is closed to capture.
    pub fn is_locked(&self, id: QuestionId) -> bool {
        self.locked.contains(&id)
    }

    fn active_index(&self) -> Result<usize> {
        if self.is_complete() {
            return Err(Error::validation("every question has been captured"));
        }
        Ok(self.active)
    }

    /// Check if the active question has regions that were never finished.
    pub fn has_unfinished_regions(&self) -> bool {
        if self.regions.is_empty() {
            return false;
        }
        match self.questions.get(self.active) {
            Some(q) => self.finished_regions.get(&q.id) != Some(&self.regions),
            None => true,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.gesture.is_active() {
            return Err(Error::validation("finish the current selection first"));
        }
        Ok(())
    }

    // Gestures

    /// Anchor a new selection on `page`.
    pub fn begin_selection(&mut self, page: usize, at: Point) -> Result<()> {
        self.ensure_idle()?;
        let question = &self.questions[self.active_index()?];
        if self.locked.contains(&question.id) {
            return Err(Error::validation(format!(
                "{} is already finished",
                question.caption()
            )));
        }
        self.gesture = Gesture::begin(page, self.options.tool, at);
        Ok(())
    }

    /// Follow the pointer; returns the candidate outline to draw.
    pub fn update_selection(&mut self, to: Point) -> Option<Shape> {
        self.gesture.track(to)
    }

    /// Drop the selection in progress.
    pub fn cancel_selection(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Release the pointer: crop the candidate from its page and store it as
    /// a new main-bucket text region.
    ///
    /// `scale` maps display coordinates onto the page raster. The gesture
    /// ends whether or not the candidate is accepted.
    pub fn end_selection(
        &mut self,
        pages: &dyn PageSource,
        scale: RenderScale,
    ) -> Result<&Region> {
        let gesture = std::mem::take(&mut self.gesture);
        let (page, shape) = match (gesture.page(), gesture.candidate()) {
            (Some(page), Some(shape)) => (page, shape),
            _ => return Err(Error::validation("no selection in progress")),
        };

        let bounds = shape.bounds();
        let min = self.options.min_selection;
        if bounds.width < min || bounds.height < min {
            log::debug!(
                "ignoring {:.1}x{:.1} selection (min {})",
                bounds.width,
                bounds.height,
                min
            );
            return Err(Error::validation(format!(
                "selection must be at least {}px in each direction",
                min
            )));
        }

        let pixels = crop(pages.page(page)?, &shape, scale)?;
        let seq = self.regions.len() as u32 + 1;
        let region = Region::new(seq, page, shape, EncodedImage::from_rgba(&pixels)?);
        log::debug!(
            "captured region {} on page {} ({}x{})",
            seq,
            page,
            region.crop.width,
            region.crop.height
        );
        self.regions.push(region);
        Ok(&self.regions[self.regions.len() - 1])
    }

    // Regions

    fn region_index(&self, seq: u32) -> Result<usize> {
        let index = (seq as usize).wrapping_sub(1);
        if index >= self.regions.len() {
            return Err(Error::not_found(format!("region {}", seq)));
        }
        Ok(index)
    }

    fn renumber(&mut self) {
        for (i, region) in self.regions.iter_mut().enumerate() {
            region.seq = i as u32 + 1;
        }
    }

    /// Reclassify a region.
    pub fn set_kind(&mut self, seq: u32, kind: ContentKind) -> Result<()> {
        self.ensure_idle()?;
        let index = self.region_index(seq)?;
        self.regions[index].kind = kind;
        Ok(())
    }

    /// Attach a region to a part of the active question, or to the question
    /// itself with `None`.
    pub fn set_part(&mut self, seq: u32, part: Option<PartLabel>) -> Result<()> {
        self.ensure_idle()?;
        let index = self.region_index(seq)?;
        if let Some(label) = &part {
            let question = &self.questions[self.active_index()?];
            if !question.parts.contains(label) {
                return Err(Error::not_found(format!(
                    "part {} in {}",
                    label,
                    question.caption()
                )));
            }
        }
        self.regions[index].part = part;
        Ok(())
    }

    /// Delete a region; later regions move up one place.
    pub fn delete_region(&mut self, seq: u32) -> Result<Region> {
        self.ensure_idle()?;
        let index = self.region_index(seq)?;
        let removed = self.regions.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Move a region to position `to` (1-based) in the list.
    pub fn move_region(&mut self, seq: u32, to: u32) -> Result<()> {
        self.ensure_idle()?;
        let from = self.region_index(seq)?;
        let to = self.region_index(to)?;
        let region = self.regions.remove(from);
        self.regions.insert(to, region);
        self.renumber();
        Ok(())
    }

    /// Drop every region of the active question.
    pub fn clear_regions(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.regions.clear();
        Ok(())
    }

    // Parts

    fn editable_question(&mut self) -> Result<&mut Question> {
        self.ensure_idle()?;
        if self.mode != CaptureMode::Sequential {
            return Err(Error::validation(
                "parts can only be edited while capturing the question paper",
            ));
        }
        let index = self.active_index()?;
        Ok(&mut self.questions[index])
    }

    /// Add the next top-level part to the active question.
    pub fn add_top_level_part(&mut self) -> Result<PartLabel> {
        let question = self.editable_question()?;
        let label = question.parts.add_top_level()?;
        let id = question.id;
        self.edited.insert(id);
        Ok(label)
    }

    /// Add the next sub-part under `parent` in the active question.
    pub fn add_subpart(&mut self, parent: &PartLabel) -> Result<PartLabel> {
        let question = self.editable_question()?;
        let label = question.parts.add_subpart(parent)?;
        let id = question.id;
        self.edited.insert(id);
        Ok(label)
    }

    /// Remove a part and its subtree from the active question.
    ///
    /// Regions attached to a removed part fall back to the question; regions
    /// on renumbered parts follow their part.
    pub fn remove_part(&mut self, label: &PartLabel) -> Result<Renumbering> {
        let question = self.editable_question()?;
        let renumbering = question.parts.remove(label)?;
        let id = question.id;
        self.edited.insert(id);

        for region in &mut self.regions {
            if let Some(part) = &region.part {
                region.part = renumbering.map(part);
            }
        }
        Ok(renumbering)
    }

    /// Change the maximum marks of any question.
    pub fn set_max_marks(&mut self, id: QuestionId, marks: u32) -> Result<()> {
        if marks == 0 {
            return Err(Error::validation("max marks must be positive"));
        }
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| Error::not_found(format!("question {}", id)))?;
        question.max_marks = marks;
        self.edited.insert(id);
        Ok(())
    }

    /// Part-label and marks changes not yet sent to the server.
    pub fn pending_updates(&self) -> Result<Vec<PartLabelUpdate>> {
        self.questions
            .iter()
            .filter(|q| self.edited.contains(&q.id))
            .map(PartLabelUpdate::from_question)
            .collect()
    }

    /// Forget pending updates once they have been persisted.
    pub fn mark_persisted(&mut self) {
        self.edited.clear();
    }

    /// Send every pending update through `backend`, one question at a time.
    ///
    /// A question stops being pending as soon as its update is stored, so a
    /// failure part way leaves only the unsent ones. Returns how many were sent.
    pub async fn persist_updates(&mut self, backend: &dyn ExamBackend) -> Result<usize> {
        let updates = self.pending_updates()?;
        for update in &updates {
            backend.update_parts(self.exam_id, update).await?;
            self.edited.remove(&update.question_id);
        }
        if !updates.is_empty() {
            log::info!(
                "saved part labels of {} questions in exam {}",
                updates.len(),
                self.exam_id
            );
        }
        Ok(updates.len())
    }

    // Questions

    /// Append a question created during a sequential session.
    pub fn push_question(&mut self, question: Question) -> Result<()> {
        if self.mode != CaptureMode::Sequential {
            return Err(Error::validation(
                "questions can only be added while capturing the question paper",
            ));
        }
        if let Some(last) = self.questions.last() {
            if question.number <= last.number {
                return Err(Error::validation(format!(
                    "question {} must come after question {}",
                    question.number, last.number
                )));
            }
        }
        self.questions.push(question);
        Ok(())
    }

    /// Switch the active question in selective mode.
    pub fn select_question(&mut self, id: QuestionId) -> Result<()> {
        self.ensure_idle()?;
        if self.mode != CaptureMode::Selective {
            return Err(Error::validation(
                "questions are captured in order in sequential mode",
            ));
        }
        let index = self
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| Error::not_found(format!("question {}", id)))?;
        if index != self.active {
            if self.has_unfinished_regions() {
                return Err(Error::validation(
                    "finish or clear the current question before switching",
                ));
            }
            self.regions = self.finished_regions.get(&id).cloned().unwrap_or_default();
        }
        self.active = index;
        Ok(())
    }

    /// Assemble the active question's regions into its response.
    ///
    /// In sequential mode the question is locked, its regions are cleared and
    /// the next unfinished question becomes active. In selective mode the
    /// response replaces any earlier one for the same question, which stays
    /// active with its regions in place.
    pub async fn finish_question(&mut self, composer: &Composer) -> Result<&QuestionResponse> {
        self.ensure_idle()?;
        let index = self.active_index()?;
        let response =
            assemble_question(&self.questions[index], index, &self.regions, composer).await?;
        let id = response.question_id;

        self.responses.retain(|r| r.question_id != id);
        self.responses.push(response);
        self.responses.sort_by_key(|r| r.question_number);

        if self.mode == CaptureMode::Selective {
            self.finished_regions.insert(id, self.regions.clone());
        } else {
            self.regions.clear();
            self.locked.insert(id);
            self.active = (index + 1..self.questions.len())
                .find(|&i| !self.locked.contains(&self.questions[i].id))
                .unwrap_or(self.questions.len());
        }
        log::info!(
            "finished {} ({} responses)",
            self.questions[index].caption(),
            self.responses.len()
        );

        self.responses
            .iter()
            .find(|r| r.question_id == id)
            .ok_or_else(|| Error::not_found(format!("response for question {}", id)))
    }

    /// Discard a finished response and make its question active again.
    pub fn redo_question(&mut self, id: QuestionId) -> Result<()> {
        self.ensure_idle()?;
        let index = self
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| Error::not_found(format!("question {}", id)))?;
        if index != self.active && self.has_unfinished_regions() {
            return Err(Error::validation(
                "finish or clear the current question before redoing another",
            ));
        }
        self.responses.retain(|r| r.question_id != id);
        self.locked.remove(&id);
        self.finished_regions.remove(&id);
        if index != self.active {
            self.regions.clear();
        }
        self.active = index;
        log::debug!("redoing {}", self.questions[index].caption());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Captioner, RenderedPages};
    use crate::parts::PartTree;
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;

    struct Strip;

    impl Captioner for Strip {
        fn caption(&self, _text: &str) -> Result<RgbaImage> {
            Ok(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255])))
        }
    }

    fn pages() -> RenderedPages {
        RenderedPages::new(vec![
            RgbaImage::from_pixel(400, 400, Rgba([200, 200, 200, 255])),
            RgbaImage::from_pixel(400, 400, Rgba([100, 100, 100, 255])),
        ])
    }

    fn questions() -> Vec<Question> {
        vec![
            Question::new(10, 1, "First")
                .with_parts(PartTree::from_strings(1, &["1.1", "1.2"]).unwrap()),
            Question::new(20, 2, "Second"),
        ]
    }

    fn session(mode: CaptureMode) -> CaptureSession {
        CaptureSession::new(
            5,
            DocumentRole::QuestionPaper,
            mode,
            questions(),
            CaptureOptions::default(),
        )
        .unwrap()
    }

    fn capture(s: &mut CaptureSession, page: usize, x: f32, y: f32, w: f32, h: f32) -> Result<u32> {
        s.begin_selection(page, Point::new(x, y))?;
        s.update_selection(Point::new(x + w, y + h));
        Ok(s.end_selection(&pages(), RenderScale::IDENTITY)?.seq)
    }

    #[test]
    fn test_new_requires_questions() {
        let err = CaptureSession::new(
            1,
            DocumentRole::AnswerScript,
            CaptureMode::Selective,
            vec![],
            CaptureOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_capture_assigns_dense_sequence() {
        let mut s = session(CaptureMode::Sequential);
        assert_eq!(capture(&mut s, 0, 0.0, 0.0, 50.0, 40.0).unwrap(), 1);
        assert_eq!(capture(&mut s, 1, 10.0, 10.0, 30.0, 30.0).unwrap(), 2);
        let r = &s.regions()[1];
        assert_eq!(r.page, 1);
        assert_eq!(r.kind, ContentKind::Text);
        assert!(r.is_main());
        assert_eq!((r.crop.width, r.crop.height), (30, 30));
    }

    #[test]
    fn test_small_selection_rejected_without_change() {
        let mut s = session(CaptureMode::Sequential);
        let err = capture(&mut s, 0, 0.0, 0.0, 50.0, 4.0).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(s.regions().is_empty());
        assert!(!s.gesture().is_active());
    }

    #[test]
    fn test_mutations_blocked_during_gesture() {
        let mut s = session(CaptureMode::Sequential);
        capture(&mut s, 0, 0.0, 0.0, 50.0, 50.0).unwrap();
        s.begin_selection(0, Point::new(5.0, 5.0)).unwrap();
        assert!(s.delete_region(1).is_err());
        assert!(s.set_kind(1, ContentKind::Table).is_err());
        assert!(s.add_top_level_part().is_err());
        assert!(s.begin_selection(0, Point::new(1.0, 1.0)).is_err());
        s.cancel_selection();
        assert!(s.set_kind(1, ContentKind::Table).is_ok());
    }

    #[test]
    fn test_delete_and_move_renumber() {
        let mut s = session(CaptureMode::Sequential);
        for i in 0..5 {
            capture(&mut s, 0, i as f32 * 20.0, 0.0, 15.0, 15.0 + i as f32).unwrap();
        }
        s.delete_region(2).unwrap();
        let seqs: Vec<u32> = s.regions().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
        // former region 5 (height 19) to the front
        s.move_region(4, 1).unwrap();
        assert_eq!(s.regions()[0].crop.height, 19);
        assert_eq!(s.regions()[0].seq, 1);
        assert!(matches!(s.delete_region(9), Err(Error::NotFound(_))));
        assert!(matches!(s.delete_region(0), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_set_part_checks_tree() {
        let mut s = session(CaptureMode::Sequential);
        capture(&mut s, 0, 0.0, 0.0, 20.0, 20.0).unwrap();
        s.set_part(1, Some("1.2".parse().unwrap())).unwrap();
        assert!(s.set_part(1, Some("1.3".parse().unwrap())).is_err());
        assert_eq!(s.regions()[0].part, Some("1.2".parse().unwrap()));
    }

    #[test]
    fn test_remove_part_moves_regions() {
        let mut s = session(CaptureMode::Sequential);
        capture(&mut s, 0, 0.0, 0.0, 20.0, 20.0).unwrap();
        capture(&mut s, 0, 30.0, 0.0, 20.0, 20.0).unwrap();
        s.set_part(1, Some("1.1".parse().unwrap())).unwrap();
        s.set_part(2, Some("1.2".parse().unwrap())).unwrap();

        s.remove_part(&"1.1".parse().unwrap()).unwrap();
        assert_eq!(s.regions()[0].part, None);
        assert_eq!(s.regions()[1].part, Some("1.1".parse().unwrap()));
        assert_eq!(s.active_question().unwrap().parts.to_strings(), vec!["1.1"]);

        let updates = s.pending_updates().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].question_id, 10);
        s.mark_persisted();
        assert!(s.pending_updates().unwrap().is_empty());
    }

    #[test]
    fn test_parts_fixed_in_selective_mode() {
        let mut s = session(CaptureMode::Selective);
        assert!(matches!(s.add_top_level_part(), Err(Error::Validation(_))));
        s.set_max_marks(20, 4).unwrap();
        assert_eq!(s.question(20).unwrap().max_marks, 4);
        assert!(s.set_max_marks(20, 0).is_err());
    }

    #[tokio::test]
    async fn test_sequential_finish_advances_and_locks() {
        let composer = Composer::new(Arc::new(Strip));
        let mut s = session(CaptureMode::Sequential);
        capture(&mut s, 0, 0.0, 0.0, 20.0, 20.0).unwrap();
        let response = s.finish_question(&composer).await.unwrap();
        assert_eq!(response.question_number, 1);
        assert_eq!(response.images.text_images.len(), 1);

        assert!(s.regions().is_empty());
        assert_eq!(s.active_question().unwrap().id, 20);
        assert!(s.is_locked(10));

        s.finish_question(&composer).await.unwrap();
        assert!(s.is_complete());
        assert!(s.begin_selection(0, Point::new(0.0, 0.0)).is_err());

        s.redo_question(10).unwrap();
        assert_eq!(s.active_question().unwrap().id, 10);
        assert_eq!(s.responses().len(), 1);
        s.finish_question(&composer).await.unwrap();
        assert!(s.is_complete());
        let numbers: Vec<u32> = s.responses().iter().map(|r| r.question_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_selective_finish_replaces() {
        let composer = Composer::new(Arc::new(Strip));
        let mut s = session(CaptureMode::Selective);
        s.select_question(20).unwrap();
        capture(&mut s, 0, 0.0, 0.0, 20.0, 20.0).unwrap();
        assert!(s.select_question(10).is_err());
        s.finish_question(&composer).await.unwrap();
        assert_eq!(s.active_question().unwrap().id, 20);
        assert_eq!(s.regions().len(), 1);

        // a second pass adds to the first capture
        capture(&mut s, 0, 0.0, 0.0, 20.0, 20.0).unwrap();
        s.set_kind(2, ContentKind::Diagram).unwrap();
        let response = s.finish_question(&composer).await.unwrap();
        assert_eq!(response.images.text_images.len(), 1);
        assert_eq!(response.images.diagram_images.len(), 1);
        assert_eq!(s.responses().len(), 1);

        s.select_question(10).unwrap();
        assert!(s.regions().is_empty());
        s.finish_question(&composer).await.unwrap();
        assert_eq!(s.responses()[0].question_id, 10);
    }

    #[tokio::test]
    async fn test_selective_regions_follow_question() {
        let composer = Composer::new(Arc::new(Strip));
        let mut s = session(CaptureMode::Selective);
        capture(&mut s, 0, 0.0, 0.0, 20.0, 20.0).unwrap();
        capture(&mut s, 1, 0.0, 0.0, 30.0, 30.0).unwrap();
        s.finish_question(&composer).await.unwrap();
        assert!(!s.has_unfinished_regions());

        s.select_question(20).unwrap();
        capture(&mut s, 0, 0.0, 0.0, 40.0, 40.0).unwrap();
        s.finish_question(&composer).await.unwrap();

        s.select_question(10).unwrap();
        let sizes: Vec<u32> = s.regions().iter().map(|r| r.crop.width).collect();
        assert_eq!(sizes, vec![20, 30]);

        s.delete_region(1).unwrap();
        assert!(s.has_unfinished_regions());
        assert!(s.select_question(20).is_err());
        let response = s.finish_question(&composer).await.unwrap();
        assert_eq!(response.images.text_images[0].sources.len(), 1);

        s.redo_question(20).unwrap();
        assert!(s.regions().is_empty());
        assert_eq!(s.responses().len(), 1);
        s.select_question(10).unwrap();
        assert_eq!(s.regions().len(), 1);
    }

    #[test]
    fn test_push_question_order() {
        let mut s = session(CaptureMode::Sequential);
        assert!(s.push_question(Question::new(30, 2, "dup")).is_err());
        s.push_question(Question::new(30, 3, "Third")).unwrap();
        assert_eq!(s.questions().len(), 3);
    }

    #[test]
    fn test_session_serializes() {
        let mut s = session(CaptureMode::Sequential);
        capture(&mut s, 0, 0.0, 0.0, 20.0, 20.0).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: CaptureSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.regions().len(), 1);
        assert_eq!(back.regions()[0].crop, s.regions()[0].crop);
        assert_eq!(back.active_question().unwrap().id, 10);
    }
}
