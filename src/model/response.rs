//! Assembled per-question output.

use serde::{Deserialize, Serialize};

use super::{ContentKind, EncodedImage, PartLabel, QuestionId};

/// A stitched image together with the crops it was built from.
///
/// The sources are kept so a later merge can restack them under a
/// different caption instead of nesting captions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composite {
    /// Caption drawn at the top of `image`
    pub caption: String,

    /// Region crops in stacking order, without caption
    pub sources: Vec<EncodedImage>,

    /// Caption followed by the sources
    pub image: EncodedImage,
}

/// Composites grouped by content kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompositeSet {
    pub text_images: Vec<Composite>,
    pub table_images: Vec<Composite>,
    pub diagram_images: Vec<Composite>,
}

impl CompositeSet {
    /// Composites of one kind.
    pub fn get(&self, kind: ContentKind) -> &[Composite] {
        match kind {
            ContentKind::Text => &self.text_images,
            ContentKind::Table => &self.table_images,
            ContentKind::Diagram => &self.diagram_images,
        }
    }

    /// Check if no composite of any kind exists.
    pub fn is_empty(&self) -> bool {
        self.text_images.is_empty() && self.table_images.is_empty() && self.diagram_images.is_empty()
    }

    /// Total number of composites.
    pub fn len(&self) -> usize {
        self.text_images.len() + self.table_images.len() + self.diagram_images.len()
    }
}

/// Composites for one sub-part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartResponse {
    pub label: PartLabel,

    #[serde(flatten)]
    pub images: CompositeSet,
}

/// Everything captured for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: QuestionId,

    /// Display number; the response collection is sorted by it
    pub question_number: u32,

    /// Position of the question in the exam's question list
    pub original_index: usize,

    /// Question-level composites
    #[serde(flatten)]
    pub images: CompositeSet,

    /// One entry per part label, in label order
    pub parts: Vec<PartResponse>,
}

impl QuestionResponse {
    /// Check if neither the question nor any part has a composite.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.parts.iter().all(|p| p.images.is_empty())
    }

    /// Number of composites of `kind` over the question and its parts.
    pub fn count(&self, kind: ContentKind) -> usize {
        self.images.get(kind).len()
            + self.parts.iter().map(|p| p.images.get(kind).len()).sum::<usize>()
    }

    /// Find the response for a part.
    pub fn part(&self, label: &PartLabel) -> Option<&PartResponse> {
        self.parts.iter().find(|p| &p.label == label)
    }
}
