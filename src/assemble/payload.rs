//! Final per-question payloads sent to the server.

use serde::{Deserialize, Serialize};

use crate::compose::Composer;
use crate::error::Result;
use crate::model::{question_caption, ContentKind, EncodedImage, QuestionId, QuestionResponse};

/// What the server stores for one question.
///
/// Images serialize as `data:` URIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question_id: QuestionId,
    pub question_number: u32,
    pub original_index: usize,
    pub text_images: Vec<EncodedImage>,
    pub table_images: Vec<EncodedImage>,
    pub diagram_images: Vec<EncodedImage>,
}

impl QuestionPayload {
    /// Check if the payload carries no image at all.
    pub fn is_empty(&self) -> bool {
        self.image_count() == 0
    }

    pub fn image_count(&self) -> usize {
        self.text_images.len() + self.table_images.len() + self.diagram_images.len()
    }
}

/// Flatten a question's response into its submission payload.
///
/// Text from the question and from every part is restacked into a single
/// image under one question caption: the question's own crops first, then
/// each part's crops in label order. Tables and diagrams of the question
/// and its parts are listed as they are, question first.
pub async fn finalize_question(
    response: &QuestionResponse,
    composer: &Composer,
) -> Result<QuestionPayload> {
    let main_text = &response.images.text_images;
    let part_sources: Vec<EncodedImage> = response
        .parts
        .iter()
        .flat_map(|p| p.images.text_images.iter())
        .flat_map(|c| c.sources.iter().cloned())
        .collect();

    let text_images = match (main_text.as_slice(), part_sources.is_empty()) {
        ([], true) => Vec::new(),
        // nothing to merge in; the question composite is already final
        ([only], true) => vec![only.image.clone()],
        _ => {
            let mut sources: Vec<EncodedImage> = main_text
                .iter()
                .flat_map(|c| c.sources.iter().cloned())
                .collect();
            sources.extend(part_sources);
            let caption = question_caption(response.question_number);
            vec![composer.compose(&caption, sources).await?.image]
        }
    };

    Ok(QuestionPayload {
        question_id: response.question_id,
        question_number: response.question_number,
        original_index: response.original_index,
        text_images,
        table_images: flatten(response, ContentKind::Table),
        diagram_images: flatten(response, ContentKind::Diagram),
    })
}

fn flatten(response: &QuestionResponse, kind: ContentKind) -> Vec<EncodedImage> {
    response
        .images
        .get(kind)
        .iter()
        .chain(response.parts.iter().flat_map(|p| p.images.get(kind).iter()))
        .map(|c| c.image.clone())
        .collect()
}
