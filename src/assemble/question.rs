//! Building a [`QuestionResponse`] when a question is finished.

use futures::future::try_join_all;

use super::{Buckets, KindBuckets};
use crate::compose::Composer;
use crate::error::{Error, Result};
use crate::model::{
    part_caption, CompositeSet, EncodedImage, PartResponse, Question, QuestionResponse, Region,
};

/// Assemble the captured regions of `question` into composites.
///
/// Per bucket (the question itself and each part):
/// - all text regions are stacked, in list order, under one caption;
/// - every table and every diagram becomes its own captioned composite;
/// - empty kinds stay empty.
///
/// All composites of the question are built concurrently.
pub async fn assemble_question(
    question: &Question,
    original_index: usize,
    regions: &[Region],
    composer: &Composer,
) -> Result<QuestionResponse> {
    let buckets = Buckets::partition(question, regions)?;
    log::debug!(
        "assembling question {} from {} regions",
        question.number,
        buckets.region_count()
    );

    let main = compose_bucket(composer, question.caption(), &buckets.main);
    let parts = try_join_all(buckets.parts.iter().map(|(label, bucket)| async move {
        let images = compose_bucket(composer, part_caption(label), bucket).await?;
        Ok::<_, Error>(PartResponse {
            label: label.clone(),
            images,
        })
    }));
    let (images, parts) = futures::try_join!(main, parts)?;

    Ok(QuestionResponse {
        question_id: question.id,
        question_number: question.number,
        original_index,
        images,
        parts,
    })
}

async fn compose_bucket(
    composer: &Composer,
    caption: String,
    bucket: &KindBuckets<'_>,
) -> Result<CompositeSet> {
    let text = async {
        if bucket.text.is_empty() {
            return Ok::<_, Error>(Vec::new());
        }
        let sources: Vec<EncodedImage> = bucket.text.iter().map(|r| r.crop.clone()).collect();
        Ok::<_, Error>(vec![composer.compose(&caption, sources).await?])
    };
    let tables = try_join_all(
        bucket
            .table
            .iter()
            .map(|r| composer.compose(&caption, vec![r.crop.clone()])),
    );
    let diagrams = try_join_all(
        bucket
            .diagram
            .iter()
            .map(|r| composer.compose(&caption, vec![r.crop.clone()])),
    );

    let (text_images, table_images, diagram_images) = futures::try_join!(text, tables, diagrams)?;
    Ok(CompositeSet {
        text_images,
        table_images,
        diagram_images,
    })
}
