//! Bulk decode and encode of region rasters.

use futures::future::try_join_all;
use image::RgbaImage;
use rayon::prelude::*;

use crate::error::Result;
use crate::model::EncodedImage;

/// Decode every image concurrently and wait for all of them.
///
/// Decodes run on the blocking pool. There is no timeout: a stalled
/// decode delays only the caller awaiting this batch.
pub async fn load_all(images: &[EncodedImage]) -> Result<Vec<RgbaImage>> {
    let handles = images
        .iter()
        .cloned()
        .map(|img| tokio::task::spawn_blocking(move || img.decode()));
    let decoded = try_join_all(handles).await?;
    decoded.into_iter().collect()
}

/// Encode rasters as PNG in parallel, preserving order.
pub fn encode_all(images: &[RgbaImage]) -> Result<Vec<EncodedImage>> {
    images.par_iter().map(EncodedImage::from_rgba).collect()
}
