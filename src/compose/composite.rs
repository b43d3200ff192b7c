//! Caption + crops -> one composite.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use super::{load_all, stitch_vertical, Captioner};
use crate::error::Result;
use crate::model::{Composite, EncodedImage};

/// Builds captioned composites from encoded crops.
#[derive(Clone)]
pub struct Composer {
    captioner: Arc<dyn Captioner>,
    background: Rgba<u8>,
}

impl Composer {
    pub fn new(captioner: Arc<dyn Captioner>) -> Self {
        Self {
            captioner,
            background: Rgba([255, 255, 255, 255]),
        }
    }

    /// Set the fill used around narrower images.
    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn captioner(&self) -> &dyn Captioner {
        self.captioner.as_ref()
    }

    /// Stack a caption strip above `sources`.
    ///
    /// All sources are decoded before stitching starts.
    pub async fn compose(&self, caption: &str, sources: Vec<EncodedImage>) -> Result<Composite> {
        let decoded = load_all(&sources).await?;
        let image = self.stack(caption, decoded)?;
        Ok(Composite {
            caption: caption.to_string(),
            sources,
            image: EncodedImage::from_rgba(&image)?,
        })
    }

    fn stack(&self, caption: &str, decoded: Vec<RgbaImage>) -> Result<RgbaImage> {
        let mut layers = Vec::with_capacity(decoded.len() + 1);
        layers.push(self.captioner.caption(caption)?);
        layers.extend(decoded);
        stitch_vertical(&layers, self.background)
    }
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}
