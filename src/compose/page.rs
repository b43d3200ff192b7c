//! Rendered page surfaces.
//!
//! Rasterizing the PDF happens elsewhere; this module only holds the
//! resulting page rasters so selections can be cropped from them.

use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;

use crate::error::{Error, Result};

/// Anything that can hand out rendered page rasters by index.
pub trait PageSource {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// The rendered raster of page `index` (0-indexed).
    fn page(&self, index: usize) -> Result<&RgbaImage>;
}

/// Pages already rendered to image files or memory.
#[derive(Debug, Clone, Default)]
pub struct RenderedPages {
    pages: Vec<RgbaImage>,
}

impl RenderedPages {
    pub fn new(pages: Vec<RgbaImage>) -> Self {
        Self { pages }
    }

    /// Load page images from disk, decoding in parallel.
    pub fn open<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<Self> {
        let pages = paths
            .par_iter()
            .map(|p| {
                let img = image::open(p.as_ref())?;
                Ok(img.to_rgba8())
            })
            .collect::<Result<Vec<_>>>()?;
        log::info!("loaded {} rendered pages", pages.len());
        Ok(Self { pages })
    }
}

impl PageSource for RenderedPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<&RgbaImage> {
        self.pages.get(index).ok_or_else(|| {
            Error::not_found(format!(
                "page {} (document has {} pages)",
                index + 1,
                self.pages.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lookup() {
        let pages = RenderedPages::new(vec![RgbaImage::new(4, 4), RgbaImage::new(8, 8)]);
        assert_eq!(pages.page_count(), 2);
        assert_eq!(pages.page(1).unwrap().width(), 8);
        assert!(matches!(pages.page(2), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p1.png");
        RgbaImage::new(6, 9).save(&path).unwrap();
        let pages = RenderedPages::open(&[path]).unwrap();
        assert_eq!(pages.page(0).unwrap().dimensions(), (6, 9));
    }
}
