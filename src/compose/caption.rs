//! Caption strips identifying which question or part a composite shows.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Fonts tried when no caption font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Caption appearance.
#[derive(Debug, Clone)]
pub struct CaptionOptions {
    /// Glyph height in pixels
    pub font_size: f32,

    /// Blank margin around the text in pixels
    pub padding: u32,

    /// Fill behind the text
    pub background: Rgba<u8>,

    /// Text color
    pub foreground: Rgba<u8>,
}

impl CaptionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set glyph height.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set margin.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set fill color.
    pub fn with_background(mut self, color: Rgba<u8>) -> Self {
        self.background = color;
        self
    }

    /// Set text color.
    pub fn with_foreground(mut self, color: Rgba<u8>) -> Self {
        self.foreground = color;
        self
    }
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            font_size: 28.0,
            padding: 8,
            background: Rgba([255, 255, 255, 255]),
            foreground: Rgba([0, 0, 0, 255]),
        }
    }
}

/// Renders a single line of text into its own raster.
pub trait Captioner: Send + Sync {
    /// Render `text` on a filled strip sized to the text.
    fn caption(&self, text: &str) -> Result<RgbaImage>;
}

/// [`Captioner`] drawing with a TrueType/OpenType font.
#[derive(Clone)]
pub struct FontCaptioner {
    font: FontArc,
    options: CaptionOptions,
}

impl FontCaptioner {
    pub fn new(font: FontArc, options: CaptionOptions) -> Self {
        Self { font, options }
    }

    /// Load the font from raw bytes.
    pub fn from_bytes(data: Vec<u8>, options: CaptionOptions) -> Result<Self> {
        let font = FontArc::try_from_vec(data)?;
        Ok(Self::new(font, options))
    }

    /// Load the font from a file.
    pub fn from_file<P: AsRef<Path>>(path: P, options: CaptionOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("loaded caption font {}", path.as_ref().display());
        Self::from_bytes(data, options)
    }

    /// Use the first common system font that exists.
    pub fn discover(options: CaptionOptions) -> Result<Self> {
        let path = SYSTEM_FONTS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .ok_or_else(|| Error::not_found("no caption font; pass one explicitly"))?;
        Self::from_file(path, options)
    }

    pub fn options(&self) -> &CaptionOptions {
        &self.options
    }
}

impl std::fmt::Debug for FontCaptioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCaptioner")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Captioner for FontCaptioner {
    fn caption(&self, text: &str) -> Result<RgbaImage> {
        let text: String = text.trim().nfc().collect();
        if text.is_empty() {
            return Err(Error::validation("caption text is empty"));
        }

        let scale = PxScale::from(self.options.font_size);
        let (text_width, _) = text_size(scale, &self.font, &text);
        let line_height = self.font.as_scaled(scale).height().ceil() as u32;
        let pad = self.options.padding;

        let mut strip = RgbaImage::from_pixel(
            text_width + 2 * pad,
            line_height + 2 * pad,
            self.options.background,
        );
        draw_text_mut(
            &mut strip,
            self.options.foreground,
            pad as i32,
            pad as i32,
            scale,
            &self.font,
            &text,
        );
        Ok(strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_options_builder() {
        let opts = CaptionOptions::new()
            .with_font_size(16.0)
            .with_padding(2)
            .with_foreground(Rgba([200, 0, 0, 255]));
        assert_eq!(opts.font_size, 16.0);
        assert_eq!(opts.padding, 2);
        assert_eq!(opts.background, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_invalid_font_bytes() {
        let err = FontCaptioner::from_bytes(vec![0, 1, 2, 3], CaptionOptions::default());
        assert!(matches!(err, Err(Error::Font(_))));
    }

    #[test]
    fn test_system_font_caption() {
        // Only runs where a common system font is installed.
        let Ok(captioner) = FontCaptioner::discover(CaptionOptions::default()) else {
            return;
        };
        let short = captioner.caption("Q1").unwrap();
        let long = captioner.caption("Question 1.2.3").unwrap();
        assert!(long.width() > short.width());
        assert_eq!(long.height(), short.height());
        assert!(captioner.caption("   ").is_err());
    }
}
