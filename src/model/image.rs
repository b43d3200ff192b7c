//! Encoded raster payloads (the form regions and composites travel in).

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A self-describing encoded raster (PNG or JPEG bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage {
    /// Encoded bytes
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl EncodedImage {
    /// Encode an RGBA raster as PNG.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(Self {
            data: buf.into_inner(),
            mime_type: "image/png".to_string(),
            width: image.width(),
            height: image.height(),
        })
    }

    /// Wrap already-encoded bytes, reading format and size from the header.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mime_type = Self::detect_mime_type(&data)
            .ok_or_else(|| Error::Decode("unrecognised image data".into()))?;
        let format = ImageFormat::from_mime_type(mime_type)
            .ok_or_else(|| Error::Decode(format!("unsupported image type {}", mime_type)))?;
        let (width, height) =
            image::ImageReader::with_format(Cursor::new(&data), format).into_dimensions()?;
        Ok(Self {
            data,
            mime_type: mime_type.to_string(),
            width,
            height,
        })
    }

    /// Decode into an RGBA raster.
    pub fn decode(&self) -> Result<RgbaImage> {
        let format = ImageFormat::from_mime_type(&self.mime_type)
            .ok_or_else(|| Error::Decode(format!("unsupported image type {}", self.mime_type)))?;
        let img = image::load_from_memory_with_format(&self.data, format)?;
        Ok(img.to_rgba8())
    }

    /// Render as `data:<mime>;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// Parse a `data:` URI produced by [`to_data_uri`](Self::to_data_uri)
    /// or by a browser canvas.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let (header, encoded) = uri
            .split_once(',')
            .ok_or_else(|| Error::Decode("data URI has no payload".into()))?;
        if !header.starts_with("data:") || !header.ends_with(";base64") {
            return Err(Error::Decode(format!("not a base64 data URI: {}", header)));
        }
        let data = STANDARD.decode(encoded.trim())?;
        Self::from_bytes(data)
    }

    /// Get the size of the encoded data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Get the file extension based on MIME type.
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            _ => "bin",
        }
    }

    /// Detect MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 8 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }

        None
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_data_uri(&value)
    }
}

impl From<EncodedImage> for String {
    fn from(image: EncodedImage) -> Self {
        image.to_data_uri()
    }
}
