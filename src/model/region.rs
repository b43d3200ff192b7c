//! Captured regions and the display-space geometry they are drawn with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EncodedImage, PartLabel};

/// A point in display coordinates (CSS pixels of the shown page).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Bounding rectangle of a set of points.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// The outline of a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// A rubber-band rectangle
    Rect(Rect),

    /// A freehand outline, closed implicitly between last and first point
    Freeform {
        /// Outline vertices in drawing order
        points: Vec<Point>,
    },
}

impl Shape {
    /// The rectangle enclosing the shape.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect(r) => *r,
            Shape::Freeform { points } => {
                Rect::bounding(points).unwrap_or_else(|| Rect::new(0.0, 0.0, 0.0, 0.0))
            }
        }
    }

    /// Check if this is a freehand outline.
    pub fn is_freeform(&self) -> bool {
        matches!(self, Shape::Freeform { .. })
    }
}

/// What a region contains; decides how it is composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Handwritten or printed prose; merged into one image per bucket
    #[default]
    Text,
    /// A table; kept as its own image
    Table,
    /// A figure or sketch; kept as its own image
    Diagram,
}

impl ContentKind {
    /// All kinds in payload order.
    pub const ALL: [ContentKind; 3] = [ContentKind::Text, ContentKind::Table, ContentKind::Diagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Table => "table",
            ContentKind::Diagram => "diagram",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ContentKind::Text),
            "table" => Ok(ContentKind::Table),
            "diagram" => Ok(ContentKind::Diagram),
            other => Err(crate::Error::validation(format!(
                "unknown content kind: {}",
                other
            ))),
        }
    }
}

/// A single captured selection, cropped at render resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// 1-based position in the current list
    pub seq: u32,

    /// Page the selection was drawn on (0-indexed)
    pub page: usize,

    /// Outline in display coordinates
    pub shape: Shape,

    /// Content classification
    pub kind: ContentKind,

    /// Associated part; `None` means the question itself
    pub part: Option<PartLabel>,

    /// The cropped pixels
    pub crop: EncodedImage,

    /// When the selection was captured
    pub captured_at: DateTime<Utc>,
}

impl Region {
    /// Create a text region for the main bucket.
    pub fn new(seq: u32, page: usize, shape: Shape, crop: EncodedImage) -> Self {
        Self {
            seq,
            page,
            shape,
            kind: ContentKind::Text,
            part: None,
            crop,
            captured_at: Utc::now(),
        }
    }

    /// Set the content kind.
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the associated part.
    pub fn with_part(mut self, part: Option<PartLabel>) -> Self {
        self.part = part;
        self
    }

    /// Check if the region belongs to the question rather than a part.
    pub fn is_main(&self) -> bool {
        self.part.is_none()
    }
}
