//! Display-to-render coordinate translation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Point, Rect};

/// Ratio between render pixels and display pixels.
///
/// Pages are rendered at a higher resolution than they are shown; a
/// selection drawn at display size is multiplied by this factor before
/// pixels are copied from the rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderScale(f32);

impl RenderScale {
    /// Identity scale (display and render sizes match).
    pub const IDENTITY: RenderScale = RenderScale(1.0);

    pub fn new(factor: f32) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::validation(format!("invalid render scale {}", factor)));
        }
        Ok(Self(factor))
    }

    /// Scale for a surface `surface_width` pixels wide shown at `display_width`.
    pub fn fit(display_width: f32, surface_width: u32) -> Result<Self> {
        if display_width <= 0.0 {
            return Err(Error::validation("display width must be positive"));
        }
        Self::new(surface_width as f32 / display_width)
    }

    pub fn factor(&self) -> f32 {
        self.0
    }

    pub fn rect(&self, rect: &Rect) -> Rect {
        rect.scaled(self.0)
    }

    pub fn point(&self, p: &Point) -> Point {
        Point::new(p.x * self.0, p.y * self.0)
    }
}

impl Default for RenderScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
