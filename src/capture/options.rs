//! Capture configuration.

use serde::{Deserialize, Serialize};

/// How selections are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionTool {
    /// Drag a rectangle between two corners
    #[default]
    Rectangle,
    /// Trace an outline point by point
    Freehand,
}

/// How the session moves between questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// One question at a time; finishing advances and locks it
    Sequential,
    /// Free navigation over fixed questions and parts
    Selective,
}

/// Options for a capture session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Smallest accepted selection width and height, in display pixels
    pub min_selection: f32,

    /// Drawing tool for new selections
    pub tool: SelectionTool,
}

impl CaptureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum selection size.
    pub fn with_min_selection(mut self, px: f32) -> Self {
        self.min_selection = px;
        self
    }

    /// Set the drawing tool.
    pub fn with_tool(mut self, tool: SelectionTool) -> Self {
        self.tool = tool;
        self
    }

    /// Draw freehand outlines.
    pub fn freehand(mut self) -> Self {
        self.tool = SelectionTool::Freehand;
        self
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            min_selection: 10.0,
            tool: SelectionTool::Rectangle,
        }
    }
}
