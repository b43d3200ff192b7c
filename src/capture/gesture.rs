//! Pointer gesture tracking.

use serde::{Deserialize, Serialize};

use super::SelectionTool;
use crate::model::{Point, Rect, Shape};

/// State of the selection gesture.
///
/// Nothing outside the gesture changes until it ends; intermediate shapes
/// are only for drawing feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Gesture {
    #[default]
    Idle,
    Selecting {
        /// Page the pointer went down on
        page: usize,
        tool: SelectionTool,
        /// Where the pointer went down
        anchor: Point,
        /// Latest pointer position
        current: Point,
        /// Every position seen, for freehand outlines
        path: Vec<Point>,
    },
}

impl Gesture {
    /// Start a gesture at `anchor`.
    pub fn begin(page: usize, tool: SelectionTool, anchor: Point) -> Self {
        Gesture::Selecting {
            page,
            tool,
            anchor,
            current: anchor,
            path: vec![anchor],
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Gesture::Selecting { .. })
    }

    /// Record a pointer move and return the updated candidate.
    pub fn track(&mut self, to: Point) -> Option<Shape> {
        if let Gesture::Selecting { current, path, .. } = self {
            *current = to;
            path.push(to);
        }
        self.candidate()
    }

    /// The shape the gesture would produce if it ended now.
    pub fn candidate(&self) -> Option<Shape> {
        match self {
            Gesture::Idle => None,
            Gesture::Selecting {
                tool: SelectionTool::Rectangle,
                anchor,
                current,
                ..
            } => Some(Shape::Rect(Rect::from_corners(*anchor, *current))),
            Gesture::Selecting {
                tool: SelectionTool::Freehand,
                path,
                ..
            } => Some(Shape::Freeform {
                points: path.clone(),
            }),
        }
    }

    /// Page of the active gesture.
    pub fn page(&self) -> Option<usize> {
        match self {
            Gesture::Idle => None,
            Gesture::Selecting { page, .. } => Some(*page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_candidate_follows_pointer() {
        let mut g = Gesture::begin(0, SelectionTool::Rectangle, Point::new(10.0, 10.0));
        assert!(g.is_active());
        g.track(Point::new(30.0, 5.0));
        let shape = g.track(Point::new(40.0, 60.0)).unwrap();
        assert_eq!(shape, Shape::Rect(Rect::new(10.0, 10.0, 30.0, 50.0)));
    }

    #[test]
    fn test_freehand_candidate_keeps_path() {
        let mut g = Gesture::begin(2, SelectionTool::Freehand, Point::new(0.0, 0.0));
        g.track(Point::new(10.0, 0.0));
        g.track(Point::new(10.0, 10.0));
        match g.candidate().unwrap() {
            Shape::Freeform { points } => assert_eq!(points.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(g.page(), Some(2));
    }

    #[test]
    fn test_idle_has_no_candidate() {
        let mut g = Gesture::Idle;
        assert!(g.track(Point::new(1.0, 1.0)).is_none());
    }
}
