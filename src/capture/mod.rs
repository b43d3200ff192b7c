//! Region capture.
//!
//! A [`CaptureSession`] turns pointer gestures on rendered pages into
//! classified [`Region`](crate::model::Region)s for the active question and
//! turns them into responses when the question is finished.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scriptmark::capture::{CaptureMode, CaptureOptions, CaptureSession};
//! use scriptmark::compose::{Composer, FontCaptioner, RenderScale, RenderedPages};
//! use scriptmark::model::{ContentKind, DocumentRole, Point, Question};
//!
//! # async fn run() -> scriptmark::Result<()> {
//! let pages = RenderedPages::open(&["page-1.png"])?;
//! let composer = Composer::new(Arc::new(FontCaptioner::discover(Default::default())?));
//! let mut session = CaptureSession::new(
//!     1,
//!     DocumentRole::QuestionPaper,
//!     CaptureMode::Sequential,
//!     vec![Question::new(100, 1, "Define entropy")],
//!     CaptureOptions::default(),
//! )?;
//!
//! session.begin_selection(0, Point::new(40.0, 60.0))?;
//! session.update_selection(Point::new(500.0, 220.0));
//! let scale = RenderScale::fit(800.0, 1600)?;
//! let seq = session.end_selection(&pages, scale)?.seq;
//! session.set_kind(seq, ContentKind::Table)?;
//!
//! let response = session.finish_question(&composer).await?;
//! println!("{} table composites", response.images.table_images.len());
//! # Ok(())
//! # }
//! ```

mod gesture;
mod options;
mod session;

pub use gesture::Gesture;
pub use options::{CaptureMode, CaptureOptions, SelectionTool};
pub use session::CaptureSession;
