//! # scriptmark
//!
//! Region capture, part labelling and image composition for scanned exam
//! scripts.
//!
//! An instructor or student marks regions on rendered pages of a question
//! paper, marking scheme, solution script or answer script. Each region is
//! classified as text, table or diagram and attached to a question or one
//! of its dotted-decimal parts. Finished questions are stitched into
//! captioned composite images and submitted for storage and grading.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use scriptmark::client::{ClientOptions, HttpBackend};
//! use scriptmark::compose::{Composer, FontCaptioner, RenderScale, RenderedPages};
//! use scriptmark::model::{DocumentRole, Point, UserRole};
//! use scriptmark::{CaptureOptions, StageMachine, Submitter};
//!
//! # async fn run() -> scriptmark::Result<()> {
//! let backend = Arc::new(HttpBackend::new(ClientOptions::new("http://localhost:8000"))?);
//! let mut stage = StageMachine::load(backend.clone(), 7).await?;
//! let mut session = stage
//!     .open_session(UserRole::Student, DocumentRole::AnswerScript, CaptureOptions::default())
//!     .await?;
//!
//! let pages = RenderedPages::open(&["answer-1.png"])?;
//! session.begin_selection(0, Point::new(20.0, 40.0))?;
//! session.update_selection(Point::new(600.0, 300.0));
//! session.end_selection(&pages, RenderScale::fit(800.0, 1700)?)?;
//!
//! let composer = Composer::new(Arc::new(FontCaptioner::discover(Default::default())?));
//! session.finish_question(&composer).await?;
//!
//! let mut submitter = Submitter::for_session(backend, &session);
//! let report = submitter
//!     .submit(&mut stage, session.responses(), &composer)
//!     .await?;
//! if let Some(grades) = report.grading {
//!     println!("total: {}", grades.total());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`parts`]: the part-label tree and its numbering rules
//! - [`compose`]: cropping, stitching and captioning rasters
//! - [`capture`]: the editing session driven by pointer gestures
//! - [`assemble`]: turning regions into responses and submission payloads
//! - [`stage`]: which document may be captured, and the grading trigger
//! - [`client`]: the exam server interface

pub mod assemble;
pub mod capture;
pub mod client;
pub mod compose;
pub mod error;
pub mod model;
pub mod parts;
pub mod stage;
pub mod submit;

// Re-export commonly used types
pub use assemble::{assemble_question, finalize_question, QuestionPayload};
pub use capture::{CaptureMode, CaptureOptions, CaptureSession, SelectionTool};
pub use client::{ClientOptions, ExamBackend, GradingReport, HttpBackend};
pub use compose::{crop, stitch_vertical, CaptionOptions, Captioner, Composer, RenderScale};
pub use error::{Error, Result};
pub use model::{
    ContentKind, DocumentRole, DocumentStage, EncodedImage, PartLabel, Question,
    QuestionResponse, Region, Shape, UserRole,
};
pub use parts::{sort_part_labels, PartTree};
pub use stage::{capture_mode_for, role_for_stage, StageMachine};
pub use submit::{SubmissionReport, Submitter};

use std::path::Path;

/// Load a question's part labels from a JSON file of dotted strings.
///
/// # Example
///
/// ```no_run
/// let tree = scriptmark::load_part_tree("q2-parts.json", 2).unwrap();
/// println!("{:?}", tree.to_strings());
/// ```
pub fn load_part_tree<P: AsRef<Path>>(path: P, question_number: u32) -> Result<PartTree> {
    let text = std::fs::read_to_string(path)?;
    let labels = parts::decode_labels(&text)?;
    PartTree::from_labels(question_number, labels)
}

/// Save a question's part labels as a JSON file of dotted strings.
pub fn save_part_tree<P: AsRef<Path>>(path: P, tree: &PartTree) -> Result<()> {
    let labels: Vec<PartLabel> = tree.iter().cloned().collect();
    std::fs::write(path, parts::encode_labels(&labels)?)?;
    Ok(())
}
