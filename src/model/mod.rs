//! Data model shared by the capture, composition and submission layers.
//!
//! Everything here is plain serializable data; behaviour lives in the
//! `parts`, `compose`, `capture` and `assemble` modules.

mod image;
mod label;
mod question;
mod region;
mod response;
mod stage;

pub use image::EncodedImage;
pub use label::{PartLabel, MAX_CHILDREN, MAX_DEPTH};
pub use question::{part_caption, question_caption, ExamId, Question, QuestionId};
pub use region::{ContentKind, Point, Rect, Region, Shape};
pub use response::{Composite, CompositeSet, PartResponse, QuestionResponse};
pub use stage::{DocumentRole, DocumentStage, UserRole, GRADED_STAGE, GRADING_STAGE};
