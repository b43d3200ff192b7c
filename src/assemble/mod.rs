//! Response assembly.
//!
//! Finishing a question turns its region list into a
//! [`QuestionResponse`](crate::model::QuestionResponse) with
//! [`assemble_question`]; submitting turns each response into a
//! [`QuestionPayload`] with [`finalize_question`].

mod bucket;
mod payload;
mod question;

pub use bucket::{Buckets, KindBuckets};
pub use payload::{finalize_question, QuestionPayload};
pub use question::assemble_question;
