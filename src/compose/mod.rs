//! Coordinate translation and image composition.
//!
//! Selections are drawn on a page shown at display size while the page
//! itself is rendered at a larger size. [`crop`] converts a display-space
//! [`Shape`](crate::model::Shape) into render pixels using an explicit
//! [`RenderScale`]; [`stitch_vertical`] and [`Composer`] assemble crops
//! into one captioned image per question, part or figure.

mod caption;
mod composite;
mod crop;
mod load;
mod page;
mod scale;
mod stitch;

pub use caption::{CaptionOptions, Captioner, FontCaptioner};
pub use composite::Composer;
pub use crop::crop;
pub use load::{encode_all, load_all};
pub use page::{PageSource, RenderedPages};
pub use scale::RenderScale;
pub use stitch::{stitch_offsets, stitch_vertical};
