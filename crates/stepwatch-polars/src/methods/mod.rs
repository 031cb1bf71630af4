//! DataFrame conversions and the extension trait implementation

mod detect;
mod frame;

pub use frame::{frame_from_annotated, samples_from_frame};
