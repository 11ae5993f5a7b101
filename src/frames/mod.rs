//! Frame model: a base box plus chained per-frame deltas and crops.

pub mod batch;
pub mod border;
pub mod model;

pub use batch::{InProgressBatch, locked_shift};
pub use border::{BorderLimits, border_hit};
pub use model::{
    BaseBox, BoxHit, Crop, Dimension, FrameDelta, Frames, InputOutcome, Side, Sides,
};

#[cfg(test)]
#[path = "../../tests/unit/frames/model.rs"]
mod model_tests;

#[cfg(test)]
#[path = "../../tests/unit/frames/batch.rs"]
mod batch_tests;

#[cfg(test)]
#[path = "../../tests/unit/frames/border.rs"]
mod border_tests;
