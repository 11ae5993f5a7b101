//! Turning frame models into pixels.
//!
//! [`projection`] builds backend-agnostic [`DrawList`]s from a [`Frames`](crate::frames::Frames)
//! value, [`view`] maps pointer coordinates into sprite space, and [`raster`] is an
//! in-memory [`Surface`] used by the CLI and tests.

pub mod projection;
pub mod raster;
pub mod view;

pub use projection::{
    DrawCmd, DrawList, Palette, PreviewBlit, Surface, base_box_outline, blank_canvas, crop_bands,
    fit_preview, frame_outlines, frame_preview, sprite_backdrop,
};
pub use raster::RasterSurface;
pub use view::Viewport;

#[cfg(test)]
#[path = "../../tests/unit/render/view.rs"]
mod view_tests;

#[cfg(test)]
#[path = "../../tests/unit/render/projection.rs"]
mod projection_tests;

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod raster_tests;
