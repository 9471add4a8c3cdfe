//! Slide layout and CPU rasterization.
//!
//! Rendering is split in two passes: [`layout::layout_slide`] turns a slide into absolute line
//! placements for a target surface size, and [`cpu::CpuRasterizer`] paints the background and
//! those lines into a [`FrameRGBA`]. Both exporters go through the same two passes.

pub mod backend;
pub mod cpu;
pub mod layout;

pub use backend::FrameRGBA;
pub use cpu::CpuRasterizer;
pub use layout::{ElementLayout, FontScale, LinePlacement, SlideLayout, layout_slide};
