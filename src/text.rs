//! Font resolution, measurement and glyph shaping.

pub mod engine;
pub mod metrics;
