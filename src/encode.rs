//! Byte encoders for rendered frames: PNG, JPEG and the PDF page container.

pub mod jpeg;
pub mod pdf;
pub mod png;
