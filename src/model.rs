pub mod editor;
pub mod element;
pub mod slide;
